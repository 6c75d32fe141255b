//! Buttons and row actions.

use std::any::Any;

use serde_json::{json, Value};

use adminplus_db::{record_id, Record};

use crate::component::{Fragment, GridComponent, RenderContext};
use crate::grid_field::GridField;

/// Column that holds row actions.
pub const ACTIONS_COLUMN: &str = "Actions";

/// A button that opens a form for a new record.
#[derive(Debug, Clone)]
pub struct GridFieldAddNewButton {
    target_fragment: String,
    label: Option<String>,
}

impl GridFieldAddNewButton {
    /// Creates the button in `target_fragment`.
    pub fn new(target_fragment: impl Into<String>) -> Self {
        Self {
            target_fragment: target_fragment.into(),
            label: None,
        }
    }

    /// Sets the button label. Defaults to "Add <model>".
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl GridComponent for GridFieldAddNewButton {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "AddNewButton"
    }

    fn fragments(&self, grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        let label = self
            .label
            .clone()
            .unwrap_or_else(|| format!("Add {}", grid.model().short_name()));
        vec![Fragment::new(
            self.target_fragment.clone(),
            json!({ "type": "addNew", "label": label, "url": grid.link("item/new") }),
        )]
    }
}

/// A per-row link to the record's edit form.
#[derive(Debug, Clone, Default)]
pub struct GridFieldEditButton;

impl GridFieldEditButton {
    /// Creates the edit button.
    pub const fn new() -> Self {
        Self
    }
}

impl GridComponent for GridFieldEditButton {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "EditButton"
    }

    fn augment_columns(&self, _grid: &GridField, columns: &mut Vec<String>) {
        columns.push(ACTIONS_COLUMN.to_string());
    }

    fn column_label(&self, _grid: &GridField, column: &str) -> Option<String> {
        (column == ACTIONS_COLUMN).then(String::new)
    }

    fn column_content(&self, grid: &GridField, record: &Record, column: &str) -> Option<Value> {
        if column != ACTIONS_COLUMN {
            return None;
        }
        let id = record_id(record)?;
        Some(json!({ "type": "edit", "url": grid.link(&format!("item/{id}/edit")) }))
    }
}

/// A per-row delete (or unlink) action.
#[derive(Debug, Clone, Default)]
pub struct GridFieldDeleteAction {
    remove_relation: bool,
}

impl GridFieldDeleteAction {
    /// Creates the action. With `remove_relation` the row is unlinked from
    /// its relation instead of deleted.
    pub const fn new(remove_relation: bool) -> Self {
        Self { remove_relation }
    }
}

impl GridComponent for GridFieldDeleteAction {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "DeleteAction"
    }

    fn augment_columns(&self, _grid: &GridField, columns: &mut Vec<String>) {
        columns.push(ACTIONS_COLUMN.to_string());
    }

    fn column_content(&self, grid: &GridField, record: &Record, column: &str) -> Option<Value> {
        if column != ACTIONS_COLUMN {
            return None;
        }
        let id = record_id(record)?;
        let action = if self.remove_relation { "unlink" } else { "delete" };
        Some(json!({ "type": action, "url": grid.link(&format!("item/{id}/{action}")) }))
    }
}

/// A button that downloads the list.
#[derive(Debug, Clone)]
pub struct GridFieldExportButton {
    target_fragment: String,
    export_columns: Vec<(String, String)>,
}

impl GridFieldExportButton {
    /// Creates the button in `target_fragment`.
    pub fn new(target_fragment: impl Into<String>) -> Self {
        Self {
            target_fragment: target_fragment.into(),
            export_columns: Vec::new(),
        }
    }

    /// Sets the exported `(field, label)` columns.
    pub fn set_export_columns(&mut self, columns: Vec<(String, String)>) {
        self.export_columns = columns;
    }

    /// Returns the exported columns.
    pub fn export_columns(&self) -> &[(String, String)] {
        &self.export_columns
    }
}

impl GridComponent for GridFieldExportButton {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "ExportButton"
    }

    fn fragments(&self, grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        let columns: Vec<Value> = self
            .export_columns
            .iter()
            .map(|(field, label)| json!({ "field": field, "label": label }))
            .collect();
        vec![Fragment::new(
            self.target_fragment.clone(),
            json!({ "type": "export", "label": "Export", "url": grid.link("export"), "columns": columns }),
        )]
    }
}

/// A button that opens a printable view of the list.
#[derive(Debug, Clone)]
pub struct GridFieldPrintButton {
    target_fragment: String,
}

impl GridFieldPrintButton {
    /// Creates the button in `target_fragment`.
    pub fn new(target_fragment: impl Into<String>) -> Self {
        Self {
            target_fragment: target_fragment.into(),
        }
    }
}

impl GridComponent for GridFieldPrintButton {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "PrintButton"
    }

    fn fragments(&self, grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        vec![Fragment::new(
            self.target_fragment.clone(),
            json!({ "type": "print", "label": "Print", "url": grid.link("print") }),
        )]
    }
}
