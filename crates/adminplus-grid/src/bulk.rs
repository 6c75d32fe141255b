//! Bulk actions on selected grid rows.
//!
//! A [`BulkManager`] adds a selection column to the grid and holds the named
//! [`BulkAction`]s that can run against the selected records. Actions are
//! resolved through a compile-time registry of `(name, constructor)` pairs;
//! the defaults are `bulkEdit`, `unlink` and `delete`.

use std::any::Any;
use std::fmt;

use serde::Serialize;
use serde_json::{json, Map, Value};

use adminplus_core::{AdminError, AdminResult};
use adminplus_db::{record_id, Record, RecordStore, ID_FIELD};
use adminplus_http::QueryDict;

use crate::component::{Fragment, GridComponent, RenderContext};
use crate::grid_field::GridField;

/// The selection column added by the manager.
pub const SELECT_COLUMN: &str = "BulkSelect";

/// The selected records and submitted values of one bulk request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkRequest {
    /// The model class the records belong to.
    pub class_name: String,
    /// The selected record IDs.
    pub ids: Vec<String>,
    /// Values for `bulkEdit`, keyed by field name.
    pub fields: Map<String, Value>,
}

impl BulkRequest {
    /// Creates a request for the given records.
    pub fn new(class_name: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ids,
            fields: Map::new(),
        }
    }

    /// Reads `records[]=<id>` and `fields[<Field>]=<value>` from a form post.
    pub fn from_post(class_name: impl Into<String>, post: &QueryDict) -> Self {
        let mut ids: Vec<String> = Vec::new();
        for id in post.get_list("records[]").into_iter().chain(post.get_list("records")) {
            let id = id.trim();
            if !id.is_empty() && !ids.iter().any(|seen| seen == id) {
                ids.push(id.to_string());
            }
        }
        let mut fields: Vec<(String, String)> = post.nested("fields").into_iter().collect();
        fields.sort();
        Self {
            class_name: class_name.into(),
            ids,
            fields: fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect(),
        }
    }

    /// Sets one `bulkEdit` value.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}

/// The outcome of a bulk action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkActionResult {
    /// Whether the action ran.
    pub success: bool,
    /// A message for the user.
    pub message: String,
    /// The IDs of the records the action changed.
    pub affected: Vec<String>,
}

impl BulkActionResult {
    /// A successful result.
    pub fn success(message: impl Into<String>, affected: Vec<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            affected,
        }
    }

    /// A failed result; nothing was changed.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            affected: Vec::new(),
        }
    }
}

/// An action run against the selected records of a grid.
pub trait BulkAction: Send + Sync + fmt::Debug {
    /// The name the action is routed by.
    fn name(&self) -> &'static str;

    /// The label shown to the user.
    fn label(&self) -> &'static str;

    /// Runs the action.
    fn execute(&self, store: &dyn RecordStore, request: &BulkRequest) -> AdminResult<BulkActionResult>;
}

// ── Built-in actions ─────────────────────────────────────────────────

/// Sets the submitted field values on every selected record.
#[derive(Debug, Clone, Default)]
pub struct BulkEditAction;

impl BulkAction for BulkEditAction {
    fn name(&self) -> &'static str {
        "bulkEdit"
    }

    fn label(&self) -> &'static str {
        "Edit"
    }

    fn execute(&self, store: &dyn RecordStore, request: &BulkRequest) -> AdminResult<BulkActionResult> {
        if request.ids.is_empty() {
            return Ok(BulkActionResult::failure("No records selected"));
        }
        let model = store.model(&request.class_name)?;
        let changes: Record = request
            .fields
            .iter()
            .filter(|(name, _)| name.as_str() != ID_FIELD && model.get_field(name).is_some())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        if changes.is_empty() {
            return Ok(BulkActionResult::failure("No fields to update"));
        }

        let mut affected = Vec::with_capacity(request.ids.len());
        for id in &request.ids {
            match store.update(&request.class_name, id, &changes) {
                Ok(record) => affected.extend(record_id(&record)),
                Err(AdminError::DoesNotExist(_)) => {
                    tracing::warn!(class = %request.class_name, id = %id, "bulk edit skipped missing record");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(BulkActionResult::success(
            format!("Updated {} record(s)", affected.len()),
            affected,
        ))
    }
}

/// Unlinks records from a related list. Top-level model listings have no
/// relation to unlink from, so the action always fails there.
#[derive(Debug, Clone, Default)]
pub struct UnlinkAction;

impl BulkAction for UnlinkAction {
    fn name(&self) -> &'static str {
        "unlink"
    }

    fn label(&self) -> &'static str {
        "Unlink"
    }

    fn execute(&self, _store: &dyn RecordStore, _request: &BulkRequest) -> AdminResult<BulkActionResult> {
        Ok(BulkActionResult::failure(
            "Unlinking is only possible for related lists",
        ))
    }
}

/// Deletes the selected records.
#[derive(Debug, Clone, Default)]
pub struct BulkDeleteAction;

impl BulkAction for BulkDeleteAction {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn label(&self) -> &'static str {
        "Delete"
    }

    fn execute(&self, store: &dyn RecordStore, request: &BulkRequest) -> AdminResult<BulkActionResult> {
        if request.ids.is_empty() {
            return Ok(BulkActionResult::failure("No records selected"));
        }
        let mut affected = Vec::new();
        for id in &request.ids {
            if store.delete(&request.class_name, id)? {
                affected.push(id.clone());
            }
        }
        Ok(BulkActionResult::success(
            format!("Deleted {} record(s)", affected.len()),
            affected,
        ))
    }
}

// ── Registry ─────────────────────────────────────────────────────────

/// Creates a bulk action.
pub type BulkActionConstructor = fn() -> Box<dyn BulkAction>;

/// The bulk actions known by name, in their default order.
pub const BULK_ACTION_REGISTRY: &[(&str, BulkActionConstructor)] = &[
    ("bulkEdit", make_bulk_edit),
    ("unlink", make_unlink),
    ("delete", make_bulk_delete),
];

fn make_bulk_edit() -> Box<dyn BulkAction> {
    Box::new(BulkEditAction)
}

fn make_unlink() -> Box<dyn BulkAction> {
    Box::new(UnlinkAction)
}

fn make_bulk_delete() -> Box<dyn BulkAction> {
    Box::new(BulkDeleteAction)
}

/// Creates a registered bulk action by name.
pub fn bulk_action_by_name(name: &str) -> Option<Box<dyn BulkAction>> {
    BULK_ACTION_REGISTRY
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, construct)| construct())
}

// ── Manager ──────────────────────────────────────────────────────────

/// Holds the bulk actions of a grid and adds the selection column.
#[derive(Debug)]
pub struct BulkManager {
    actions: Vec<Box<dyn BulkAction>>,
}

impl BulkManager {
    /// Creates a manager with every registered action.
    pub fn new() -> Self {
        Self {
            actions: BULK_ACTION_REGISTRY.iter().map(|(_, construct)| construct()).collect(),
        }
    }

    /// Creates a manager with the named registered actions.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ImproperlyConfigured`] for an unknown name.
    pub fn with_actions<S: AsRef<str>>(names: &[S]) -> AdminResult<Self> {
        let actions = names
            .iter()
            .map(|name| {
                bulk_action_by_name(name.as_ref()).ok_or_else(|| {
                    AdminError::ImproperlyConfigured(format!(
                        "unknown bulk action '{}'",
                        name.as_ref()
                    ))
                })
            })
            .collect::<AdminResult<Vec<_>>>()?;
        Ok(Self { actions })
    }

    /// Adds an action, replacing one of the same name.
    pub fn add_bulk_action(&mut self, action: Box<dyn BulkAction>) -> &mut Self {
        match self.actions.iter().position(|a| a.name() == action.name()) {
            Some(i) => self.actions[i] = action,
            None => self.actions.push(action),
        }
        self
    }

    /// Removes an action. Returns whether it was present.
    pub fn remove_bulk_action(&mut self, name: &str) -> bool {
        let before = self.actions.len();
        self.actions.retain(|a| a.name() != name);
        self.actions.len() < before
    }

    /// Returns the action names, in order.
    pub fn action_names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Looks up an action by name.
    pub fn get_bulk_action(&self, name: &str) -> Option<&dyn BulkAction> {
        self.actions.iter().find(|a| a.name() == name).map(AsRef::as_ref)
    }

    /// Runs the named action.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] when the manager has no such action,
    /// or the action's own error.
    pub fn execute(
        &self,
        name: &str,
        store: &dyn RecordStore,
        request: &BulkRequest,
    ) -> AdminResult<BulkActionResult> {
        let action = self
            .get_bulk_action(name)
            .ok_or_else(|| AdminError::NotFound(format!("bulk action '{name}'")))?;
        tracing::info!(
            action = name,
            class = %request.class_name,
            records = request.ids.len(),
            "running bulk action"
        );
        let result = action.execute(store, request)?;
        tracing::debug!(action = name, success = result.success, affected = result.affected.len(), "bulk action finished");
        Ok(result)
    }
}

impl Default for BulkManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GridComponent for BulkManager {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "BulkManager"
    }

    fn augment_columns(&self, _grid: &GridField, columns: &mut Vec<String>) {
        columns.insert(0, SELECT_COLUMN.to_string());
    }

    fn column_label(&self, _grid: &GridField, column: &str) -> Option<String> {
        (column == SELECT_COLUMN).then(String::new)
    }

    fn column_content(&self, _grid: &GridField, record: &Record, column: &str) -> Option<Value> {
        if column != SELECT_COLUMN {
            return None;
        }
        Some(json!({ "type": "checkbox", "value": record_id(record)? }))
    }

    fn fragments(&self, grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        let actions: Vec<Value> = self
            .actions
            .iter()
            .map(|a| {
                json!({
                    "name": a.name(),
                    "label": a.label(),
                    "url": grid.link(&format!("bulkAction/{}", a.name())),
                })
            })
            .collect();
        vec![Fragment::new(
            "header",
            json!({ "type": "bulkManager", "actions": actions }),
        )]
    }
}
