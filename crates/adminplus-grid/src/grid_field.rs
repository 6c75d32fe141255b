//! The grid.

use serde_json::{json, Map, Value};

use adminplus_core::AdminResult;
use adminplus_db::{record_id, DataList, ModelClass, Record};
use adminplus_forms::Form;
use adminplus_http::QueryDict;

use crate::component::{ListStage, RenderContext};
use crate::config::GridFieldConfig;
use crate::state::GridState;

/// A record-listing grid.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use adminplus_db::{DataList, FieldType, ModelClass};
/// use adminplus_grid::{GridField, GridFieldConfig};
///
/// let model = Arc::new(ModelClass::new("app::Contact").field("Surname", FieldType::Varchar));
/// let grid = GridField::new("app-Contact", "Contacts", DataList::new(model, vec![]), GridFieldConfig::record_editor(15));
/// let rendered = grid.render().unwrap();
/// assert_eq!(rendered["total"], 0);
/// ```
#[derive(Debug)]
pub struct GridField {
    name: String,
    title: String,
    list: DataList,
    config: GridFieldConfig,
    state: GridState,
    form_name: Option<String>,
    form_action: Option<String>,
}

impl GridField {
    /// Creates a grid.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        list: DataList,
        config: GridFieldConfig,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            list,
            config,
            state: GridState::default(),
            form_name: None,
            form_action: None,
        }
    }

    /// Returns the grid name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the grid title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the unmanipulated list.
    pub const fn get_list(&self) -> &DataList {
        &self.list
    }

    /// Replaces the list.
    pub fn set_list(&mut self, list: DataList) {
        self.list = list;
    }

    /// Returns the model of the listed records.
    pub fn model(&self) -> &ModelClass {
        self.list.model()
    }

    /// Returns the configuration.
    pub const fn get_config(&self) -> &GridFieldConfig {
        &self.config
    }

    /// Returns the configuration mutably.
    pub fn get_config_mut(&mut self) -> &mut GridFieldConfig {
        &mut self.config
    }

    /// Returns the grid state.
    pub const fn state(&self) -> &GridState {
        &self.state
    }

    /// Returns the grid state mutably.
    pub fn state_mut(&mut self) -> &mut GridState {
        &mut self.state
    }

    /// Loads this grid's state from request parameters.
    pub fn load_state(&mut self, vars: &QueryDict) {
        self.state = GridState::from_vars(&self.name, vars);
    }

    /// Associates the grid with the form it is shown in. Links and search
    /// forms are built relative to the form's action.
    pub fn set_form(&mut self, form: &Form) {
        self.form_name = Some(form.name().to_string());
        self.form_action = Some(form.action().to_string());
    }

    /// Returns the name of the associated form.
    pub fn form_name(&self) -> Option<&str> {
        self.form_name.as_deref()
    }

    /// Returns the action of the associated form.
    pub fn form_action(&self) -> Option<&str> {
        self.form_action.as_deref()
    }

    /// Returns a link relative to the associated form's action.
    pub fn link(&self, action: &str) -> String {
        let base = self.form_action.as_deref().unwrap_or("").trim_end_matches('/');
        if action.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{}", action.trim_start_matches('/'))
        }
    }

    /// Returns the column names contributed by the components, in order.
    pub fn get_columns(&self) -> Vec<String> {
        let mut columns = Vec::new();
        for component in self.config.components() {
            component.augment_columns(self, &mut columns);
        }
        let mut seen = Vec::with_capacity(columns.len());
        columns.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(c.clone());
                true
            }
        });
        columns
    }

    /// Returns a column's label.
    pub fn column_label(&self, column: &str) -> String {
        self.config
            .components()
            .iter()
            .find_map(|c| c.column_label(self, column))
            .unwrap_or_else(|| self.model().field_label(column))
    }

    /// Returns the content of one cell. When several components fill the
    /// same column their contents are collected into an array.
    pub fn column_content(&self, record: &Record, column: &str) -> Value {
        let mut values: Vec<Value> = self
            .config
            .components()
            .iter()
            .filter_map(|c| c.column_content(self, record, column))
            .collect();
        match values.len() {
            0 => Value::Null,
            1 => values.swap_remove(0),
            _ => Value::Array(values),
        }
    }

    fn apply_stage(&self, mut list: DataList, stage: ListStage) -> AdminResult<DataList> {
        for component in self.config.components() {
            if component.list_stage() == stage {
                list = component.manipulate_list(self, list)?;
            }
        }
        Ok(list)
    }

    /// Returns the list after filtering and sorting, before paging.
    pub fn get_filtered_list(&self) -> AdminResult<DataList> {
        let list = self.apply_stage(self.list.clone(), ListStage::Filter)?;
        self.apply_stage(list, ListStage::Sort)
    }

    /// Returns the rows of the current page.
    pub fn get_manipulated_list(&self) -> AdminResult<DataList> {
        let list = self.get_filtered_list()?;
        self.apply_stage(list, ListStage::Page)
    }

    /// Renders the grid as JSON: columns, the current page of rows, the
    /// component fragments keyed by region, the total row count, and the state.
    pub fn render(&self) -> AdminResult<Value> {
        let filtered = self.get_filtered_list()?;
        let total = filtered.count();
        let page = self.apply_stage(filtered, ListStage::Page)?;
        let ctx = RenderContext {
            total_items: total,
            page_items: page.count(),
        };

        let columns = self.get_columns();
        let rows: Vec<Value> = page
            .iter()
            .map(|record| {
                let cells: Map<String, Value> = columns
                    .iter()
                    .map(|c| (c.clone(), self.column_content(record, c)))
                    .collect();
                json!({ "ID": record_id(record), "cells": cells })
            })
            .collect();

        let mut fragments = Map::new();
        for component in self.config.components() {
            for fragment in component.fragments(self, &ctx) {
                let slot = fragments
                    .entry(fragment.target)
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(items) = slot {
                    items.push(fragment.content);
                }
            }
        }

        tracing::debug!(grid = %self.name, total, rows = rows.len(), "rendered grid");

        Ok(json!({
            "name": self.name,
            "title": self.title,
            "columns": columns
                .iter()
                .map(|c| json!({ "name": c, "label": self.column_label(c) }))
                .collect::<Vec<_>>(),
            "rows": rows,
            "fragments": fragments,
            "total": total,
            "state": self.state.to_value(),
        }))
    }
}
