//! The grid component trait.
//!
//! Components are stored as `Box<dyn GridComponent>` and found again by their
//! concrete type through [`GridComponent::as_any`]. Every hook has a no-op
//! default, so a component implements only what it contributes.

use std::any::Any;

use serde::Serialize;
use serde_json::Value;

use adminplus_core::AdminResult;
use adminplus_db::{DataList, Record};

use crate::grid_field::GridField;

/// When a component's list manipulation runs.
///
/// Filtering runs before sorting, sorting before paging, whatever order the
/// components were added in. The total row count is taken after sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListStage {
    /// Narrows the list.
    Filter,
    /// Orders the list.
    Sort,
    /// Cuts the list to one page.
    Page,
}

/// Figures a component may need while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderContext {
    /// Rows in the list after filtering, before paging.
    pub total_items: usize,
    /// Rows on the rendered page.
    pub page_items: usize,
}

/// Content a component places into a named region of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    /// The region, e.g. `header`, `footer`, `buttons-before-left`.
    pub target: String,
    /// The rendered content.
    pub content: Value,
}

impl Fragment {
    /// Creates a fragment.
    pub fn new(target: impl Into<String>, content: Value) -> Self {
        Self {
            target: target.into(),
            content,
        }
    }
}

/// A pluggable part of a grid.
pub trait GridComponent: Any + Send + Sync {
    /// Returns `self` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` for mutable downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// A short name used in logs and rendered output.
    fn component_name(&self) -> &'static str;

    /// Adds the columns this component handles.
    fn augment_columns(&self, _grid: &GridField, _columns: &mut Vec<String>) {}

    /// Returns the label of a column this component handles.
    fn column_label(&self, _grid: &GridField, _column: &str) -> Option<String> {
        None
    }

    /// Returns the cell content of a column this component handles.
    fn column_content(&self, _grid: &GridField, _record: &Record, _column: &str) -> Option<Value> {
        None
    }

    /// The stage at which [`GridComponent::manipulate_list`] runs.
    fn list_stage(&self) -> ListStage {
        ListStage::Filter
    }

    /// Narrows, sorts or pages the list.
    fn manipulate_list(&self, _grid: &GridField, list: DataList) -> AdminResult<DataList> {
        Ok(list)
    }

    /// Returns the fragments this component renders.
    fn fragments(&self, _grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        Vec::new()
    }
}

/// Converts a boxed component of a more specific trait into a plain component.
///
/// Implemented for every sized [`GridComponent`], so traits extending
/// `GridComponent + IntoGridComponent` can hand their trait objects to a
/// [`GridFieldConfig`](crate::GridFieldConfig).
pub trait IntoGridComponent {
    /// Boxes `self` as a [`GridComponent`].
    fn into_grid_component(self: Box<Self>) -> Box<dyn GridComponent>;
}

impl<T: GridComponent> IntoGridComponent for T {
    fn into_grid_component(self: Box<Self>) -> Box<dyn GridComponent> {
        self
    }
}
