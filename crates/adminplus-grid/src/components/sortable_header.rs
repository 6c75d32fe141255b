//! Sortable column headings.

use std::any::Any;

use serde_json::json;

use adminplus_core::AdminResult;
use adminplus_db::DataList;

use crate::component::{Fragment, GridComponent, ListStage, RenderContext};
use crate::grid_field::GridField;

/// Sorts the list by the column chosen in the grid state, falling back to the
/// model's default sort. Only model fields can be sorted on.
#[derive(Debug, Clone, Default)]
pub struct GridFieldSortableHeader;

impl GridFieldSortableHeader {
    /// Creates the header.
    pub const fn new() -> Self {
        Self
    }

    fn sortable_columns(grid: &GridField) -> Vec<String> {
        grid.get_columns()
            .into_iter()
            .filter(|c| grid.model().field_type(c).is_some())
            .collect()
    }
}

impl GridComponent for GridFieldSortableHeader {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "SortableHeader"
    }

    fn list_stage(&self) -> ListStage {
        ListStage::Sort
    }

    fn manipulate_list(&self, grid: &GridField, list: DataList) -> AdminResult<DataList> {
        if let Some((column, descending)) = grid.state().sort() {
            if grid.model().field_type(&column).is_some() {
                return Ok(list.sort(&column, descending));
            }
            tracing::debug!(column = %column, "ignoring sort on unknown column");
        }
        Ok(match &grid.model().default_sort {
            Some(spec) => list.sort_spec(spec),
            None => list,
        })
    }

    fn fragments(&self, grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        let current = grid.state().sort().map(|(column, descending)| {
            json!({ "column": column, "direction": if descending { "desc" } else { "asc" } })
        });
        vec![Fragment::new(
            "header",
            json!({
                "type": "sortableHeader",
                "sortable": Self::sortable_columns(grid),
                "current": current,
            }),
        )]
    }
}
