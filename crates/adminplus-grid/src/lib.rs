//! # adminplus-grid
//!
//! Record-listing grids. A [`GridField`] shows a [`DataList`](adminplus_db::DataList)
//! through a [`GridFieldConfig`]: an ordered set of [`GridComponent`]s that
//! add columns, narrow or page the list, and contribute fragments (button rows,
//! headers, paginators) to the rendered grid. Grids render to JSON.
//!
//! ## Modules
//!
//! - [`component`] - The component trait and render types
//! - [`config`] - [`GridFieldConfig`], add/remove/find components by type
//! - [`grid_field`] - [`GridField`]
//! - [`state`] - [`GridState`], the per-grid state sent by the client
//! - [`search_context`] - [`SearchContext`], search fields and default query of a model
//! - [`components`] - Standard components
//! - [`bulk`] - [`BulkManager`] and bulk actions
//! - [`date_finder`] - Short-date formatting for date columns

pub mod bulk;
pub mod component;
pub mod components;
pub mod config;
pub mod date_finder;
pub mod grid_field;
pub mod search_context;
pub mod state;

pub use bulk::{BulkAction, BulkActionResult, BulkManager, BulkRequest};
pub use component::{Fragment, GridComponent, IntoGridComponent, ListStage, RenderContext};
pub use components::{
    ColumnFormatter, GridFieldAddNewButton, GridFieldButtonRow, GridFieldConfigurablePaginator,
    GridFieldDataColumns, GridFieldDeleteAction, GridFieldEditButton, GridFieldExportButton,
    GridFieldFilterHeader, GridFieldPageCount, GridFieldPaginator, GridFieldPrintButton,
    GridFieldSnippetRow, GridFieldSortableHeader, GridFieldToolbarHeader, SearchContextHook,
    SearchFormHook,
};
pub use config::GridFieldConfig;
pub use date_finder::GridFieldDateFinder;
pub use grid_field::GridField;
pub use search_context::SearchContext;
pub use state::GridState;
