//! Standard grid components.

pub mod buttons;
pub mod data_columns;
pub mod filter_header;
pub mod pagination;
pub mod rows;
pub mod sortable_header;

pub use buttons::{
    GridFieldAddNewButton, GridFieldDeleteAction, GridFieldEditButton, GridFieldExportButton,
    GridFieldPrintButton, ACTIONS_COLUMN,
};
pub use data_columns::{CellFormatter, ColumnFormatter, GridFieldDataColumns};
pub use filter_header::{GridFieldFilterHeader, SearchContextHook, SearchFormHook, SEARCH_FORM_NAME};
pub use pagination::{
    effective_page_size, GridFieldConfigurablePaginator, GridFieldPageCount, GridFieldPaginator,
};
pub use rows::{GridFieldButtonRow, GridFieldSnippetRow, GridFieldToolbarHeader};
pub use sortable_header::GridFieldSortableHeader;
