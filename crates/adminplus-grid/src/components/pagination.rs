//! Paging: the fixed-size paginator, the configurable paginator that lets the
//! user pick a page size, and the page count shown in the toolbar.

use std::any::Any;

use serde_json::json;

use adminplus_core::AdminResult;
use adminplus_db::DataList;

use crate::component::{Fragment, GridComponent, ListStage, RenderContext};
use crate::grid_field::GridField;

/// The visible window of a paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageWindow {
    page: usize,
    total_pages: usize,
    offset: usize,
}

/// Clamps the requested page to the pages that exist. An empty list has one
/// (empty) page.
fn page_window(total_items: usize, requested: usize, per_page: usize) -> PageWindow {
    let per_page = per_page.max(1);
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = requested.clamp(1, total_pages);
    PageWindow {
        page,
        total_pages,
        offset: (page - 1) * per_page,
    }
}

fn paginate(grid: &GridField, list: &DataList, per_page: usize) -> DataList {
    let window = page_window(list.count(), grid.state().current_page(), per_page);
    list.limit(window.offset, per_page)
}

fn footer(grid: &GridField, ctx: &RenderContext, per_page: usize) -> serde_json::Value {
    let window = page_window(ctx.total_items, grid.state().current_page(), per_page);
    json!({
        "type": "paginator",
        "currentPage": window.page,
        "totalPages": window.total_pages,
        "itemsPerPage": per_page,
        "totalItems": ctx.total_items,
    })
}

/// Returns the page size the grid's paginator applies, if it has one.
pub fn effective_page_size(grid: &GridField) -> Option<usize> {
    let config = grid.get_config();
    config
        .get_component_by_type::<GridFieldConfigurablePaginator>()
        .map(|p| p.current_page_size(grid))
        .or_else(|| {
            config
                .get_component_by_type::<GridFieldPaginator>()
                .map(GridFieldPaginator::items_per_page)
        })
}

/// Pages the list with a fixed page size.
#[derive(Debug, Clone)]
pub struct GridFieldPaginator {
    items_per_page: usize,
}

impl GridFieldPaginator {
    /// Creates a paginator.
    pub const fn new(items_per_page: usize) -> Self {
        Self { items_per_page }
    }

    /// Returns the page size.
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Sets the page size.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page;
    }
}

impl GridComponent for GridFieldPaginator {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "Paginator"
    }

    fn list_stage(&self) -> ListStage {
        ListStage::Page
    }

    fn manipulate_list(&self, grid: &GridField, list: DataList) -> AdminResult<DataList> {
        Ok(paginate(grid, &list, self.items_per_page))
    }

    fn fragments(&self, grid: &GridField, ctx: &RenderContext) -> Vec<Fragment> {
        vec![Fragment::new("footer", footer(grid, ctx, self.items_per_page))]
    }
}

/// Pages the list with a page size the user picks from a fixed set.
///
/// The size comes from the grid state's `itemsPerPage` when it is one of the
/// offered sizes, otherwise the default applies.
#[derive(Debug, Clone)]
pub struct GridFieldConfigurablePaginator {
    items_per_page: usize,
    page_sizes: Vec<usize>,
}

impl GridFieldConfigurablePaginator {
    /// Creates a paginator with a default size and the sizes offered.
    pub fn new(items_per_page: usize, page_sizes: Vec<usize>) -> Self {
        Self {
            items_per_page,
            page_sizes,
        }
    }

    /// Returns the default page size.
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Returns the offered page sizes.
    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    /// Returns the page size in effect for a grid.
    pub fn current_page_size(&self, grid: &GridField) -> usize {
        grid.state()
            .items_per_page()
            .filter(|n| self.page_sizes.contains(n))
            .unwrap_or(self.items_per_page)
    }
}

impl GridComponent for GridFieldConfigurablePaginator {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "ConfigurablePaginator"
    }

    fn list_stage(&self) -> ListStage {
        ListStage::Page
    }

    fn manipulate_list(&self, grid: &GridField, list: DataList) -> AdminResult<DataList> {
        Ok(paginate(grid, &list, self.current_page_size(grid)))
    }

    fn fragments(&self, grid: &GridField, ctx: &RenderContext) -> Vec<Fragment> {
        let mut content = footer(grid, ctx, self.current_page_size(grid));
        content["type"] = json!("configurablePaginator");
        content["pageSizes"] = json!(self.page_sizes);
        vec![Fragment::new("footer", content)]
    }
}

/// "Showing 1-15 of 40" in the toolbar.
#[derive(Debug, Clone)]
pub struct GridFieldPageCount {
    target_fragment: String,
}

impl GridFieldPageCount {
    /// Creates the page count in `target_fragment`.
    pub fn new(target_fragment: impl Into<String>) -> Self {
        Self {
            target_fragment: target_fragment.into(),
        }
    }
}

impl GridComponent for GridFieldPageCount {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "PageCount"
    }

    fn fragments(&self, grid: &GridField, ctx: &RenderContext) -> Vec<Fragment> {
        let (first, last) = match effective_page_size(grid) {
            _ if ctx.total_items == 0 => (0, 0),
            Some(per_page) => {
                let window = page_window(ctx.total_items, grid.state().current_page(), per_page);
                (window.offset + 1, window.offset + ctx.page_items)
            }
            None => (1, ctx.total_items),
        };
        vec![Fragment::new(
            self.target_fragment.clone(),
            json!({ "type": "pageCount", "first": first, "last": last, "total": ctx.total_items }),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_clamps() {
        assert_eq!(
            page_window(40, 9, 15),
            PageWindow { page: 3, total_pages: 3, offset: 30 }
        );
        assert_eq!(
            page_window(0, 2, 15),
            PageWindow { page: 1, total_pages: 1, offset: 0 }
        );
        assert_eq!(page_window(15, 1, 15).total_pages, 1);
        assert_eq!(page_window(16, 2, 0).offset, 1);
    }
}
