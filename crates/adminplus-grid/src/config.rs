//! Grid configuration: an ordered set of components.

use std::fmt;

use crate::component::GridComponent;
use crate::components::{
    GridFieldAddNewButton, GridFieldButtonRow, GridFieldDataColumns, GridFieldDeleteAction,
    GridFieldEditButton, GridFieldFilterHeader, GridFieldPageCount, GridFieldPaginator,
    GridFieldSortableHeader, GridFieldToolbarHeader,
};

/// The components of a grid, in order.
///
/// Components are addressed by their concrete type.
///
/// # Examples
///
/// ```
/// use adminplus_grid::{GridFieldConfig, GridFieldConfigurablePaginator, GridFieldPaginator};
///
/// let mut config = GridFieldConfig::record_editor(15);
/// config
///     .remove_components_by_type::<GridFieldPaginator>()
///     .add_component(GridFieldConfigurablePaginator::new(15, vec![15, 30]));
///
/// assert!(config.get_component_by_type::<GridFieldPaginator>().is_none());
/// assert_eq!(config.count_by_type::<GridFieldConfigurablePaginator>(), 1);
/// ```
#[derive(Default)]
pub struct GridFieldConfig {
    components: Vec<Box<dyn GridComponent>>,
}

impl GridFieldConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard set for listing and editing records: button row, add
    /// button, toolbar header, sortable and filter headers, data columns,
    /// edit and delete row actions, page count and paginator.
    pub fn record_editor(items_per_page: usize) -> Self {
        let mut config = Self::new();
        config
            .add_component(GridFieldButtonRow::new("before"))
            .add_component(GridFieldAddNewButton::new("buttons-before-left"))
            .add_component(GridFieldToolbarHeader::new())
            .add_component(GridFieldSortableHeader::new())
            .add_component(GridFieldFilterHeader::new())
            .add_component(GridFieldDataColumns::new())
            .add_component(GridFieldEditButton::new())
            .add_component(GridFieldDeleteAction::new(false))
            .add_component(GridFieldPageCount::new("toolbar-header-right"))
            .add_component(GridFieldPaginator::new(items_per_page));
        config
    }

    /// Appends a component.
    pub fn add_component<C: GridComponent>(&mut self, component: C) -> &mut Self {
        self.components.push(Box::new(component));
        self
    }

    /// Appends a boxed component.
    pub fn add_boxed_component(&mut self, component: Box<dyn GridComponent>) -> &mut Self {
        self.components.push(component);
        self
    }

    /// Inserts a component before the first component of type `T`, or appends
    /// it when there is none.
    pub fn add_component_before<T: GridComponent, C: GridComponent>(
        &mut self,
        component: C,
    ) -> &mut Self {
        let position = self.components.iter().position(|c| c.as_any().is::<T>());
        match position {
            Some(index) => self.components.insert(index, Box::new(component)),
            None => self.components.push(Box::new(component)),
        }
        self
    }

    /// Removes every component of type `T`.
    pub fn remove_components_by_type<T: GridComponent>(&mut self) -> &mut Self {
        self.components.retain(|c| !c.as_any().is::<T>());
        self
    }

    /// Returns the first component of type `T`.
    pub fn get_component_by_type<T: GridComponent>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| c.as_any().downcast_ref::<T>())
    }

    /// Returns the first component of type `T`, mutably.
    pub fn get_component_by_type_mut<T: GridComponent>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Returns every component of type `T`.
    pub fn get_components_by_type<T: GridComponent>(&self) -> Vec<&T> {
        self.components
            .iter()
            .filter_map(|c| c.as_any().downcast_ref::<T>())
            .collect()
    }

    /// Returns how many components of type `T` are present.
    pub fn count_by_type<T: GridComponent>(&self) -> usize {
        self.components
            .iter()
            .filter(|c| c.as_any().is::<T>())
            .count()
    }

    /// Returns the components in order.
    pub fn components(&self) -> &[Box<dyn GridComponent>] {
        &self.components
    }

    /// Returns the component names in order.
    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.component_name()).collect()
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if there are no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for GridFieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridFieldConfig")
            .field("components", &self.component_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{GridFieldConfigurablePaginator, GridFieldSnippetRow};

    #[test]
    fn test_record_editor_order() {
        let config = GridFieldConfig::record_editor(15);
        assert_eq!(
            config.component_names(),
            vec![
                "ButtonRow",
                "AddNewButton",
                "ToolbarHeader",
                "SortableHeader",
                "FilterHeader",
                "DataColumns",
                "EditButton",
                "DeleteAction",
                "PageCount",
                "Paginator",
            ]
        );
    }

    #[test]
    fn test_add_component_before() {
        let mut config = GridFieldConfig::record_editor(15);
        config.add_component_before::<GridFieldButtonRow, _>(GridFieldSnippetRow::new());
        assert_eq!(&config.component_names()[..2], &["SnippetRow", "ButtonRow"]);
    }

    #[test]
    fn test_add_component_before_missing_appends() {
        let mut config = GridFieldConfig::new();
        config.add_component_before::<GridFieldButtonRow, _>(GridFieldSnippetRow::new());
        assert_eq!(config.component_names(), vec!["SnippetRow"]);
    }

    #[test]
    fn test_remove_then_add_leaves_one() {
        let mut config = GridFieldConfig::record_editor(15);
        config.add_component(GridFieldPaginator::new(30));
        assert_eq!(config.count_by_type::<GridFieldPaginator>(), 2);
        config
            .remove_components_by_type::<GridFieldPaginator>()
            .add_component(GridFieldConfigurablePaginator::new(15, vec![15]));
        assert_eq!(config.count_by_type::<GridFieldPaginator>(), 0);
        assert_eq!(config.count_by_type::<GridFieldConfigurablePaginator>(), 1);
    }

    #[test]
    fn test_get_component_by_type_mut() {
        let mut config = GridFieldConfig::record_editor(15);
        config
            .get_component_by_type_mut::<GridFieldPaginator>()
            .unwrap()
            .set_items_per_page(50);
        assert_eq!(
            config
                .get_component_by_type::<GridFieldPaginator>()
                .unwrap()
                .items_per_page(),
            50
        );
        assert_eq!(config.get_components_by_type::<GridFieldDataColumns>().len(), 1);
    }
}
