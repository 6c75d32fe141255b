//! The filter header: a search form above the grid that narrows the list.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::json;

use adminplus_core::AdminResult;
use adminplus_db::DataList;
use adminplus_forms::Form;

use crate::component::{Fragment, GridComponent, ListStage, RenderContext};
use crate::grid_field::GridField;
use crate::search_context::SearchContext;

/// Called with the search context after the header builds it.
pub type SearchContextHook = Arc<dyn Fn(&mut SearchContext) + Send + Sync>;

/// Called with the search form after the header builds it.
pub type SearchFormHook = Arc<dyn Fn(&mut Form) + Send + Sync>;

/// Name of the search form.
pub const SEARCH_FORM_NAME: &str = "SearchForm";

/// Filters the list by the criteria in the grid state's
/// `GridFieldFilterHeader.Columns`, and renders the search form.
#[derive(Clone, Default)]
pub struct GridFieldFilterHeader {
    update_search_context: Option<SearchContextHook>,
    update_search_form: Option<SearchFormHook>,
}

impl GridFieldFilterHeader {
    /// Creates a header without hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header that passes its search context and search form
    /// through the given hooks.
    pub fn with_hooks(context_hook: SearchContextHook, form_hook: SearchFormHook) -> Self {
        Self {
            update_search_context: Some(context_hook),
            update_search_form: Some(form_hook),
        }
    }

    /// Returns whether hooks are attached.
    pub const fn has_hooks(&self) -> bool {
        self.update_search_context.is_some() || self.update_search_form.is_some()
    }

    /// Builds the search context of the grid's model.
    pub fn get_search_context(&self, grid: &GridField) -> SearchContext {
        let mut context = SearchContext::for_model(grid.get_list().model_arc());
        if let Some(hook) = &self.update_search_context {
            hook(&mut context);
        }
        context
    }

    /// Builds the search form from the search context, pre-populated with the
    /// grid state's criteria. Returns `None` when the context has no fields.
    pub fn get_search_form(&self, grid: &GridField) -> Option<Form> {
        let context = self.get_search_context(grid);
        if context.get_fields().is_empty() {
            return None;
        }

        let mut form = Form::new(SEARCH_FORM_NAME, grid.link(""))
            .with_fields(context.get_fields().clone());
        form.load_data_from(&grid.state().filter_columns());
        form.enable_suggestions(&grid.link(""));

        if let Some(hook) = &self.update_search_form {
            hook(&mut form);
        }
        Some(form)
    }
}

impl fmt::Debug for GridFieldFilterHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridFieldFilterHeader")
            .field("update_search_context", &self.update_search_context.is_some())
            .field("update_search_form", &self.update_search_form.is_some())
            .finish()
    }
}

impl GridComponent for GridFieldFilterHeader {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "FilterHeader"
    }

    fn list_stage(&self) -> ListStage {
        ListStage::Filter
    }

    fn manipulate_list(&self, grid: &GridField, list: DataList) -> AdminResult<DataList> {
        let criteria = grid.state().filter_columns();
        if criteria.is_empty() {
            return Ok(list);
        }
        let context = self.get_search_context(grid);
        tracing::debug!(grid = %grid.name(), criteria = criteria.len(), "applying filter header");
        Ok(context.get_results(&list, &criteria))
    }

    fn fragments(&self, grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        let Some(form) = self.get_search_form(grid) else {
            return Vec::new();
        };
        vec![Fragment::new(
            "header",
            json!({
                "type": "filterHeader",
                "active": !grid.state().filter_columns().is_empty(),
                "form": form.to_json(),
            }),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridFieldConfig;
    use adminplus_db::lookup::Lookup;
    use adminplus_db::{FieldType, ModelClass};
    use adminplus_forms::{AutoCompleteSource, FormField};
    use serde_json::{json, Map, Value};

    fn grid(header: GridFieldFilterHeader) -> GridField {
        let model = Arc::new(
            ModelClass::new("app::Contact")
                .field("Surname", FieldType::Varchar)
                .field("Email", FieldType::Varchar),
        );
        let records = [
            json!({"ID": 1, "Surname": "Smith", "Email": "a@example.com"}),
            json!({"ID": 2, "Surname": "Jones", "Email": "b@example.com"}),
            json!({"ID": 3, "Surname": "Smithers", "Email": "c@example.org"}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
        let mut config = GridFieldConfig::new();
        config.add_component(header);
        let mut grid = GridField::new("app-Contact", "Contacts", DataList::new(model, records), config);
        grid.set_form(&Form::new("EditForm", "/admin/contacts/app-Contact"));
        grid
    }

    fn criteria(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_filters_by_state_columns() {
        let mut grid = grid(GridFieldFilterHeader::new());
        assert_eq!(grid.get_filtered_list().unwrap().count(), 3);
        grid.state_mut().set_filter_columns(criteria(json!({"Surname": "smith"})));
        assert_eq!(grid.get_filtered_list().unwrap().ids(), vec!["1", "3"]);
    }

    #[test]
    fn test_search_form_prepopulated() {
        let mut grid = grid(GridFieldFilterHeader::new());
        grid.state_mut().set_filter_columns(criteria(json!({"Email": ".org"})));
        let header = GridFieldFilterHeader::new();
        let form = header.get_search_form(&grid).unwrap();
        assert_eq!(form.name(), SEARCH_FORM_NAME);
        assert_eq!(form.action(), "/admin/contacts/app-Contact");
        assert_eq!(form.field_by_name("Email").unwrap().value_text(), ".org");
    }

    #[test]
    fn test_hooks_run() {
        let context_hook: SearchContextHook = Arc::new(|context: &mut SearchContext| {
            context.remove_field_by_name("Email");
            let list = DataList::new(
                Arc::new(context.model().clone()),
                Vec::new(),
            );
            let source = AutoCompleteSource::new(list, "Surname");
            context.add_field(FormField::autocomplete("Surname", source), Lookup::StartsWith);
        });
        let form_hook: SearchFormHook = Arc::new(|form: &mut Form| {
            form.fields_mut().push(FormField::text("Extra"));
        });
        let header = GridFieldFilterHeader::with_hooks(context_hook, form_hook);
        assert!(header.has_hooks());

        let mut grid = grid(header.clone());
        let form = header.get_search_form(&grid).unwrap();
        assert_eq!(form.fields().names(), vec!["Surname", "Extra"]);
        assert_eq!(
            form.field_by_name("Surname").unwrap().suggest_url.as_deref(),
            Some("/admin/contacts/app-Contact/suggest/Surname")
        );

        grid.state_mut().set_filter_columns(criteria(json!({"Surname": "Smith"})));
        assert_eq!(grid.get_filtered_list().unwrap().ids(), vec!["1", "3"]);
    }

    #[test]
    fn test_fragment() {
        let grid = grid(GridFieldFilterHeader::new());
        let rendered = grid.render().unwrap();
        let header = &rendered["fragments"]["header"][0];
        assert_eq!(header["type"], "filterHeader");
        assert_eq!(header["active"], false);
    }
}
