//! `ModelAdminPlus`: the per-request admin.
//!
//! One [`ModelAdminPlus`] is built for each request to a model's admin pages.
//! It owns the request and its session, decides whether the user is actively
//! filtering, keeps the user's search criteria in the session between
//! requests, and composes the grid: snippet row, configurable paginator,
//! bulk manager, a filter header wired to the extension hooks, and snippets.
//!
//! The search criteria applied to a listing come, in order of precedence,
//! from a POSTed `filter[...]` map, from the filter columns of the grid state,
//! and finally from the search stored in the session. The first two replace
//! the stored search.

use std::any::type_name;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use adminplus_core::utils::text::sanitise_class_name;
use adminplus_core::{AdminError, AdminResult};
use adminplus_db::DataList;
use adminplus_forms::Form;
use adminplus_grid::{
    BulkManager, BulkRequest, GridField, GridFieldButtonRow, GridFieldConfig,
    GridFieldConfigurablePaginator, GridFieldDateFinder, GridFieldFilterHeader, GridFieldPaginator,
    GridFieldSnippetRow, GridState, SearchContext, SearchContextHook, SearchFormHook,
};
use adminplus_http::{HttpRequest, HttpResponse, HttpResponseRedirect, JsonResponse, QueryDict};

use crate::model_admin::ModelAdmin;
use crate::options::AdminContext;
use crate::snippets::ModelAdminSnippet;

/// Localisation requirement added when the CMS module is installed.
pub const CMS_LANG_REQUIREMENT: &str = "cms/client/lang";

/// The bulk action removed from the grid's bulk manager.
pub const REMOVED_BULK_ACTION: &str = "unlink";

/// The admin handling one request for one managed model.
#[derive(Debug)]
pub struct ModelAdminPlus {
    admin: Arc<ModelAdmin>,
    context: Arc<AdminContext>,
    model_class: String,
    request: HttpRequest,
    final_list: Option<DataList>,
    requirements: Vec<String>,
}

impl ModelAdminPlus {
    /// Creates the admin for a request.
    pub fn new(
        admin: Arc<ModelAdmin>,
        context: Arc<AdminContext>,
        model_class: impl Into<String>,
        request: HttpRequest,
    ) -> Self {
        Self {
            admin,
            context,
            model_class: model_class.into(),
            request,
            final_list: None,
            requirements: Vec::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Returns the managed model class of this request.
    pub fn model_class(&self) -> &str {
        &self.model_class
    }

    /// Returns the model class as used in URLs and grid names.
    pub fn sanitised_model_class(&self) -> String {
        sanitise_class_name(&self.model_class)
    }

    /// Returns the base admin.
    pub fn admin(&self) -> &ModelAdmin {
        &self.admin
    }

    /// Returns the request.
    pub const fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Returns the request mutably.
    pub fn request_mut(&mut self) -> &mut HttpRequest {
        &mut self.request
    }

    /// Consumes the admin, returning the request (and with it the session).
    pub fn into_request(self) -> HttpRequest {
        self.request
    }

    /// Returns the client requirements collected by [`init`](Self::init).
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Returns the URL of an action under this admin.
    pub fn link(&self, action: &str) -> String {
        self.admin.link(&self.context.options.admin_url, action)
    }

    // ── Request lifecycle ────────────────────────────────────────────

    /// Prepares the request.
    ///
    /// Adds the CMS localisation requirement when the CMS module is installed,
    /// then fixes the final list: the whole list while the user is filtering
    /// or has a stored search, otherwise the list narrowed by the default
    /// search filter. A `clear=1` query clears the stored search and answers
    /// with a redirect to the listing.
    pub fn init(&mut self) -> AdminResult<Option<HttpResponse>> {
        if self.context.options.cms_installed
            && !self.requirements.iter().any(|r| r == CMS_LANG_REQUIREMENT)
        {
            self.requirements.push(CMS_LANG_REQUIREMENT.to_string());
        }

        let filtering = self.is_currently_filtering();
        let stored_search = self.has_stored_search();
        tracing::debug!(model = %self.model_class, filtering, stored_search, "initialising admin");
        self.final_list = Some(if filtering || stored_search {
            self.base_list()?
        } else {
            self.get_default_filtered_list()?
        });

        if self.request.get_vars().get("clear") == Some("1") {
            self.clear_search_session();
            let url = self.link(&self.sanitised_model_class());
            tracing::info!(model = %self.model_class, url = %url, "search cleared, redirecting");
            return Ok(Some(HttpResponseRedirect::new(&url)));
        }
        Ok(None)
    }

    /// Returns whether the request carries a search: a POSTed `filter`, or
    /// this model's grid state in the query or the POST body.
    pub fn is_currently_filtering(&self) -> bool {
        let get = self.request.get_vars();
        let post = self.request.post_vars();
        if get.is_empty() && post.is_empty() {
            return false;
        }
        if post.contains_root("filter") {
            return true;
        }
        let key = GridState::state_key(&self.sanitised_model_class());
        get.contains_key(&key) || post.contains_key(&key)
    }

    // ── Search session ───────────────────────────────────────────────

    /// Returns the session key of this model's stored search.
    pub fn get_search_session_name(&self) -> String {
        format!(
            "{}.{}",
            sanitise_class_name(type_name::<Self>()),
            self.sanitised_model_class()
        )
    }

    /// Returns the stored search as it is in the session.
    pub fn get_search_session(&self) -> Option<Value> {
        self.request
            .session()
            .get(&self.get_search_session_name())
            .cloned()
    }

    /// Replaces the stored search.
    pub fn set_search_session(&mut self, data: Map<String, Value>) {
        let name = self.get_search_session_name();
        self.request.session_mut().set(&name, Value::Object(data));
    }

    /// Removes the stored search.
    pub fn clear_search_session(&mut self) {
        let name = self.get_search_session_name();
        self.request.session_mut().remove(&name);
    }

    /// Returns the stored search. Anything but a mapping reads as empty.
    pub fn get_search_data(&self) -> Map<String, Value> {
        match self.get_search_session() {
            Some(Value::Object(data)) => data,
            _ => Map::new(),
        }
    }

    /// Returns whether the stored search has at least one non-blank criterion.
    pub fn has_stored_search(&self) -> bool {
        self.get_search_data()
            .values()
            .any(|v| !matches!(v, Value::Null) && v.as_str() != Some(""))
    }

    /// Returns the search criteria of this request, storing them when the
    /// request submitted them. A `filter` without any fields stores nothing.
    pub fn get_search_criteria(&mut self) -> Map<String, Value> {
        let mut submitted: Vec<(String, String)> =
            self.request.post_vars().nested("filter").into_iter().collect();
        if !submitted.is_empty() {
            submitted.sort();
            let criteria: Map<String, Value> = submitted
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            tracing::debug!(model = %self.model_class, criteria = criteria.len(), "storing posted search");
            self.set_search_session(criteria.clone());
            return criteria;
        }

        let state = GridState::from_vars(&self.sanitised_model_class(), self.grid_state_vars());
        if state.get("GridFieldFilterHeader", "Columns").is_some() {
            let criteria = state.filter_columns();
            tracing::debug!(model = %self.model_class, criteria = criteria.len(), "storing grid state search");
            self.set_search_session(criteria.clone());
            return criteria;
        }

        self.get_search_data()
    }

    // ── Lists ────────────────────────────────────────────────────────

    fn base_list(&self) -> AdminResult<DataList> {
        self.context.store.list(&self.model_class)
    }

    /// Returns the final list once [`init`](Self::init) has run, otherwise
    /// the whole list.
    pub fn get_list(&self) -> AdminResult<DataList> {
        match &self.final_list {
            Some(list) => Ok(list.clone()),
            None => self.base_list(),
        }
    }

    /// Returns the whole list narrowed by the default search filter.
    pub fn get_default_filtered_list(&self) -> AdminResult<DataList> {
        let list = self.base_list()?;
        let filter = self.get_default_search_filter()?;
        if filter.is_empty() {
            Ok(list)
        } else {
            list.filter(&filter)
        }
    }

    /// Returns the default query of the filter header's search context;
    /// empty when the grid has no filter header.
    pub fn get_default_search_filter(&self) -> AdminResult<Map<String, Value>> {
        let config = self.get_grid_field_config()?;
        let Some(header) = config.get_component_by_type::<GridFieldFilterHeader>() else {
            return Ok(Map::new());
        };
        let grid = GridField::new(
            self.sanitised_model_class(),
            self.grid_title()?,
            self.base_list()?,
            GridFieldConfig::new(),
        );
        Ok(header.get_search_context(&grid).get_default_query().clone())
    }

    // ── Grid ─────────────────────────────────────────────────────────

    /// Creates the configured snippets for this model, highest order first,
    /// and passes them through the `update_snippets` hooks.
    pub fn get_snippets(&self) -> AdminResult<Vec<Box<dyn ModelAdminSnippet>>> {
        let mut snippets = self.context.snippets.build(
            &self.context.options.registered_snippets,
            &self.model_class,
            GridFieldSnippetRow::FRAGMENT,
        )?;
        self.context.extensions.update_snippets.run(&mut snippets);
        Ok(snippets)
    }

    /// Returns the export `(field, label)` columns: the model's configured
    /// export fields, or the default, passed through the
    /// `update_export_fields` hooks.
    pub fn get_export_fields(&self) -> AdminResult<Vec<(String, String)>> {
        let mut fields = match self.context.options.export_fields_for(&self.model_class) {
            Some(configured) => configured.to_vec(),
            None => {
                let model = self.context.store.model(&self.model_class)?;
                ModelAdmin::default_export_fields(&model)
            }
        };
        self.context.extensions.update_export_fields.run(&mut fields);
        Ok(fields)
    }

    /// Builds the grid configuration.
    pub fn get_grid_field_config(&self) -> AdminResult<GridFieldConfig> {
        let options = &self.context.options;
        let export_fields = self.get_export_fields()?;
        let mut config = self
            .admin
            .get_grid_field_config(options.items_per_page, &export_fields);

        config.add_component_before::<GridFieldButtonRow, _>(GridFieldSnippetRow::new());

        let items_per_page = self.admin.items_per_page.unwrap_or(options.items_per_page);
        config
            .remove_components_by_type::<GridFieldPaginator>()
            .add_component(GridFieldConfigurablePaginator::new(
                items_per_page,
                options.page_sizes.clone(),
            ));

        let mut bulk_manager = BulkManager::new();
        bulk_manager.remove_bulk_action(REMOVED_BULK_ACTION);
        config.add_component(bulk_manager);

        if config.count_by_type::<GridFieldFilterHeader>() > 0 {
            config
                .remove_components_by_type::<GridFieldFilterHeader>()
                .add_component(GridFieldFilterHeader::with_hooks(
                    self.search_context_hook(),
                    self.search_form_hook(),
                ));
        }

        for snippet in self.get_snippets()? {
            config.add_boxed_component(snippet.into_grid_component());
        }
        Ok(config)
    }

    fn search_context_hook(&self) -> SearchContextHook {
        let context = Arc::clone(&self.context);
        Arc::new(move |search: &mut SearchContext| {
            context.extensions.update_search_context.run(search);
        })
    }

    fn search_form_hook(&self) -> SearchFormHook {
        let context = Arc::clone(&self.context);
        Arc::new(move |form: &mut Form| {
            context.extensions.update_search_form.run(form);
        })
    }

    fn grid_title(&self) -> AdminResult<String> {
        Ok(self.context.store.model(&self.model_class)?.short_name().to_string())
    }

    fn grid_state_vars(&self) -> &QueryDict {
        let key = GridState::state_key(&self.sanitised_model_class());
        if self.request.post_vars().contains_key(&key) {
            self.request.post_vars()
        } else {
            self.request.get_vars()
        }
    }

    /// Builds the grid over [`get_list`](Self::get_list), loads its state from
    /// the request, places it in the edit form and, when enabled, formats its
    /// date columns.
    pub fn get_grid_field(&self) -> AdminResult<GridField> {
        let mut grid = GridField::new(
            self.sanitised_model_class(),
            self.grid_title()?,
            self.get_list()?,
            self.get_grid_field_config()?,
        );
        grid.load_state(self.grid_state_vars());
        grid.set_form(&self.get_edit_form());

        let options = &self.context.options;
        if options.auto_convert_dates {
            GridFieldDateFinder::new(&mut grid)
                .convert_date_fields(&options.date_format, &options.datetime_format);
        }
        Ok(grid)
    }

    /// Returns the form the grid is shown in.
    pub fn get_edit_form(&self) -> Form {
        self.admin
            .get_edit_form(&self.context.options.admin_url, &self.model_class)
    }

    /// Builds the grid with this request's search criteria applied.
    fn searched_grid(&mut self) -> AdminResult<GridField> {
        let criteria = self.get_search_criteria();
        let mut grid = self.get_grid_field()?;
        grid.state_mut().set_filter_columns(criteria);
        Ok(grid)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Renders the listing: the grid as JSON plus the client requirements.
    pub fn listing(&mut self) -> AdminResult<HttpResponse> {
        let grid = self.searched_grid()?;
        let mut rendered = grid.render()?;
        rendered["requirements"] = json!(self.requirements);
        Ok(JsonResponse::new(&rendered))
    }

    /// Answers an autocomplete request for the search field named by the
    /// `n` route parameter. Fields without suggestions answer `[]`.
    pub fn suggest(&self) -> AdminResult<HttpResponse> {
        let name = self.request.param("n").unwrap_or_default();
        let mut grid = self.get_grid_field()?;
        grid.set_form(&self.get_edit_form());

        let response = grid
            .get_config()
            .get_component_by_type::<GridFieldFilterHeader>()
            .and_then(|header| header.get_search_form(&grid))
            .and_then(|form| form.field_by_name(name).and_then(|f| f.suggest(&self.request)));
        Ok(response.unwrap_or_else(|| {
            tracing::debug!(field = name, "no suggestions for field");
            JsonResponse::new(&Vec::<Value>::new())
        }))
    }

    /// Exports the searched list as JSON objects keyed by export label.
    pub fn export(&mut self) -> AdminResult<HttpResponse> {
        let fields = self.get_export_fields()?;
        let grid = self.searched_grid()?;
        let rows: Vec<Value> = grid
            .get_filtered_list()?
            .iter()
            .map(|record| {
                let row: Map<String, Value> = fields
                    .iter()
                    .map(|(field, label)| {
                        (label.clone(), record.get(field).cloned().unwrap_or(Value::Null))
                    })
                    .collect();
                Value::Object(row)
            })
            .collect();
        tracing::info!(model = %self.model_class, rows = rows.len(), "exported records");
        Ok(JsonResponse::new(&rows))
    }

    /// Runs a bulk action on the POSTed `records[]`.
    pub fn bulk_action(&self, action: &str) -> AdminResult<HttpResponse> {
        let config = self.get_grid_field_config()?;
        let manager = config
            .get_component_by_type::<BulkManager>()
            .ok_or_else(|| AdminError::NotFound("bulk actions".to_string()))?;
        let request = BulkRequest::from_post(&self.model_class, self.request.post_vars());
        let result = manager.execute(action, self.context.store.as_ref(), &request)?;
        Ok(JsonResponse::new(&result))
    }
}
