//! The base model admin.
//!
//! A [`ModelAdmin`] is mounted at `<admin_url>/<url_segment>` and manages one
//! or more model classes. It supplies the defaults that
//! [`ModelAdminPlus`](crate::plus::ModelAdminPlus) builds on: links, the
//! default grid configuration, the default export columns and the edit form.

use serde::{Deserialize, Serialize};

use adminplus_core::utils::text::sanitise_class_name;
use adminplus_db::ModelClass;
use adminplus_forms::Form;
use adminplus_grid::{GridFieldConfig, GridFieldExportButton, GridFieldPrintButton};

/// Name of the form a grid is shown in.
pub const EDIT_FORM_NAME: &str = "EditForm";

/// Fragment the export and print buttons render into.
pub const BUTTONS_FRAGMENT: &str = "buttons-before-left";

/// Configuration of one admin section.
///
/// # Examples
///
/// ```
/// use adminplus_admin::model_admin::ModelAdmin;
///
/// let admin = ModelAdmin::new("contacts")
///     .menu_title("Contacts")
///     .manage("app::Contact");
///
/// assert_eq!(admin.link("/admin", "app-Contact"), "/admin/contacts/app-Contact");
/// assert_eq!(admin.managed_class("app-Contact"), Some("app::Contact"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAdmin {
    /// URL segment under the admin URL.
    pub url_segment: String,
    /// Title shown in the admin menu.
    pub menu_title: String,
    /// Model classes this admin manages, in menu order.
    pub managed_models: Vec<String>,
    /// Rows per grid page. `None` uses the site default.
    pub items_per_page: Option<usize>,
}

impl ModelAdmin {
    /// Creates an admin at `url_segment` managing no models.
    pub fn new(url_segment: impl Into<String>) -> Self {
        let url_segment = url_segment.into();
        Self {
            menu_title: url_segment.clone(),
            url_segment,
            managed_models: Vec::new(),
            items_per_page: None,
        }
    }

    /// Sets the menu title.
    #[must_use]
    pub fn menu_title(mut self, title: impl Into<String>) -> Self {
        self.menu_title = title.into();
        self
    }

    /// Adds a managed model class.
    #[must_use]
    pub fn manage(mut self, class_name: impl Into<String>) -> Self {
        self.managed_models.push(class_name.into());
        self
    }

    /// Sets the rows per grid page.
    #[must_use]
    pub const fn items_per_page(mut self, count: usize) -> Self {
        self.items_per_page = Some(count);
        self
    }

    /// Resolves a URL model segment to a managed class name. The segment may
    /// be the class name itself or its sanitised form.
    pub fn managed_class(&self, model_segment: &str) -> Option<&str> {
        self.managed_models
            .iter()
            .find(|m| *m == model_segment || sanitise_class_name(m) == model_segment)
            .map(String::as_str)
    }

    /// Returns the URL of an action under this admin.
    pub fn link(&self, admin_url: &str, action: &str) -> String {
        let base = format!(
            "{}/{}",
            admin_url.trim_end_matches('/'),
            self.url_segment.trim_matches('/')
        );
        if action.is_empty() {
            base
        } else {
            format!("{base}/{}", action.trim_start_matches('/'))
        }
    }

    /// The export columns used when a model configures none: its summary
    /// fields with their labels.
    pub fn default_export_fields(model: &ModelClass) -> Vec<(String, String)> {
        model.summary_field_labels()
    }

    /// The default grid: the record editor set plus export and print buttons.
    pub fn get_grid_field_config(
        &self,
        default_items_per_page: usize,
        export_fields: &[(String, String)],
    ) -> GridFieldConfig {
        let mut config =
            GridFieldConfig::record_editor(self.items_per_page.unwrap_or(default_items_per_page));
        let mut export = GridFieldExportButton::new(BUTTONS_FRAGMENT);
        export.set_export_columns(export_fields.to_vec());
        config
            .add_component(export)
            .add_component(GridFieldPrintButton::new(BUTTONS_FRAGMENT));
        config
    }

    /// The form a model's grid is shown in. Its action is the model's
    /// listing URL.
    pub fn get_edit_form(&self, admin_url: &str, model_class: &str) -> Form {
        Form::new(
            EDIT_FORM_NAME,
            self.link(admin_url, &sanitise_class_name(model_class)),
        )
    }
}
