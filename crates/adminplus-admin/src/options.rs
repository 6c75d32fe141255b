//! Options read once from [`Settings`] and shared by every request.

use std::collections::HashMap;
use std::sync::Arc;

use adminplus_core::{Settings, SnippetEntry};
use adminplus_db::RecordStore;

use crate::extensions::AdminExtensions;
use crate::snippets::SnippetRegistry;

/// Module whose presence adds the CMS localisation requirement.
pub const CMS_MODULE: &str = "cms";

/// `ModelAdminPlus` options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPlusOptions {
    /// URL prefix every admin is mounted under.
    pub admin_url: String,
    /// Format date and datetime grid columns as short dates.
    pub auto_convert_dates: bool,
    /// Carried from configuration; nothing reads it.
    pub convert_to_autocomplete: bool,
    /// Configured snippets.
    pub registered_snippets: Vec<SnippetEntry>,
    /// `chrono` format of date columns.
    pub date_format: String,
    /// `chrono` format of datetime columns.
    pub datetime_format: String,
    /// Default rows per page.
    pub items_per_page: usize,
    /// Page sizes the user can pick.
    pub page_sizes: Vec<usize>,
    /// Configured export columns per model class.
    pub export_fields: HashMap<String, Vec<(String, String)>>,
    /// Whether the CMS module is installed.
    pub cms_installed: bool,
}

impl AdminPlusOptions {
    /// Reads the options from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let plus = &settings.model_admin_plus;
        let export_fields = settings
            .models
            .iter()
            .filter_map(|(class, model)| {
                let fields = model.export_fields.as_ref()?;
                Some((class.clone(), fields.iter().map(|f| f.to_pair()).collect()))
            })
            .collect();
        Self {
            admin_url: settings.admin_url.clone(),
            auto_convert_dates: plus.auto_convert_dates,
            convert_to_autocomplete: plus.convert_to_autocomplete,
            registered_snippets: plus.registered_snippets.clone(),
            date_format: plus.date_format.clone(),
            datetime_format: plus.datetime_format.clone(),
            items_per_page: plus.items_per_page,
            page_sizes: plus.page_sizes.clone(),
            export_fields,
            cms_installed: settings.module_exists(CMS_MODULE),
        }
    }

    /// Returns the configured export columns of a model class.
    pub fn export_fields_for(&self, class_name: &str) -> Option<&[(String, String)]> {
        self.export_fields.get(class_name).map(Vec::as_slice)
    }
}

impl Default for AdminPlusOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Everything a request's admin shares with the rest of the site.
#[derive(Debug)]
pub struct AdminContext {
    /// The options.
    pub options: AdminPlusOptions,
    /// Record storage.
    pub store: Arc<dyn RecordStore>,
    /// Extension hooks.
    pub extensions: AdminExtensions,
    /// Snippet constructors.
    pub snippets: SnippetRegistry,
}

impl AdminContext {
    /// Creates a context with the built-in snippets and no hooks.
    pub fn new(options: AdminPlusOptions, store: Arc<dyn RecordStore>) -> Self {
        Self {
            options,
            store,
            extensions: AdminExtensions::new(),
            snippets: SnippetRegistry::with_builtins(),
        }
    }

    /// Replaces the hooks.
    #[must_use]
    pub fn with_extensions(mut self, extensions: AdminExtensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// Replaces the snippet registry.
    #[must_use]
    pub fn with_snippets(mut self, snippets: SnippetRegistry) -> Self {
        self.snippets = snippets;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminplus_core::{ExportFieldSetting, ModelSettings};

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.installed_modules.push("cms".into());
        settings.model_admin_plus.auto_convert_dates = false;
        settings.models.insert(
            "app::Contact".into(),
            ModelSettings {
                export_fields: Some(vec![
                    ExportFieldSetting::Column("Email".into()),
                    ExportFieldSetting::Labelled {
                        field: "FirstName".into(),
                        label: "Given name".into(),
                    },
                ]),
            },
        );
        settings.models.insert("app::Company".into(), ModelSettings::default());

        let options = AdminPlusOptions::from_settings(&settings);
        assert!(options.cms_installed);
        assert!(!options.auto_convert_dates);
        assert_eq!(
            options.export_fields_for("app::Contact").unwrap(),
            &[
                ("Email".to_string(), "Email".to_string()),
                ("FirstName".to_string(), "Given name".to_string())
            ]
        );
        assert!(options.export_fields_for("app::Company").is_none());
    }

    #[test]
    fn test_defaults() {
        let options = AdminPlusOptions::default();
        assert_eq!(options.admin_url, "/admin");
        assert!(!options.cms_installed);
        assert!(options.convert_to_autocomplete);
    }
}
