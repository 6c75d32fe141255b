//! Settings for modeladmin-plus.
//!
//! [`Settings`] holds the complete configuration with sensible defaults. It is
//! read once at startup (see [`settings_loader`](crate::settings_loader)) and
//! then passed explicitly into the admin site and its components.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An entry of the `registered_snippets` list.
///
/// A bare identifier applies to every managed model. A scoped entry only
/// applies when the admin is showing the named model class.
///
/// ```toml
/// [model_admin_plus]
/// registered_snippets = [
///     "record-count",
///     { model = "app::Contact", snippets = ["active-filters"] },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetEntry {
    /// A snippet shown for every managed model.
    Global(String),
    /// Snippets shown only for one managed model class.
    Scoped {
        /// The managed model class name.
        model: String,
        /// Snippet identifiers for that model.
        snippets: Vec<String>,
    },
}

/// A configured export column: either a bare field name (used as its own
/// label) or an explicit field/label pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportFieldSetting {
    /// A field exported under its own name.
    Column(String),
    /// A field exported under a custom label.
    Labelled {
        /// The record field.
        field: String,
        /// The column heading.
        label: String,
    },
}

impl ExportFieldSetting {
    /// Returns the `(field, label)` pair for this column.
    pub fn to_pair(&self) -> (String, String) {
        match self {
            Self::Column(name) => (name.clone(), name.clone()),
            Self::Labelled { field, label } => (field.clone(), label.clone()),
        }
    }
}

/// Per-model configuration, keyed by model class name in [`Settings::models`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Columns offered for export. `None` falls back to the model's summary fields.
    pub export_fields: Option<Vec<ExportFieldSetting>>,
}

/// Configuration of the `ModelAdminPlus` extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAdminPlusSettings {
    /// Render date and datetime grid columns with the short date format.
    pub auto_convert_dates: bool,
    /// Convert text search fields to autocomplete fields.
    ///
    /// Carried for compatibility; no component reads it yet.
    pub convert_to_autocomplete: bool,
    /// Snippet widgets attached above the grid's button row.
    pub registered_snippets: Vec<SnippetEntry>,
    /// `chrono` format used for date columns.
    pub date_format: String,
    /// `chrono` format used for datetime columns.
    pub datetime_format: String,
    /// Default number of rows per grid page.
    pub items_per_page: usize,
    /// Page sizes offered by the configurable paginator.
    pub page_sizes: Vec<usize>,
}

impl Default for ModelAdminPlusSettings {
    fn default() -> Self {
        Self {
            auto_convert_dates: true,
            convert_to_autocomplete: true,
            registered_snippets: Vec::new(),
            date_format: "%d/%m/%Y".to_string(),
            datetime_format: "%d/%m/%Y %H:%M".to_string(),
            items_per_page: 15,
            page_sizes: vec![15, 30, 60],
        }
    }
}

/// The complete set of modeladmin-plus settings.
///
/// # Examples
///
/// ```
/// use adminplus_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.admin_url, "/admin");
/// assert!(settings.model_admin_plus.auto_convert_dates);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// URL prefix every admin is mounted under.
    pub admin_url: String,
    /// Installed modules, consulted by the module manifest (e.g. `"cms"`).
    pub installed_modules: Vec<String>,

    // ── Sessions ─────────────────────────────────────────────────────

    /// The name of the session cookie.
    pub session_cookie_name: String,
    /// The session cookie max age in seconds.
    pub session_cookie_age: u64,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level filter (e.g. "info", "adminplus_admin=debug").
    pub log_level: String,

    // ── Admin ────────────────────────────────────────────────────────

    /// `ModelAdminPlus` configuration.
    pub model_admin_plus: ModelAdminPlusSettings,
    /// Per-model configuration keyed by model class name.
    pub models: HashMap<String, ModelSettings>,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            admin_url: "/admin".to_string(),
            installed_modules: Vec::new(),
            session_cookie_name: "sessionid".to_string(),
            session_cookie_age: 1_209_600, // 2 weeks
            log_level: "info".to_string(),
            model_admin_plus: ModelAdminPlusSettings::default(),
            models: HashMap::new(),
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Returns the configuration for a model class, if any was given.
    pub fn model(&self, class_name: &str) -> Option<&ModelSettings> {
        self.models.get(class_name)
    }

    /// Returns whether the named module is installed.
    pub fn module_exists(&self, module: &str) -> bool {
        self.installed_modules.iter().any(|m| m == module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.debug);
        assert_eq!(settings.session_cookie_name, "sessionid");
        assert_eq!(settings.session_cookie_age, 1_209_600);
        assert_eq!(settings.log_level, "info");
        assert!(settings.models.is_empty());
    }

    #[test]
    fn test_default_model_admin_plus_settings() {
        let plus = ModelAdminPlusSettings::default();
        assert!(plus.auto_convert_dates);
        assert!(plus.convert_to_autocomplete);
        assert!(plus.registered_snippets.is_empty());
        assert_eq!(plus.items_per_page, 15);
        assert_eq!(plus.page_sizes, vec![15, 30, 60]);
    }

    #[test]
    fn test_snippet_entry_untagged_deserialization() {
        let entries: Vec<SnippetEntry> = serde_json::from_value(serde_json::json!([
            "record-count",
            {"model": "app::Contact", "snippets": ["active-filters"]}
        ]))
        .unwrap();
        assert_eq!(entries[0], SnippetEntry::Global("record-count".into()));
        assert_eq!(
            entries[1],
            SnippetEntry::Scoped {
                model: "app::Contact".into(),
                snippets: vec!["active-filters".into()],
            }
        );
    }

    #[test]
    fn test_export_field_setting_pairs() {
        let column = ExportFieldSetting::Column("Email".into());
        assert_eq!(column.to_pair(), ("Email".into(), "Email".into()));

        let labelled = ExportFieldSetting::Labelled {
            field: "FirstName".into(),
            label: "First name".into(),
        };
        assert_eq!(labelled.to_pair(), ("FirstName".into(), "First name".into()));
    }

    #[test]
    fn test_module_exists() {
        let mut settings = Settings::default();
        assert!(!settings.module_exists("cms"));
        settings.installed_modules.push("cms".into());
        assert!(settings.module_exists("cms"));
    }

    #[test]
    fn test_settings_round_trip_through_json() {
        let settings = Settings::default();
        let json = serde_json::to_value(&settings).unwrap();
        let back: Settings = serde_json::from_value(json).unwrap();
        assert_eq!(back.admin_url, settings.admin_url);
        assert_eq!(back.model_admin_plus, settings.model_admin_plus);
    }
}
