//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `ADMINPLUS_DEBUG` | `debug` |
//! | `ADMINPLUS_LOG_LEVEL` | `log_level` |
//! | `ADMINPLUS_ADMIN_URL` | `admin_url` |
//! | `ADMINPLUS_INSTALLED_MODULES` | `installed_modules` (comma-separated) |
//! | `ADMINPLUS_SESSION_COOKIE_NAME` | `session_cookie_name` |
//! | `ADMINPLUS_AUTO_CONVERT_DATES` | `model_admin_plus.auto_convert_dates` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use adminplus_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/admin.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::AdminError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, AdminError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| AdminError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, AdminError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        AdminError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, AdminError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, AdminError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| AdminError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, AdminError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        AdminError::ConfigurationError(format!(
            "Failed to read JSON file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_json_str(&content)
}

/// Loads settings from a file, picking the format from its extension
/// (`.json` is JSON, anything else is TOML), then applies environment overrides.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, AdminError> {
    let path = path.as_ref();
    let mut settings = if path.extension().is_some_and(|ext| ext == "json") {
        from_json_file(path)?
    } else {
        from_toml_file(path)?
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `ADMINPLUS_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("ADMINPLUS_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("ADMINPLUS_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("ADMINPLUS_ADMIN_URL") {
        settings.admin_url = val;
    }

    if let Ok(val) = std::env::var("ADMINPLUS_INSTALLED_MODULES") {
        settings.installed_modules = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Ok(val) = std::env::var("ADMINPLUS_SESSION_COOKIE_NAME") {
        settings.session_cookie_name = val;
    }

    if let Ok(val) = std::env::var("ADMINPLUS_AUTO_CONVERT_DATES") {
        settings.model_admin_plus.auto_convert_dates = parse_bool(&val);
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Deep-merges `overrides` over the serialized default settings and
/// deserializes the result.
fn merge_over_defaults(overrides: serde_json::Value, format: &str) -> Result<Settings, AdminError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        AdminError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, overrides);
    serde_json::from_value(merged).map_err(|e| {
        AdminError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence; arrays
/// are replaced, not concatenated.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ExportFieldSetting, SnippetEntry};

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            admin_url = "/cms-admin"
            installed_modules = ["cms"]
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.admin_url, "/cms-admin");
        assert!(settings.module_exists("cms"));
        // Defaults preserved
        assert_eq!(settings.session_cookie_name, "sessionid");
        assert!(settings.model_admin_plus.auto_convert_dates);
    }

    #[test]
    fn test_from_toml_str_model_admin_plus_table() {
        let toml = r#"
            [model_admin_plus]
            auto_convert_dates = false
            registered_snippets = [
                "record-count",
                { model = "app::Contact", snippets = ["active-filters"] },
            ]
        "#;

        let settings = from_toml_str(toml).unwrap();
        let plus = &settings.model_admin_plus;
        assert!(!plus.auto_convert_dates);
        // Untouched keys of the same table keep their defaults
        assert!(plus.convert_to_autocomplete);
        assert_eq!(plus.items_per_page, 15);
        assert_eq!(plus.registered_snippets.len(), 2);
        assert_eq!(
            plus.registered_snippets[0],
            SnippetEntry::Global("record-count".into())
        );
    }

    #[test]
    fn test_from_toml_str_model_export_fields() {
        let toml = r#"
            [models."app::Contact"]
            export_fields = ["Email", { field = "FirstName", label = "First name" }]
        "#;

        let settings = from_toml_str(toml).unwrap();
        let fields = settings
            .model("app::Contact")
            .and_then(|m| m.export_fields.clone())
            .unwrap();
        assert_eq!(fields[0], ExportFieldSetting::Column("Email".into()));
        assert_eq!(fields[1].to_pair().1, "First name");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.admin_url, "/admin");
    }

    #[test]
    fn test_from_toml_str_ignores_unknown_keys() {
        let toml = r#"
            language_code = "de-de"
            admin_url = "/backend"
        "#;
        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.admin_url, "/backend");
        let json = serde_json::to_value(&settings).unwrap();
        assert!(json.get("language_code").is_none());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("this is [not toml");
        assert!(matches!(result, Err(AdminError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("debug = \"sometimes\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{"log_level": "debug", "model_admin_plus": {"items_per_page": 30}}"#;
        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.model_admin_plus.items_per_page, 30);
        assert_eq!(settings.model_admin_plus.page_sizes, vec![15, 30, 60]);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/definitely/not/here.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_env_overrides_installed_modules() {
        std::env::set_var("ADMINPLUS_INSTALLED_MODULES", "cms, reports ,");
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings);
        std::env::remove_var("ADMINPLUS_INSTALLED_MODULES");
        assert_eq!(settings.installed_modules, vec!["cms", "reports"]);
    }

    #[test]
    fn test_merge_json_replaces_arrays() {
        let base = serde_json::json!({"a": [1, 2], "b": {"c": 1, "d": 2}});
        let over = serde_json::json!({"a": [3], "b": {"c": 5}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": [3], "b": {"c": 5, "d": 2}}));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
        assert!(!parse_bool("off"));
    }
}
