//! The `check` management command.
//!
//! Validates the modeladmin-plus configuration before the site is served:
//! snippet identifiers, pagination, date formats, the admin URL, export
//! columns and the session cookie.

use async_trait::async_trait;
use chrono::format::{Item, StrftimeItems};

use adminplus_admin::{applicable_snippets, SnippetRegistry};
use adminplus_core::{AdminError, Settings, SnippetEntry};

use crate::command::ManagementCommand;

/// Runs the configuration checks.
pub struct CheckCommand;

/// The result of a single check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// Severity of the finding.
    pub level: CheckLevel,
    /// What is wrong.
    pub msg: String,
    /// How to fix it, if there is an obvious fix.
    pub hint: Option<String>,
    /// A stable identifier such as `pagination.E001`.
    pub id: String,
}

impl CheckMessage {
    fn new(level: CheckLevel, id: &str, msg: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: hint.map(str::to_string),
            id: id.to_string(),
        }
    }
}

/// Severity levels for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    /// Informational message.
    Info,
    /// Something that probably isn't what was meant.
    Warning,
    /// A configuration the site refuses to start with.
    Error,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

fn invalid_format(format: &str) -> bool {
    StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn configured_snippet_ids(entries: &[SnippetEntry]) -> Vec<&str> {
    let mut ids = Vec::new();
    for entry in entries {
        match entry {
            SnippetEntry::Global(id) => ids.push(id.as_str()),
            SnippetEntry::Scoped { model, .. } => ids.extend(applicable_snippets(entries, model)),
        }
    }
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Runs every check against the settings and returns the findings.
pub fn run_checks(settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = Vec::new();
    let options = &settings.model_admin_plus;

    let registry = SnippetRegistry::with_builtins();
    for id in configured_snippet_ids(&options.registered_snippets) {
        if !registry.contains(id) {
            messages.push(CheckMessage::new(
                CheckLevel::Error,
                "snippets.E001",
                format!("Snippet '{id}' is not registered"),
                Some("Known snippets are record-count and active-filters"),
            ));
        }
    }

    if options.page_sizes.is_empty() {
        messages.push(CheckMessage::new(
            CheckLevel::Error,
            "pagination.E001",
            "page_sizes is empty",
            Some("List at least one page size, e.g. [15, 30, 60]"),
        ));
    }
    if options.items_per_page == 0 {
        messages.push(CheckMessage::new(
            CheckLevel::Error,
            "pagination.E002",
            "items_per_page is 0",
            None,
        ));
    } else if !options.page_sizes.is_empty() && !options.page_sizes.contains(&options.items_per_page) {
        messages.push(CheckMessage::new(
            CheckLevel::Warning,
            "pagination.W001",
            format!("items_per_page {} is not one of page_sizes", options.items_per_page),
            Some("The page size selector will not show the default size as selected"),
        ));
    }

    for (name, format) in [("date_format", &options.date_format), ("datetime_format", &options.datetime_format)] {
        if invalid_format(format) {
            messages.push(CheckMessage::new(
                CheckLevel::Error,
                "dates.E001",
                format!("{name} '{format}' is not a valid strftime format"),
                None,
            ));
        }
    }

    if !settings.admin_url.starts_with('/') {
        messages.push(CheckMessage::new(
            CheckLevel::Error,
            "admin.E001",
            format!("admin_url '{}' must start with '/'", settings.admin_url),
            None,
        ));
    }

    let mut models: Vec<_> = settings.models.iter().collect();
    models.sort_by(|a, b| a.0.cmp(b.0));
    for (class_name, model) in models {
        if model.export_fields.as_ref().is_some_and(Vec::is_empty) {
            messages.push(CheckMessage::new(
                CheckLevel::Warning,
                "models.W001",
                format!("{class_name} has an empty export_fields list"),
                Some("Remove the setting to export the model's summary fields"),
            ));
        }
    }

    if settings.session_cookie_age == 0 {
        messages.push(CheckMessage::new(
            CheckLevel::Warning,
            "session.W001",
            "session_cookie_age is 0, stored searches expire immediately",
            None,
        ));
    }

    messages
}

#[async_trait]
impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Check the admin configuration"
    }

    async fn handle(&self, _matches: &clap::ArgMatches, settings: &Settings) -> Result<(), AdminError> {
        let messages = run_checks(settings);

        if messages.is_empty() {
            tracing::info!("System check identified no issues");
            return Ok(());
        }

        let errors = messages.iter().filter(|m| m.level >= CheckLevel::Error).count();
        let warnings = messages.iter().filter(|m| m.level == CheckLevel::Warning).count();

        for msg in &messages {
            let hint_text = msg
                .hint
                .as_ref()
                .map_or(String::new(), |h| format!("\n\tHINT: {h}"));
            tracing::warn!("{} ({}): {}{}", msg.level, msg.id, msg.msg, hint_text);
        }

        tracing::info!(
            "System check identified {} issue(s) ({} error(s), {} warning(s))",
            messages.len(),
            errors,
            warnings
        );

        if errors > 0 {
            return Err(AdminError::ImproperlyConfigured(format!(
                "System check found {errors} error(s)"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminplus_core::ModelSettings;

    fn ids(settings: &Settings) -> Vec<String> {
        run_checks(settings).into_iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_defaults_pass() {
        assert!(run_checks(&Settings::default()).is_empty());
    }

    #[test]
    fn test_unknown_snippets() {
        let mut settings = Settings::default();
        settings.model_admin_plus.registered_snippets = vec![
            SnippetEntry::Global("record-count".into()),
            SnippetEntry::Scoped {
                model: "app::Contact".into(),
                snippets: vec!["shout".into(), "active-filters".into()],
            },
        ];
        let messages = run_checks(&settings);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "snippets.E001");
        assert!(messages[0].msg.contains("shout"));
    }

    #[test]
    fn test_pagination_checks() {
        let mut settings = Settings::default();
        settings.model_admin_plus.page_sizes.clear();
        assert_eq!(ids(&settings), vec!["pagination.E001"]);

        settings.model_admin_plus.page_sizes = vec![10, 20];
        assert_eq!(ids(&settings), vec!["pagination.W001"]);

        settings.model_admin_plus.items_per_page = 0;
        assert_eq!(ids(&settings), vec!["pagination.E002"]);
    }

    #[test]
    fn test_invalid_date_format() {
        let mut settings = Settings::default();
        settings.model_admin_plus.datetime_format = "%d/%m/%Y %Q".into();
        let messages = run_checks(&settings);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "dates.E001");
        assert!(messages[0].msg.starts_with("datetime_format"));
    }

    #[test]
    fn test_admin_url_and_session() {
        let settings = Settings {
            admin_url: "admin/".into(),
            session_cookie_age: 0,
            ..Settings::default()
        };
        assert_eq!(ids(&settings), vec!["admin.E001", "session.W001"]);
    }

    #[test]
    fn test_empty_export_fields() {
        let mut settings = Settings::default();
        settings.models.insert(
            "app::Contact".into(),
            ModelSettings {
                export_fields: Some(Vec::new()),
            },
        );
        settings.models.insert("app::Company".into(), ModelSettings::default());
        assert_eq!(ids(&settings), vec!["models.W001"]);
    }

    #[test]
    fn test_check_level_ordering() {
        assert!(CheckLevel::Info < CheckLevel::Warning);
        assert!(CheckLevel::Warning < CheckLevel::Error);
        assert_eq!(CheckLevel::Error.to_string(), "ERROR");
    }

    #[tokio::test]
    async fn test_handle_fails_on_errors() {
        let cli = clap::Command::new("check");
        let matches = cli.try_get_matches_from(["check"]).unwrap();

        assert!(CheckCommand.handle(&matches, &Settings::default()).await.is_ok());

        let mut settings = Settings::default();
        settings.model_admin_plus.page_sizes.clear();
        assert!(matches!(
            CheckCommand.handle(&matches, &settings).await,
            Err(AdminError::ImproperlyConfigured(_))
        ));
    }
}
