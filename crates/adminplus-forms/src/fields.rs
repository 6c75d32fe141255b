//! Form field definitions.
//!
//! A [`FormField`] is a name, a label, a current value and a
//! [`FormFieldType`]. Autocomplete fields additionally know where their
//! suggestions come from and answer suggestion requests themselves.

use serde::Serialize;
use serde_json::{json, Value};

use adminplus_db::lookup::{value_to_text, Lookup};
use adminplus_db::DataList;
use adminplus_http::{HttpRequest, HttpResponse, JsonResponse};

/// Default number of suggestions an autocomplete field returns.
pub const DEFAULT_SUGGEST_LIMIT: usize = 20;

/// Where an autocomplete field finds its suggestions.
#[derive(Debug, Clone)]
pub struct AutoCompleteSource {
    /// The records to search.
    pub list: DataList,
    /// Fields matched against the typed text.
    pub search_fields: Vec<String>,
    /// Field shown as the suggestion label.
    pub display_field: String,
    /// Field submitted as the suggestion value.
    pub store_field: String,
    /// Maximum number of suggestions.
    pub limit: usize,
}

impl AutoCompleteSource {
    /// Creates a source that searches, shows and stores a single field.
    pub fn new(list: DataList, field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            list,
            search_fields: vec![field.clone()],
            display_field: field.clone(),
            store_field: field,
            limit: DEFAULT_SUGGEST_LIMIT,
        }
    }

    /// Sets the fields matched against the typed text.
    #[must_use]
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the label field.
    #[must_use]
    pub fn display_field(mut self, field: impl Into<String>) -> Self {
        self.display_field = field.into();
        self
    }

    /// Sets the value field.
    #[must_use]
    pub fn store_field(mut self, field: impl Into<String>) -> Self {
        self.store_field = field.into();
        self
    }

    /// Sets the suggestion limit.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Returns suggestions for the typed text: records where any search field
    /// contains it, case-insensitively, ordered by label and capped at the
    /// limit. Blank text suggests nothing; duplicate values are dropped.
    pub fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matches = self
            .list
            .filter_any(&self.search_fields, Lookup::PartialMatch, &Value::from(query))
            .sort(&self.display_field, false);

        let mut suggestions: Vec<Suggestion> = Vec::new();
        for record in &matches {
            if suggestions.len() >= self.limit {
                break;
            }
            let value = record.get(&self.store_field).map(value_to_text).unwrap_or_default();
            if suggestions.iter().any(|s| s.value == value) {
                continue;
            }
            let label = record.get(&self.display_field).map(value_to_text).unwrap_or_default();
            suggestions.push(Suggestion { label, value });
        }
        suggestions
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Text shown to the user.
    pub label: String,
    /// Value submitted when chosen.
    pub value: String,
}

/// The kind of a form field.
#[derive(Debug, Clone)]
pub enum FormFieldType {
    /// Single-line text input.
    Text,
    /// Hidden input.
    Hidden,
    /// Date input.
    Date,
    /// Checkbox.
    Checkbox,
    /// Single choice from a list of `(value, label)` pairs.
    Dropdown {
        /// The options.
        choices: Vec<(String, String)>,
        /// Label of the leading empty option, if any.
        empty_string: Option<String>,
    },
    /// Text input that suggests values as the user types.
    AutoComplete(Box<AutoCompleteSource>),
}

impl FormFieldType {
    /// The type name used when rendering.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Hidden => "hidden",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Dropdown { .. } => "dropdown",
            Self::AutoComplete(_) => "autocomplete",
        }
    }
}

/// A form field.
///
/// # Examples
///
/// ```
/// use adminplus_forms::{FormField, FormFieldType};
///
/// let mut field = FormField::new("FirstName", FormFieldType::Text);
/// assert_eq!(field.label, "First name");
/// field.set_value(serde_json::json!("Mark"));
/// assert_eq!(field.value_text(), "Mark");
/// ```
#[derive(Debug, Clone)]
pub struct FormField {
    /// The submitted name.
    pub name: String,
    /// The label shown next to the field.
    pub label: String,
    /// The field kind.
    pub field_type: FormFieldType,
    /// The current value.
    pub value: Value,
    /// URL the client calls for suggestions. Set on autocomplete fields once
    /// the form knows where it lives.
    pub suggest_url: Option<String>,
}

impl FormField {
    /// Creates a field with a label derived from its name.
    pub fn new(name: impl Into<String>, field_type: FormFieldType) -> Self {
        let name = name.into();
        Self {
            label: adminplus_core::utils::text::name_to_label(&name),
            name,
            field_type,
            value: Value::Null,
            suggest_url: None,
        }
    }

    /// Creates a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FormFieldType::Text)
    }

    /// Creates an autocomplete field.
    pub fn autocomplete(name: impl Into<String>, source: AutoCompleteSource) -> Self {
        Self::new(name, FormFieldType::AutoComplete(Box::new(source)))
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the value.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Sets the value in place.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Returns the value as submitted text.
    pub fn value_text(&self) -> String {
        value_to_text(&self.value)
    }

    /// Returns `true` if this field can answer suggestion requests.
    pub const fn supports_suggest(&self) -> bool {
        matches!(self.field_type, FormFieldType::AutoComplete(_))
    }

    /// Answers a suggestion request from the request's `q` parameter.
    ///
    /// Returns `None` for fields that do not suggest.
    pub fn suggest(&self, request: &HttpRequest) -> Option<HttpResponse> {
        let FormFieldType::AutoComplete(source) = &self.field_type else {
            return None;
        };
        let query = request.get_vars().get("q").unwrap_or_default();
        let suggestions = source.suggestions(query);
        tracing::debug!(field = %self.name, query, count = suggestions.len(), "autocomplete suggestions");
        Some(JsonResponse::new(&suggestions))
    }

    /// Renders the field as JSON.
    pub fn to_json(&self) -> Value {
        let mut out = json!({
            "name": self.name,
            "label": self.label,
            "type": self.field_type.type_name(),
            "value": self.value,
        });
        if let FormFieldType::Dropdown { choices, empty_string } = &self.field_type {
            out["choices"] = choices
                .iter()
                .map(|(value, label)| json!({"value": value, "label": label}))
                .collect();
            out["emptyString"] = json!(empty_string);
        }
        if let Some(url) = &self.suggest_url {
            out["suggestURL"] = json!(url);
        }
        out
    }
}
