//! Model-class descriptors.
//!
//! A [`ModelClass`] names a model, lists its fields with their types, and
//! declares which fields the admin summarises, searches, and filters by
//! default. Everything the admin knows about a model comes from here.

use serde::{Deserialize, Serialize};

use adminplus_core::utils::text::name_to_label;

use crate::lookup::Lookup;
use crate::store::ID_FIELD;

/// The storage type of a model field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "choices")]
pub enum FieldType {
    /// Short text.
    Varchar,
    /// Long text.
    Text,
    /// Integer.
    Int,
    /// Decimal number.
    Decimal,
    /// Boolean flag.
    Boolean,
    /// Calendar date, stored as `YYYY-MM-DD`.
    Date,
    /// Date and time, stored as `YYYY-MM-DD HH:MM:SS` or RFC 3339.
    Datetime,
    /// One of a fixed set of values.
    Enum(Vec<String>),
}

impl FieldType {
    /// Returns `true` for field types rendered as dates.
    pub const fn is_date_like(&self) -> bool {
        matches!(self, Self::Date | Self::Datetime)
    }

    /// Returns `true` for free-text field types.
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Varchar | Self::Text)
    }

    /// The lookup a search form applies for this type by default.
    pub const fn default_lookup(&self) -> Lookup {
        if self.is_text() {
            Lookup::PartialMatch
        } else {
            Lookup::Exact
        }
    }
}

/// A field of a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelField {
    /// The field name, as used in records.
    pub name: String,
    /// The storage type.
    pub field_type: FieldType,
    /// A custom label. Falls back to a label derived from the name.
    pub label: Option<String>,
}

impl ModelField {
    /// Creates a field with a derived label.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: None,
        }
    }

    /// Sets a custom label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the display label.
    pub fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| name_to_label(&self.name))
    }
}

/// Describes a model managed by an admin.
///
/// # Examples
///
/// ```
/// use adminplus_db::{FieldType, ModelClass};
///
/// let contact = ModelClass::new("app::Contact")
///     .field("FirstName", FieldType::Varchar)
///     .field("Email", FieldType::Varchar)
///     .field("Created", FieldType::Datetime)
///     .summary_fields(["FirstName", "Email"]);
///
/// assert_eq!(contact.summary_field_labels()[0], ("FirstName".into(), "First name".into()));
/// assert!(contact.field_type("Created").is_some_and(|t| t.is_date_like()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelClass {
    /// The fully qualified class name, e.g. `app::Contact`.
    pub class_name: String,
    /// The model's fields, in declaration order. `ID` is implicit.
    pub fields: Vec<ModelField>,
    /// Fields shown in listings and exported by default.
    pub summary_fields: Vec<String>,
    /// Fields offered on the search form.
    pub searchable_fields: Vec<String>,
    /// Criteria applied to listings when the user is not filtering.
    pub default_search_query: serde_json::Map<String, serde_json::Value>,
    /// Default sort, `Field` or `-Field` for descending.
    pub default_sort: Option<String>,
}

impl ModelClass {
    /// Creates a model with no fields.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: Vec::new(),
            summary_fields: Vec::new(),
            searchable_fields: Vec::new(),
            default_search_query: serde_json::Map::new(),
            default_sort: None,
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(ModelField::new(name, field_type));
        self
    }

    /// Adds a prepared field.
    #[must_use]
    pub fn with_field(mut self, field: ModelField) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the summary fields.
    #[must_use]
    pub fn summary_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.summary_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the searchable fields.
    #[must_use]
    pub fn searchable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a criterion to the default search query.
    #[must_use]
    pub fn default_filter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.default_search_query.insert(key.into(), value);
        self
    }

    /// Sets the default sort.
    #[must_use]
    pub fn default_sort(mut self, sort: impl Into<String>) -> Self {
        self.default_sort = Some(sort.into());
        self
    }

    /// Returns the short class name (the part after the last namespace separator).
    pub fn short_name(&self) -> &str {
        self.class_name
            .rsplit(|c| c == ':' || c == '\\')
            .next()
            .unwrap_or(&self.class_name)
    }

    /// Looks up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the type of a field. `ID` is always an integer.
    pub fn field_type(&self, name: &str) -> Option<&FieldType> {
        static ID_TYPE: FieldType = FieldType::Int;
        if name == ID_FIELD {
            return Some(&ID_TYPE);
        }
        self.get_field(name).map(|f| &f.field_type)
    }

    /// Returns the label for a field name, derived when the field is unknown.
    pub fn field_label(&self, name: &str) -> String {
        self.get_field(name)
            .map_or_else(|| name_to_label(name), ModelField::label)
    }

    /// Returns the summary field names; every declared field when none are set.
    pub fn summary_field_names(&self) -> Vec<String> {
        if self.summary_fields.is_empty() {
            self.fields.iter().map(|f| f.name.clone()).collect()
        } else {
            self.summary_fields.clone()
        }
    }

    /// Returns `(field, label)` pairs for the summary fields.
    pub fn summary_field_labels(&self) -> Vec<(String, String)> {
        self.summary_field_names()
            .into_iter()
            .map(|name| {
                let label = self.field_label(&name);
                (name, label)
            })
            .collect()
    }

    /// Returns the searchable field names; the summary fields when none are set.
    pub fn searchable_field_names(&self) -> Vec<String> {
        if self.searchable_fields.is_empty() {
            self.summary_field_names()
        } else {
            self.searchable_fields.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ModelClass {
        ModelClass::new("app::models::Contact")
            .field("FirstName", FieldType::Varchar)
            .field("Surname", FieldType::Varchar)
            .field("Age", FieldType::Int)
            .field("Birthday", FieldType::Date)
            .with_field(ModelField::new("Email", FieldType::Varchar).with_label("E-mail"))
    }

    #[test]
    fn test_short_name() {
        assert_eq!(contact().short_name(), "Contact");
        assert_eq!(ModelClass::new("App\\Contact").short_name(), "Contact");
        assert_eq!(ModelClass::new("Contact").short_name(), "Contact");
    }

    #[test]
    fn test_summary_defaults_to_all_fields() {
        let names = contact().summary_field_names();
        assert_eq!(names, vec!["FirstName", "Surname", "Age", "Birthday", "Email"]);
    }

    #[test]
    fn test_searchable_defaults_to_summary() {
        let model = contact().summary_fields(["FirstName", "Email"]);
        assert_eq!(model.searchable_field_names(), vec!["FirstName", "Email"]);
    }

    #[test]
    fn test_labels() {
        let model = contact();
        assert_eq!(model.field_label("FirstName"), "First name");
        assert_eq!(model.field_label("Email"), "E-mail");
        assert_eq!(model.field_label("HomePhone"), "Home phone");
    }

    #[test]
    fn test_field_types() {
        let model = contact();
        assert_eq!(model.field_type("ID"), Some(&FieldType::Int));
        assert!(model.field_type("Birthday").is_some_and(FieldType::is_date_like));
        assert!(!FieldType::Int.is_date_like());
        assert_eq!(FieldType::Varchar.default_lookup(), Lookup::PartialMatch);
        assert_eq!(FieldType::Boolean.default_lookup(), Lookup::Exact);
        assert!(model.field_type("missing").is_none());
    }
}
