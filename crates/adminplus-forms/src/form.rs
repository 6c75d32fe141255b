//! Forms.
//!
//! A [`Form`] is a named [`FieldList`] with an action URL and a set of action
//! buttons. Data moves in and out as JSON maps, the same shape the admin keeps
//! in the search session.

use serde_json::{json, Map, Value};

use crate::field_list::FieldList;
use crate::fields::{FormField, FormFieldType};

/// A form.
///
/// # Examples
///
/// ```
/// use adminplus_forms::{FieldList, Form, FormField};
///
/// let fields: FieldList = [FormField::text("Name")].into_iter().collect();
/// let mut form = Form::new("SearchForm", "/admin/contacts/app-Contact").with_fields(fields);
///
/// let mut data = serde_json::Map::new();
/// data.insert("Name".into(), "Mark".into());
/// form.load_data_from(&data);
/// assert_eq!(form.data(), data);
/// ```
#[derive(Debug, Clone)]
pub struct Form {
    name: String,
    action: String,
    fields: FieldList,
    actions: Vec<String>,
}

impl Form {
    /// Creates an empty form.
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            fields: FieldList::new(),
            actions: Vec::new(),
        }
    }

    /// Sets the fields.
    #[must_use]
    pub fn with_fields(mut self, fields: FieldList) -> Self {
        self.fields = fields;
        self
    }

    /// Adds an action button.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Returns the form name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the URL the form submits to.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Sets the URL the form submits to.
    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = action.into();
    }

    /// Returns the action button names.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Returns the fields.
    pub const fn fields(&self) -> &FieldList {
        &self.fields
    }

    /// Returns the fields mutably.
    pub fn fields_mut(&mut self) -> &mut FieldList {
        &mut self.fields
    }

    /// Looks up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields.field_by_name(name)
    }

    /// Sets the value of every field named in `data`. Other fields keep their values.
    pub fn load_data_from(&mut self, data: &Map<String, Value>) {
        for field in self.fields.iter_mut() {
            if let Some(value) = data.get(&field.name) {
                field.set_value(value.clone());
            }
        }
    }

    /// Returns the non-empty field values.
    pub fn data(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|f| !f.value_text().is_empty())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Points every autocomplete field at `<base_url>/suggest/<field name>`.
    pub fn enable_suggestions(&mut self, base_url: &str) {
        let base = base_url.trim_end_matches('/');
        for field in self.fields.iter_mut() {
            if matches!(field.field_type, FormFieldType::AutoComplete(_)) {
                field.suggest_url = Some(format!("{base}/suggest/{}", field.name));
            }
        }
    }

    /// Renders the form as JSON.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "action": self.action,
            "fields": self.fields.iter().map(FormField::to_json).collect::<Vec<_>>(),
            "actions": self.actions,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fields::AutoCompleteSource;
    use adminplus_db::{DataList, ModelClass};

    fn form() -> Form {
        let source = AutoCompleteSource::new(
            DataList::new(Arc::new(ModelClass::new("app::Contact")), Vec::new()),
            "Surname",
        );
        let fields: FieldList = [
            FormField::text("FirstName"),
            FormField::autocomplete("Surname", source),
        ]
        .into_iter()
        .collect();
        Form::new("SearchForm", "/admin/contactadmin/app-Contact")
            .with_fields(fields)
            .with_action("search")
    }

    #[test]
    fn test_load_data_ignores_unknown_keys() {
        let mut form = form();
        let data = json!({"FirstName": "Mark", "Unknown": "x"});
        form.load_data_from(data.as_object().unwrap());
        assert_eq!(form.field_by_name("FirstName").unwrap().value, json!("Mark"));
        assert_eq!(form.data().len(), 1);
    }

    #[test]
    fn test_enable_suggestions_only_for_autocomplete() {
        let mut form = form();
        form.enable_suggestions("/admin/contactadmin/app-Contact/");
        assert!(form.field_by_name("FirstName").unwrap().suggest_url.is_none());
        assert_eq!(
            form.field_by_name("Surname").unwrap().suggest_url.as_deref(),
            Some("/admin/contactadmin/app-Contact/suggest/Surname")
        );
    }

    #[test]
    fn test_to_json() {
        let rendered = form().to_json();
        assert_eq!(rendered["name"], "SearchForm");
        assert_eq!(rendered["fields"][1]["type"], "autocomplete");
        assert_eq!(rendered["actions"][0], "search");
    }
}
