//! Search contexts.
//!
//! A [`SearchContext`] pairs the fields of a model's search form with the
//! lookup each one applies, and carries the model's default query. The filter
//! header builds one per grid; extension hooks may add, replace or remove
//! fields before the search form is built from it.

use std::sync::Arc;

use serde_json::{Map, Value};

use adminplus_db::lookup::{value_to_text, FilterSpec, Lookup};
use adminplus_db::{DataList, FieldType, ModelClass};
use adminplus_forms::{FieldList, FormField, FormFieldType};

/// Search fields, their lookups, and the default query of a model.
#[derive(Debug, Clone)]
pub struct SearchContext {
    model: Arc<ModelClass>,
    fields: FieldList,
    lookups: Vec<(String, Lookup)>,
    default_query: Map<String, Value>,
}

impl SearchContext {
    /// Builds the default context of a model from its searchable fields.
    ///
    /// Text fields match partially, datetimes by date prefix, everything else
    /// exactly.
    pub fn for_model(model: Arc<ModelClass>) -> Self {
        let mut context = Self {
            default_query: model.default_search_query.clone(),
            fields: FieldList::new(),
            lookups: Vec::new(),
            model: Arc::clone(&model),
        };

        for name in model.searchable_field_names() {
            let field_type = model.field_type(&name).cloned().unwrap_or(FieldType::Varchar);
            let lookup = match field_type {
                FieldType::Datetime => Lookup::StartsWith,
                ref other => other.default_lookup(),
            };
            let field = search_field_for(&name, &field_type).with_label(model.field_label(&name));
            context.add_field(field, lookup);
        }
        context
    }

    /// Returns the model.
    pub fn model(&self) -> &ModelClass {
        &self.model
    }

    /// Returns the search fields.
    pub const fn get_fields(&self) -> &FieldList {
        &self.fields
    }

    /// Returns the search fields mutably.
    pub fn fields_mut(&mut self) -> &mut FieldList {
        &mut self.fields
    }

    /// Adds (or replaces) a search field and the lookup it applies.
    pub fn add_field(&mut self, field: FormField, lookup: Lookup) {
        self.set_lookup(&field.name, lookup);
        self.fields.push(field);
    }

    /// Replaces a search field, keeping its lookup. Returns `false` when no
    /// field of that name exists.
    pub fn replace_field(&mut self, field: FormField) -> bool {
        let name = field.name.clone();
        self.fields.replace(&name, field)
    }

    /// Removes a search field and its lookup.
    pub fn remove_field_by_name(&mut self, name: &str) -> Option<FormField> {
        self.lookups.retain(|(n, _)| n != name);
        self.fields.remove_by_name(name)
    }

    /// Returns the lookup a field applies.
    pub fn lookup_for(&self, name: &str) -> Option<Lookup> {
        self.lookups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, l)| *l)
    }

    /// Sets the lookup a field applies.
    pub fn set_lookup(&mut self, name: &str, lookup: Lookup) {
        match self.lookups.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = lookup,
            None => self.lookups.push((name.to_string(), lookup)),
        }
    }

    /// Returns the criteria applied when the user is not filtering.
    pub const fn get_default_query(&self) -> &Map<String, Value> {
        &self.default_query
    }

    /// Replaces the default query.
    pub fn set_default_query(&mut self, query: Map<String, Value>) {
        self.default_query = query;
    }

    /// Turns submitted criteria into filters. Empty values and names without
    /// a lookup are skipped.
    pub fn get_search_params(&self, criteria: &Map<String, Value>) -> Vec<FilterSpec> {
        criteria
            .iter()
            .filter(|(_, value)| !is_blank(value))
            .filter_map(|(name, value)| {
                let lookup = self.lookup_for(name)?;
                Some(FilterSpec::new(name.clone(), lookup, value.clone()))
            })
            .collect()
    }

    /// Narrows `list` by the submitted criteria.
    pub fn get_results(&self, list: &DataList, criteria: &Map<String, Value>) -> DataList {
        list.filter_specs(&self.get_search_params(criteria))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(is_blank),
        other => value_to_text(other).trim().is_empty(),
    }
}

fn search_field_for(name: &str, field_type: &FieldType) -> FormField {
    match field_type {
        FieldType::Enum(choices) => FormField::new(
            name,
            FormFieldType::Dropdown {
                choices: choices.iter().map(|c| (c.clone(), c.clone())).collect(),
                empty_string: Some("(Any)".to_string()),
            },
        ),
        FieldType::Boolean => FormField::new(
            name,
            FormFieldType::Dropdown {
                choices: vec![("1".into(), "Yes".into()), ("0".into(), "No".into())],
                empty_string: Some("(Any)".to_string()),
            },
        ),
        FieldType::Date | FieldType::Datetime => FormField::new(name, FormFieldType::Date),
        _ => FormField::text(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> Arc<ModelClass> {
        Arc::new(
            ModelClass::new("app::Contact")
                .field("Surname", FieldType::Varchar)
                .field("Status", FieldType::Enum(vec!["Active".into(), "Archived".into()]))
                .field("Created", FieldType::Datetime)
                .field("Subscribed", FieldType::Boolean)
                .default_filter("Status", json!("Active")),
        )
    }

    fn list() -> DataList {
        let records = [
            json!({"ID": 1, "Surname": "Smith", "Status": "Active", "Created": "2024-03-01 10:00:00"}),
            json!({"ID": 2, "Surname": "Smithers", "Status": "Archived", "Created": "2024-03-02 09:00:00"}),
            json!({"ID": 3, "Surname": "Jones", "Status": "Active", "Created": "2024-03-01 18:30:00"}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
        DataList::new(model(), records)
    }

    #[test]
    fn test_fields_follow_model_types() {
        let context = SearchContext::for_model(model());
        let fields = context.get_fields();
        assert_eq!(fields.names(), vec!["Surname", "Status", "Created", "Subscribed"]);
        assert!(matches!(
            fields.field_by_name("Status").unwrap().field_type,
            FormFieldType::Dropdown { .. }
        ));
        assert!(matches!(
            fields.field_by_name("Created").unwrap().field_type,
            FormFieldType::Date
        ));
        assert_eq!(context.lookup_for("Surname"), Some(Lookup::PartialMatch));
        assert_eq!(context.lookup_for("Created"), Some(Lookup::StartsWith));
        assert_eq!(context.lookup_for("Status"), Some(Lookup::Exact));
    }

    #[test]
    fn test_default_query_from_model() {
        let context = SearchContext::for_model(model());
        assert_eq!(context.get_default_query()["Status"], "Active");
    }

    #[test]
    fn test_get_results() {
        let context = SearchContext::for_model(model());
        let criteria = json!({"Surname": "smith", "Created": "2024-03-01", "Unknown": "x", "Status": ""});
        let results = context.get_results(&list(), criteria.as_object().unwrap());
        assert_eq!(results.ids(), vec!["1"]);
    }

    #[test]
    fn test_add_and_remove_fields() {
        let mut context = SearchContext::for_model(model());
        context.add_field(FormField::text("Email"), Lookup::EndsWith);
        assert_eq!(context.lookup_for("Email"), Some(Lookup::EndsWith));
        context.remove_field_by_name("Surname");
        assert!(context.lookup_for("Surname").is_none());
        assert!(context.get_fields().field_by_name("Surname").is_none());
        assert!(context.replace_field(FormField::text("Status")));
        assert_eq!(context.lookup_for("Status"), Some(Lookup::Exact));
    }
}
