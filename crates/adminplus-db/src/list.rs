//! Filterable record lists.

use std::sync::Arc;

use serde_json::Value;

use adminplus_core::AdminResult;

use crate::lookup::{compare_values, FilterSpec, Lookup};
use crate::model::ModelClass;
use crate::store::{record_id, Record};

/// An immutable list of records of one model.
///
/// Every narrowing operation returns a new list and leaves the original
/// untouched. Clones share the record buffer.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use adminplus_db::{DataList, FieldType, ModelClass};
///
/// let model = Arc::new(ModelClass::new("app::Contact").field("Name", FieldType::Varchar));
/// let records = vec![
///     serde_json::json!({"ID": 1, "Name": "Mark"}).as_object().cloned().unwrap(),
///     serde_json::json!({"ID": 2, "Name": "Jane"}).as_object().cloned().unwrap(),
/// ];
/// let list = DataList::new(model, records);
///
/// let mut filter = serde_json::Map::new();
/// filter.insert("Name:PartialMatch".into(), "ar".into());
/// let marks = list.filter(&filter).unwrap();
/// assert_eq!(marks.count(), 1);
/// assert_eq!(list.count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DataList {
    model: Arc<ModelClass>,
    records: Arc<Vec<Record>>,
}

impl DataList {
    /// Creates a list over the given records.
    pub fn new(model: Arc<ModelClass>, records: Vec<Record>) -> Self {
        Self {
            model,
            records: Arc::new(records),
        }
    }

    fn derive(&self, records: Vec<Record>) -> Self {
        Self::new(Arc::clone(&self.model), records)
    }

    /// Returns the model descriptor.
    pub fn model(&self) -> &ModelClass {
        &self.model
    }

    /// Returns the shared model descriptor.
    pub fn model_arc(&self) -> Arc<ModelClass> {
        Arc::clone(&self.model)
    }

    /// Returns the model's class name.
    pub fn data_class(&self) -> &str {
        &self.model.class_name
    }

    /// Narrows the list to records matching every criterion.
    ///
    /// Keys take the `Field[:Modifier]` form understood by [`FilterSpec::parse`].
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed key.
    pub fn filter(&self, criteria: &serde_json::Map<String, Value>) -> AdminResult<Self> {
        let specs = criteria
            .iter()
            .map(|(key, value)| FilterSpec::parse(key, value.clone()))
            .collect::<AdminResult<Vec<_>>>()?;
        Ok(self.filter_specs(&specs))
    }

    /// Narrows the list to records matching every parsed criterion.
    pub fn filter_specs(&self, specs: &[FilterSpec]) -> Self {
        if specs.is_empty() {
            return self.clone();
        }
        self.derive(
            self.records
                .iter()
                .filter(|r| specs.iter().all(|s| s.matches(r)))
                .cloned()
                .collect(),
        )
    }

    /// Narrows the list to records where any of `fields` matches `needle` with `lookup`.
    pub fn filter_any(&self, fields: &[String], lookup: Lookup, needle: &Value) -> Self {
        self.derive(
            self.records
                .iter()
                .filter(|r| fields.iter().any(|f| lookup.matches(r.get(f), needle)))
                .cloned()
                .collect(),
        )
    }

    /// Sorts by a field, ascending or descending. Sorting is stable.
    #[must_use]
    pub fn sort(&self, field: &str, descending: bool) -> Self {
        let mut records = self.records.as_ref().clone();
        records.sort_by(|a, b| {
            let ord = match (a.get(field), b.get(field)) {
                (Some(x), Some(y)) => compare_values(x, y),
                (None, Some(_)) => std::cmp::Ordering::Less,
                (Some(_), None) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        self.derive(records)
    }

    /// Sorts by a `Field` or `-Field` specification.
    #[must_use]
    pub fn sort_spec(&self, spec: &str) -> Self {
        spec.strip_prefix('-')
            .map_or_else(|| self.sort(spec, false), |field| self.sort(field, true))
    }

    /// Returns at most `length` records starting at `offset`.
    #[must_use]
    pub fn limit(&self, offset: usize, length: usize) -> Self {
        self.derive(
            self.records
                .iter()
                .skip(offset)
                .take(length)
                .cloned()
                .collect(),
        )
    }

    /// Returns the number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the list holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns the first record.
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Finds a record by `ID`.
    pub fn by_id(&self, id: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| record_id(r).as_deref() == Some(id))
    }

    /// Returns the `ID`s of every record.
    pub fn ids(&self) -> Vec<String> {
        self.records.iter().filter_map(record_id).collect()
    }

    /// Returns the values of one field, `null` where absent.
    pub fn column(&self, field: &str) -> Vec<Value> {
        self.records
            .iter()
            .map(|r| r.get(field).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Copies the records out.
    pub fn to_vec(&self) -> Vec<Record> {
        self.records.as_ref().clone()
    }
}

impl<'a> IntoIterator for &'a DataList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
