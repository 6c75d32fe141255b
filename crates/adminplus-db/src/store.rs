//! Record storage.
//!
//! A [`RecordStore`] owns the records of every registered model and hands out
//! [`DataList`]s over them. [`InMemoryRecordStore`] keeps one table per model
//! class behind a `RwLock` and assigns auto-incrementing `ID`s.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use adminplus_core::{AdminError, AdminResult};

use crate::list::DataList;
use crate::model::ModelClass;

/// A record: a JSON object keyed by field name.
pub type Record = serde_json::Map<String, Value>;

/// The primary-key field present on every record.
pub const ID_FIELD: &str = "ID";

/// Returns a record's `ID` as text.
pub fn record_id(record: &Record) -> Option<String> {
    match record.get(ID_FIELD)? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Storage for model records.
///
/// Lookups by class name fail with [`AdminError::ImproperlyConfigured`] when
/// the model was never registered, and lookups by ID fail with
/// [`AdminError::DoesNotExist`] when no record matches.
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Returns the descriptor of a registered model.
    fn model(&self, class_name: &str) -> AdminResult<Arc<ModelClass>>;

    /// Returns every record of a model as a list.
    fn list(&self, class_name: &str) -> AdminResult<DataList>;

    /// Returns one record.
    fn get(&self, class_name: &str, id: &str) -> AdminResult<Record>;

    /// Inserts a record and returns it with its assigned `ID`.
    fn insert(&self, class_name: &str, data: Record) -> AdminResult<Record>;

    /// Merges `changes` into a record and returns the updated record.
    fn update(&self, class_name: &str, id: &str, changes: &Record) -> AdminResult<Record>;

    /// Deletes a record, returning whether it existed.
    fn delete(&self, class_name: &str, id: &str) -> AdminResult<bool>;
}

#[derive(Debug)]
struct ModelTable {
    model: Arc<ModelClass>,
    records: Vec<Record>,
    next_id: u64,
}

impl ModelTable {
    const fn new(model: Arc<ModelClass>) -> Self {
        Self {
            model,
            records: Vec::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of [`RecordStore`].
///
/// # Examples
///
/// ```
/// use adminplus_db::{FieldType, InMemoryRecordStore, ModelClass, RecordStore};
///
/// let store = InMemoryRecordStore::new();
/// store.register(ModelClass::new("app::Contact").field("Name", FieldType::Varchar));
/// let mut data = serde_json::Map::new();
/// data.insert("Name".into(), "Mark".into());
/// let saved = store.insert("app::Contact", data).unwrap();
/// assert_eq!(saved["ID"], 1);
/// assert_eq!(store.list("app::Contact").unwrap().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    tables: Arc<RwLock<HashMap<String, ModelTable>>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model. Re-registering keeps existing records and replaces
    /// the descriptor.
    pub fn register(&self, model: ModelClass) {
        let model = Arc::new(model);
        tracing::debug!(model = %model.class_name, "registering model");
        if let Ok(mut tables) = self.tables.write() {
            tables
                .entry(model.class_name.clone())
                .and_modify(|t| t.model = Arc::clone(&model))
                .or_insert_with(|| ModelTable::new(model));
        }
    }

    /// Inserts several records, returning them with their IDs.
    pub fn seed<I>(&self, class_name: &str, records: I) -> AdminResult<Vec<Record>>
    where
        I: IntoIterator<Item = Value>,
    {
        records
            .into_iter()
            .map(|value| match value {
                Value::Object(map) => self.insert(class_name, map),
                other => Err(AdminError::StoreError(format!(
                    "Cannot store non-object record {other}"
                ))),
            })
            .collect()
    }

    /// Returns the number of records of a model.
    pub fn count(&self, class_name: &str) -> usize {
        self.tables
            .read()
            .ok()
            .and_then(|tables| tables.get(class_name).map(|t| t.records.len()))
            .unwrap_or(0)
    }

    fn read_table<T>(
        &self,
        class_name: &str,
        f: impl FnOnce(&ModelTable) -> AdminResult<T>,
    ) -> AdminResult<T> {
        let tables = self.tables.read().map_err(poisoned)?;
        let table = tables.get(class_name).ok_or_else(|| unregistered(class_name))?;
        f(table)
    }

    fn write_table<T>(
        &self,
        class_name: &str,
        f: impl FnOnce(&mut ModelTable) -> AdminResult<T>,
    ) -> AdminResult<T> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let table = tables
            .get_mut(class_name)
            .ok_or_else(|| unregistered(class_name))?;
        f(table)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> AdminError {
    AdminError::StoreError("Record store lock poisoned".to_string())
}

fn unregistered(class_name: &str) -> AdminError {
    AdminError::ImproperlyConfigured(format!("Model '{class_name}' is not registered"))
}

fn missing(class_name: &str, id: &str) -> AdminError {
    AdminError::DoesNotExist(format!("{class_name} with ID '{id}'"))
}

impl RecordStore for InMemoryRecordStore {
    fn model(&self, class_name: &str) -> AdminResult<Arc<ModelClass>> {
        self.read_table(class_name, |t| Ok(Arc::clone(&t.model)))
    }

    fn list(&self, class_name: &str) -> AdminResult<DataList> {
        self.read_table(class_name, |t| {
            Ok(DataList::new(Arc::clone(&t.model), t.records.clone()))
        })
    }

    fn get(&self, class_name: &str, id: &str) -> AdminResult<Record> {
        self.read_table(class_name, |t| {
            t.records
                .iter()
                .find(|r| record_id(r).as_deref() == Some(id))
                .cloned()
                .ok_or_else(|| missing(class_name, id))
        })
    }

    fn insert(&self, class_name: &str, mut data: Record) -> AdminResult<Record> {
        self.write_table(class_name, |t| {
            let id = t.next_id;
            t.next_id += 1;
            data.insert(ID_FIELD.to_string(), Value::from(id));
            t.records.push(data.clone());
            Ok(data)
        })
    }

    fn update(&self, class_name: &str, id: &str, changes: &Record) -> AdminResult<Record> {
        self.write_table(class_name, |t| {
            let record = t
                .records
                .iter_mut()
                .find(|r| record_id(r).as_deref() == Some(id))
                .ok_or_else(|| missing(class_name, id))?;
            for (key, value) in changes {
                if key != ID_FIELD {
                    record.insert(key.clone(), value.clone());
                }
            }
            Ok(record.clone())
        })
    }

    fn delete(&self, class_name: &str, id: &str) -> AdminResult<bool> {
        self.write_table(class_name, |t| {
            let before = t.records.len();
            t.records.retain(|r| record_id(r).as_deref() != Some(id));
            let deleted = t.records.len() < before;
            tracing::debug!(model = class_name, id, deleted, "delete record");
            Ok(deleted)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;
    use serde_json::json;

    fn store() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        store.register(ModelClass::new("app::Contact").field("Name", FieldType::Varchar));
        store
            .seed(
                "app::Contact",
                vec![json!({"Name": "Mark"}), json!({"Name": "Jane"})],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_insert_assigns_ids() {
        let store = store();
        assert_eq!(store.count("app::Contact"), 2);
        let jane = store.get("app::Contact", "2").unwrap();
        assert_eq!(jane["Name"], "Jane");
        assert_eq!(record_id(&jane).as_deref(), Some("2"));
    }

    #[test]
    fn test_update_merges_and_keeps_id() {
        let store = store();
        let changes = json!({"Name": "Marcus", "ID": 99}).as_object().cloned().unwrap();
        let updated = store.update("app::Contact", "1", &changes).unwrap();
        assert_eq!(updated["Name"], "Marcus");
        assert_eq!(updated["ID"], 1);
    }

    #[test]
    fn test_delete() {
        let store = store();
        assert!(store.delete("app::Contact", "1").unwrap());
        assert!(!store.delete("app::Contact", "1").unwrap());
        assert!(matches!(
            store.get("app::Contact", "1"),
            Err(AdminError::DoesNotExist(_))
        ));
    }

    #[test]
    fn test_unregistered_model() {
        let store = InMemoryRecordStore::new();
        assert!(matches!(
            store.list("app::Nope"),
            Err(AdminError::ImproperlyConfigured(_))
        ));
        assert_eq!(store.count("app::Nope"), 0);
    }

    #[test]
    fn test_seed_rejects_non_objects() {
        let store = store();
        assert!(store.seed("app::Contact", vec![json!(1)]).is_err());
    }

    #[test]
    fn test_register_again_keeps_records() {
        let store = store();
        store.register(
            ModelClass::new("app::Contact")
                .field("Name", FieldType::Varchar)
                .field("Email", FieldType::Varchar),
        );
        assert_eq!(store.count("app::Contact"), 2);
        assert_eq!(store.model("app::Contact").unwrap().fields.len(), 2);
    }
}
