//! # adminplus-db
//!
//! The data side of modeladmin-plus. Models are described at runtime by a
//! [`ModelClass`]; records are JSON objects. A [`DataList`] is an immutable,
//! cheaply cloned view over a model's records that can be filtered, sorted and
//! paged. A [`RecordStore`] owns the records and hands out lists.
//!
//! ## Modules
//!
//! - [`model`] - Model-class descriptors and field types
//! - [`lookup`] - Filter lookups (`Field:PartialMatch` style modifiers)
//! - [`list`] - [`DataList`]
//! - [`store`] - [`RecordStore`] trait and the in-memory implementation

pub mod list;
pub mod lookup;
pub mod model;
pub mod store;

pub use list::DataList;
pub use lookup::{FilterSpec, Lookup};
pub use model::{FieldType, ModelClass, ModelField};
pub use store::{record_id, InMemoryRecordStore, Record, RecordStore, ID_FIELD};
