//! Model fixtures.
//!
//! A contact model with text, enum, date and datetime fields, and a store
//! seeded with four contacts. Three are `Active`; the model's default search
//! filter shows only those.

use std::sync::Arc;

use serde_json::json;

use adminplus_db::{FieldType, InMemoryRecordStore, ModelClass};

/// Class name of the contact model.
pub const CONTACT_CLASS: &str = "app::Contact";

/// The contact model.
pub fn contact_model() -> ModelClass {
    ModelClass::new(CONTACT_CLASS)
        .field("FirstName", FieldType::Varchar)
        .field("Surname", FieldType::Varchar)
        .field("Email", FieldType::Varchar)
        .field(
            "Status",
            FieldType::Enum(vec!["Active".into(), "Archived".into()]),
        )
        .field("Created", FieldType::Date)
        .field("LastLogin", FieldType::Datetime)
        .summary_fields(["FirstName", "Surname", "Email", "Created", "LastLogin"])
        .searchable_fields(["Surname", "Email", "Status"])
        .default_filter("Status", json!("Active"))
        .default_sort("Surname")
}

/// A store holding the contact model and four contacts, with IDs 1 to 4.
pub fn contact_store() -> Arc<InMemoryRecordStore> {
    let store = InMemoryRecordStore::new();
    store.register(contact_model());
    store
        .seed(
            CONTACT_CLASS,
            vec![
                json!({"FirstName": "Anna", "Surname": "Smith", "Email": "anna@example.com",
                       "Status": "Active", "Created": "2024-03-01", "LastLogin": "2024-05-02 09:30:00"}),
                json!({"FirstName": "Ben", "Surname": "Jones", "Email": "ben@example.com",
                       "Status": "Active", "Created": "2024-03-15", "LastLogin": "2024-05-10 17:05:00"}),
                json!({"FirstName": "Cara", "Surname": "Smithers", "Email": "cara@example.com",
                       "Status": "Archived", "Created": "2023-11-20", "LastLogin": "2024-01-04 08:00:00"}),
                json!({"FirstName": "Dev", "Surname": "Brown", "Email": "dev@example.com",
                       "Status": "Active", "Created": "2024-04-09", "LastLogin": "2024-05-11 12:45:00"}),
            ],
        )
        .expect("contact fixtures should seed");
    Arc::new(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminplus_db::RecordStore;

    #[test]
    fn test_contact_store() {
        let store = contact_store();
        assert_eq!(store.count(CONTACT_CLASS), 4);
        let list = store.list(CONTACT_CLASS).unwrap();
        assert_eq!(list.ids(), vec!["1", "2", "3", "4"]);
        assert_eq!(store.model(CONTACT_CLASS).unwrap().short_name(), "Contact");
    }
}
