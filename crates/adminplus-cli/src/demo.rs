//! The demo site served by `runserver`: a contact admin over an in-memory
//! store, with the surname search field turned into an autocomplete field.

use std::sync::Arc;

use serde_json::json;

use adminplus_admin::extensions::AdminExtensions;
use adminplus_admin::model_admin::ModelAdmin;
use adminplus_admin::site::AdminSite;
use adminplus_core::{AdminResult, Settings};
use adminplus_db::{FieldType, InMemoryRecordStore, ModelClass, RecordStore};
use adminplus_forms::{AutoCompleteSource, FormField};
use adminplus_grid::SearchContext;

/// Class name of the demo model.
pub const DEMO_CLASS: &str = "demo::Contact";

/// The demo contact model.
pub fn demo_model() -> ModelClass {
    ModelClass::new(DEMO_CLASS)
        .field("FirstName", FieldType::Varchar)
        .field("Surname", FieldType::Varchar)
        .field("Email", FieldType::Varchar)
        .field(
            "Status",
            FieldType::Enum(vec!["Active".into(), "Archived".into()]),
        )
        .field("Created", FieldType::Date)
        .summary_fields(["FirstName", "Surname", "Email", "Status", "Created"])
        .searchable_fields(["Surname", "Email", "Status"])
        .default_filter("Status", json!("Active"))
        .default_sort("Surname")
}

/// Creates the demo store with the contact model and a few contacts.
pub fn demo_store() -> AdminResult<Arc<InMemoryRecordStore>> {
    let store = InMemoryRecordStore::new();
    store.register(demo_model());
    let people = [
        ("Ada", "Lovelace", "Active", "2024-01-10"),
        ("Alan", "Turing", "Active", "2024-02-02"),
        ("Grace", "Hopper", "Archived", "2023-12-24"),
        ("Edsger", "Dijkstra", "Active", "2024-03-18"),
        ("Barbara", "Liskov", "Active", "2024-04-01"),
    ];
    store.seed(
        DEMO_CLASS,
        people.iter().map(|(first, surname, status, created)| {
            json!({
                "FirstName": first,
                "Surname": surname,
                "Email": format!("{}@example.com", first.to_lowercase()),
                "Status": status,
                "Created": created,
            })
        }),
    )?;
    Ok(Arc::new(store))
}

/// Hooks that turn the demo model's `Surname` search field into an
/// autocomplete field over every contact.
pub fn demo_extensions(store: Arc<InMemoryRecordStore>) -> AdminExtensions {
    let mut extensions = AdminExtensions::new();
    extensions.update_search_context.connect(
        "demo.surname-autocomplete",
        Arc::new(move |ctx: &mut SearchContext| {
            if ctx.model().class_name != DEMO_CLASS {
                return;
            }
            match store.list(DEMO_CLASS) {
                Ok(list) => {
                    let field = FormField::autocomplete("Surname", AutoCompleteSource::new(list, "Surname"))
                        .with_label("Surname");
                    ctx.replace_field(field);
                }
                Err(e) => tracing::warn!(error = %e, "cannot build surname suggestions"),
            }
        }),
    );
    extensions
}

/// Builds the demo site.
pub fn demo_site(settings: Settings) -> AdminResult<AdminSite> {
    let store = demo_store()?;
    let mut site = AdminSite::new(settings, Arc::clone(&store) as Arc<dyn RecordStore>)
        .extensions(demo_extensions(store));
    site.register(
        ModelAdmin::new("contacts")
            .menu_title("Contacts")
            .manage(DEMO_CLASS),
    );
    Ok(site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminplus_forms::FormFieldType;

    #[test]
    fn test_demo_site_checks() {
        let site = demo_site(Settings::default()).unwrap();
        assert!(site.check().is_ok());
        assert_eq!(site.admins()[0].managed_models, vec![DEMO_CLASS]);
    }

    #[test]
    fn test_surname_becomes_autocomplete() {
        let store = demo_store().unwrap();
        let extensions = demo_extensions(Arc::clone(&store));
        let mut context = SearchContext::for_model(store.model(DEMO_CLASS).unwrap());
        extensions.update_search_context.run(&mut context);

        let surname = context.get_fields().field_by_name("Surname").unwrap();
        assert!(matches!(surname.field_type, FormFieldType::AutoComplete(_)));
        assert!(surname.supports_suggest());
    }

    #[test]
    fn test_other_models_untouched() {
        let store = demo_store().unwrap();
        let extensions = demo_extensions(Arc::clone(&store));
        let other = Arc::new(ModelClass::new("demo::Company").field("Surname", FieldType::Varchar));
        let mut context = SearchContext::for_model(other);
        extensions.update_search_context.run(&mut context);
        let surname = context.get_fields().field_by_name("Surname").unwrap();
        assert!(!matches!(surname.field_type, FormFieldType::AutoComplete(_)));
    }
}
