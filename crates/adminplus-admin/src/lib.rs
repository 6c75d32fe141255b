//! # adminplus-admin
//!
//! `ModelAdminPlus` and the admin site. An admin section keeps each user's
//! search criteria in their session, opens with a default search filter,
//! shows configured snippets above its grid, lets the page size be picked,
//! answers autocomplete suggestions for search fields and edits records in
//! bulk.
//!
//! ## Modules
//!
//! - [`model_admin`] - The base [`ModelAdmin`] and its defaults
//! - [`plus`] - [`ModelAdminPlus`], the per-request admin
//! - [`snippets`] - Snippet trait, registry and built-in snippets
//! - [`extensions`] - Hooks that adjust snippets, export fields and search
//! - [`options`] - Options read from settings, shared by every request
//! - [`site`] - [`AdminSite`] and its axum router

pub mod extensions;
pub mod model_admin;
pub mod options;
pub mod plus;
pub mod site;
pub mod snippets;

pub use extensions::{AdminExtensions, Hook, HookCallback};
pub use model_admin::ModelAdmin;
pub use options::{AdminContext, AdminPlusOptions};
pub use plus::ModelAdminPlus;
pub use site::AdminSite;
pub use snippets::{
    applicable_snippets, ActiveFiltersSnippet, ModelAdminSnippet, RecordCountSnippet,
    SnippetConstructor, SnippetRegistry,
};
