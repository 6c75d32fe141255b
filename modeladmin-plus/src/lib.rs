//! # modeladmin-plus
//!
//! Search-state persistence, bulk editing, autocomplete search fields and
//! snippet widgets for auto-generated admin grids.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `modeladmin-plus` for everything, or on individual crates for
//! finer-grained control.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use modeladmin_plus::admin::{AdminSite, ModelAdmin};
//! use modeladmin_plus::core::Settings;
//! use modeladmin_plus::db::{InMemoryRecordStore, RecordStore};
//!
//! # async fn serve(store: Arc<InMemoryRecordStore>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut site = AdminSite::new(Settings::default(), store as Arc<dyn RecordStore>);
//! site.register(ModelAdmin::new("contacts").manage("app::Contact"));
//! let router = site.into_axum_router()?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

/// Settings, errors and logging.
pub use adminplus_core as core;

/// Request/response types, query dictionaries, cookies and sessions.
#[cfg(feature = "http")]
pub use adminplus_http as http;

/// Model metadata, record stores and lists.
#[cfg(feature = "db")]
pub use adminplus_db as db;

/// Search form fields, autocomplete sources and field lists.
#[cfg(feature = "forms")]
pub use adminplus_forms as forms;

/// Grid fields, components, search contexts and bulk actions.
#[cfg(feature = "grid")]
pub use adminplus_grid as grid;

/// Model admins, the `ModelAdminPlus` extension, snippets and the admin site.
#[cfg(feature = "admin")]
pub use adminplus_admin as admin;

/// Management commands (CLI).
#[cfg(feature = "cli")]
pub use adminplus_cli as cli;

/// Test client and fixtures.
#[cfg(feature = "testing")]
pub use adminplus_test as test;
