//! The admin site: registry of [`ModelAdmin`]s and the axum router serving
//! them.
//!
//! Every request to a model's pages builds a [`ModelAdminPlus`] around the
//! request and its session. The session is loaded from the session cookie
//! before the handler runs and saved afterwards when the handler changed it,
//! so a stored search survives between requests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use adminplus_core::logging::admin_span;
use adminplus_core::{AdminError, AdminResult, Settings};
use adminplus_db::RecordStore;
use adminplus_http::{
    Cookie, HttpRequest, HttpResponse, InMemorySessionBackend, SameSite, SessionBackend,
};

use crate::extensions::AdminExtensions;
use crate::model_admin::ModelAdmin;
use crate::options::{AdminContext, AdminPlusOptions};
use crate::plus::ModelAdminPlus;
use crate::snippets::SnippetRegistry;

/// Largest request body the admin reads.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// The admin site.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use adminplus_admin::model_admin::ModelAdmin;
/// use adminplus_admin::site::AdminSite;
/// use adminplus_core::Settings;
/// use adminplus_db::{FieldType, InMemoryRecordStore, ModelClass};
///
/// let store = InMemoryRecordStore::new();
/// store.register(ModelClass::new("app::Contact").field("Surname", FieldType::Varchar));
///
/// let mut site = AdminSite::new(Settings::default(), Arc::new(store));
/// site.register(ModelAdmin::new("contacts").manage("app::Contact"));
/// assert!(site.check().is_ok());
/// let _router = site.into_axum_router().unwrap();
/// ```
pub struct AdminSite {
    settings: Arc<Settings>,
    context: AdminContext,
    sessions: Arc<dyn SessionBackend>,
    admins: Vec<ModelAdmin>,
}

impl AdminSite {
    /// Creates a site with in-memory sessions, the built-in snippets and no
    /// hooks.
    pub fn new(settings: Settings, store: Arc<dyn RecordStore>) -> Self {
        let context = AdminContext::new(AdminPlusOptions::from_settings(&settings), store);
        Self {
            settings: Arc::new(settings),
            context,
            sessions: Arc::new(InMemorySessionBackend::new()),
            admins: Vec::new(),
        }
    }

    /// Replaces the session backend.
    #[must_use]
    pub fn session_backend(mut self, backend: Arc<dyn SessionBackend>) -> Self {
        self.sessions = backend;
        self
    }

    /// Replaces the extension hooks.
    #[must_use]
    pub fn extensions(mut self, extensions: AdminExtensions) -> Self {
        self.context.extensions = extensions;
        self
    }

    /// Replaces the snippet registry.
    #[must_use]
    pub fn snippet_registry(mut self, snippets: SnippetRegistry) -> Self {
        self.context.snippets = snippets;
        self
    }

    /// Returns the extension hooks for registration.
    pub fn extensions_mut(&mut self) -> &mut AdminExtensions {
        &mut self.context.extensions
    }

    /// Registers an admin, replacing one with the same URL segment.
    pub fn register(&mut self, admin: ModelAdmin) {
        match self
            .admins
            .iter_mut()
            .find(|a| a.url_segment == admin.url_segment)
        {
            Some(existing) => *existing = admin,
            None => self.admins.push(admin),
        }
    }

    /// Returns the registered admins.
    pub fn admins(&self) -> &[ModelAdmin] {
        &self.admins
    }

    /// Returns the admin mounted at `url_segment`.
    pub fn get_model_admin(&self, url_segment: &str) -> Option<&ModelAdmin> {
        self.admins.iter().find(|a| a.url_segment == url_segment)
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the options read from the settings.
    pub const fn options(&self) -> &AdminPlusOptions {
        &self.context.options
    }

    /// Checks the configuration: every configured snippet is registered,
    /// every admin has a URL segment and every managed model exists in the
    /// store.
    pub fn check(&self) -> AdminResult<()> {
        self.context
            .snippets
            .validate(&self.context.options.registered_snippets)?;
        if self.context.options.page_sizes.is_empty() {
            return Err(AdminError::ImproperlyConfigured(
                "page_sizes must not be empty".to_string(),
            ));
        }
        for admin in &self.admins {
            if admin.url_segment.trim_matches('/').is_empty() {
                return Err(AdminError::ImproperlyConfigured(format!(
                    "admin '{}' has no URL segment",
                    admin.menu_title
                )));
            }
            for class in &admin.managed_models {
                self.context.store.model(class)?;
            }
        }
        Ok(())
    }

    /// Checks the configuration and builds the router, nested under the
    /// admin URL.
    ///
    /// The generated routes are:
    ///
    /// - `GET|POST /{segment}/{model}` - the listing
    /// - `GET /{segment}/{model}/suggest/{n}` - suggestions for search field `n`
    /// - `POST /{segment}/{model}/bulkAction/{action}` - a bulk action
    /// - `GET /{segment}/{model}/export` - the export
    pub fn into_axum_router(self) -> AdminResult<Router> {
        self.check()?;

        let prefix = format!("/{}", self.context.options.admin_url.trim_matches('/'));
        let admins = self
            .admins
            .into_iter()
            .map(|a| (a.url_segment.trim_matches('/').to_string(), Arc::new(a)))
            .collect::<HashMap<_, _>>();
        tracing::info!(admins = admins.len(), prefix = %prefix, "admin site ready");

        let shared = Arc::new(AdminSiteState {
            admins,
            context: Arc::new(self.context),
            sessions: self.sessions,
            cookie_name: self.settings.session_cookie_name.clone(),
            cookie_age: self.settings.session_cookie_age,
        });

        let routes = Router::new()
            .route(
                "/{segment}/{model}",
                get(handle_listing).post(handle_listing),
            )
            .route("/{segment}/{model}/suggest/{n}", get(handle_suggest))
            .route(
                "/{segment}/{model}/bulkAction/{action}",
                post(handle_bulk_action),
            )
            .route("/{segment}/{model}/export", get(handle_export))
            .with_state(shared);

        Ok(if prefix == "/" {
            routes
        } else {
            Router::new().nest(&prefix, routes)
        })
    }
}

impl std::fmt::Debug for AdminSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSite")
            .field("admin_url", &self.context.options.admin_url)
            .field(
                "admins",
                &self
                    .admins
                    .iter()
                    .map(|a| a.url_segment.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Shared state for axum handlers.
struct AdminSiteState {
    admins: HashMap<String, Arc<ModelAdmin>>,
    context: Arc<AdminContext>,
    sessions: Arc<dyn SessionBackend>,
    cookie_name: String,
    cookie_age: u64,
}

impl AdminSiteState {
    fn resolve(&self, segment: &str, model: &str) -> Option<(Arc<ModelAdmin>, String)> {
        let admin = self.admins.get(segment)?;
        let class = admin.managed_class(model)?.to_string();
        Some((Arc::clone(admin), class))
    }
}

#[derive(Debug, Clone)]
enum Endpoint {
    Listing,
    Suggest,
    BulkAction(String),
    Export,
}

// ── Handlers ───────────────────────────────────────────────────────

async fn handle_listing(
    State(state): State<Arc<AdminSiteState>>,
    Path((segment, model)): Path<(String, String)>,
    request: Request,
) -> Response {
    dispatch(&state, &segment, &model, &[], Endpoint::Listing, request).await
}

async fn handle_suggest(
    State(state): State<Arc<AdminSiteState>>,
    Path((segment, model, n)): Path<(String, String, String)>,
    request: Request,
) -> Response {
    dispatch(&state, &segment, &model, &[("n", &n)], Endpoint::Suggest, request).await
}

async fn handle_bulk_action(
    State(state): State<Arc<AdminSiteState>>,
    Path((segment, model, action)): Path<(String, String, String)>,
    request: Request,
) -> Response {
    let endpoint = Endpoint::BulkAction(action.clone());
    dispatch(&state, &segment, &model, &[("action", &action)], endpoint, request).await
}

async fn handle_export(
    State(state): State<Arc<AdminSiteState>>,
    Path((segment, model)): Path<(String, String)>,
    request: Request,
) -> Response {
    dispatch(&state, &segment, &model, &[], Endpoint::Export, request).await
}

async fn dispatch(
    state: &AdminSiteState,
    segment: &str,
    model: &str,
    params: &[(&str, &str)],
    endpoint: Endpoint,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let error = AdminError::BadRequest(format!("unreadable body: {e}"));
            return HttpResponse::from_error(&error).into_response();
        }
    };
    let mut request = HttpRequest::from_axum(parts, &bytes);
    for (name, value) in params {
        request.set_param(*name, *value);
    }

    let Some((admin, class)) = state.resolve(segment, model) else {
        let error = AdminError::NotFound(format!("no admin for '{segment}/{model}'"));
        return HttpResponse::from_error(&error).into_response();
    };

    let cookie_key = request.cookie(&state.cookie_name).map(String::from);
    let session = state.sessions.load_or_create(cookie_key.as_deref()).await;
    request.set_session(session);

    let mut plus = ModelAdminPlus::new(admin, Arc::clone(&state.context), class, request);
    let mut response = admin_span(segment, model)
        .in_scope(|| run_endpoint(&mut plus, &endpoint))
        .unwrap_or_else(|e| {
            tracing::warn!(segment, model, error = %e, "admin request failed");
            HttpResponse::from_error(&e)
        });

    let session = plus.into_request().into_session();
    if session.modified {
        match state.sessions.save(&session).await {
            Ok(key) => response.set_cookie(
                &Cookie::new(&state.cookie_name, key)
                    .max_age(state.cookie_age)
                    .httponly(true)
                    .samesite(SameSite::Lax),
            ),
            Err(e) => tracing::error!(error = %e, "failed to save session"),
        }
    }
    response.into_response()
}

fn run_endpoint(plus: &mut ModelAdminPlus, endpoint: &Endpoint) -> AdminResult<HttpResponse> {
    if let Some(redirect) = plus.init()? {
        return Ok(redirect);
    }
    match endpoint {
        Endpoint::Listing => plus.listing(),
        Endpoint::Suggest => plus.suggest(),
        Endpoint::BulkAction(action) => plus.bulk_action(action),
        Endpoint::Export => plus.export(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminplus_core::SnippetEntry;
    use adminplus_db::{FieldType, InMemoryRecordStore, ModelClass};

    fn store() -> Arc<InMemoryRecordStore> {
        let store = InMemoryRecordStore::new();
        store.register(ModelClass::new("app::Contact").field("Surname", FieldType::Varchar));
        Arc::new(store)
    }

    #[test]
    fn test_register_replaces_segment() {
        let mut site = AdminSite::new(Settings::default(), store());
        site.register(ModelAdmin::new("contacts").manage("app::Contact"));
        site.register(ModelAdmin::new("contacts").menu_title("People"));
        assert_eq!(site.admins().len(), 1);
        assert_eq!(site.get_model_admin("contacts").unwrap().menu_title, "People");
    }

    #[test]
    fn test_check_unknown_model() {
        let mut site = AdminSite::new(Settings::default(), store());
        site.register(ModelAdmin::new("companies").manage("app::Company"));
        assert!(matches!(
            site.check(),
            Err(AdminError::ImproperlyConfigured(_))
        ));
    }

    #[test]
    fn test_check_unknown_snippet() {
        let mut settings = Settings::default();
        settings
            .model_admin_plus
            .registered_snippets
            .push(SnippetEntry::Global("nope".into()));
        let site = AdminSite::new(settings, store());
        assert!(site.check().is_err());
        assert!(site.into_axum_router().is_err());
    }

    #[test]
    fn test_check_empty_segment() {
        let mut site = AdminSite::new(Settings::default(), store());
        site.register(ModelAdmin::new("/"));
        assert!(site.check().is_err());
    }

    #[test]
    fn test_debug() {
        let mut site = AdminSite::new(Settings::default(), store());
        site.register(ModelAdmin::new("contacts"));
        let debug = format!("{site:?}");
        assert!(debug.contains("AdminSite"));
        assert!(debug.contains("contacts"));
    }
}
