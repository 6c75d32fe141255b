//! # adminplus-http
//!
//! HTTP layer for modeladmin-plus. Provides the request and response types the
//! admin works with, form/query parameter dictionaries, cookie helpers, and the
//! session framework that keeps search state between requests.
//!
//! ## Modules
//!
//! - [`querydict`] - Ordered multi-value parameter dictionary
//! - [`request`] - [`HttpRequest`] with GET/POST data, route params, and session
//! - [`response`] - [`HttpResponse`] and convenience constructors
//! - [`cookies`] - Cookie parsing and `Set-Cookie` formatting
//! - [`session`] - Session data and pluggable session backends

pub mod cookies;
pub mod querydict;
pub mod request;
pub mod response;
pub mod session;

pub use cookies::{parse_cookie_header, Cookie, SameSite};
pub use querydict::QueryDict;
pub use request::{HttpRequest, HttpRequestBuilder};
pub use response::{HttpResponse, HttpResponseRedirect, JsonResponse};
pub use session::{generate_session_key, InMemorySessionBackend, SessionBackend, SessionData};
