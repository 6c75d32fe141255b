//! HTTP request type.
//!
//! [`HttpRequest`] carries the method, path, headers, GET and POST parameters,
//! the route parameters matched by the router, and the user's session.

use std::collections::HashMap;

use http::{HeaderMap, Method};

use crate::cookies;
use crate::querydict::QueryDict;
use crate::session::SessionData;

/// An HTTP request as seen by the admin.
///
/// # Examples
///
/// ```
/// use adminplus_http::HttpRequest;
///
/// let request = HttpRequest::builder()
///     .method(http::Method::GET)
///     .path("/admin/contacts/app-Contact")
///     .query_string("clear=1")
///     .build();
///
/// assert_eq!(request.get_vars().get("clear"), Some("1"));
/// assert!(request.post_vars().is_empty());
/// ```
#[derive(Debug)]
pub struct HttpRequest {
    method: Method,
    path: String,
    query_string: String,
    content_type: Option<String>,
    get: QueryDict,
    post: QueryDict,
    headers: HeaderMap,
    params: HashMap<String, String>,
    session: SessionData,
    cached_cookies: std::sync::OnceLock<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new [`HttpRequestBuilder`] for constructing an `HttpRequest`.
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// Creates an `HttpRequest` from an axum request head and its body bytes.
    ///
    /// The session starts empty; the caller attaches the loaded session with
    /// [`HttpRequest::set_session`].
    pub fn from_axum(parts: http::request::Parts, body: &[u8]) -> Self {
        let query_string = parts.uri.query().unwrap_or("").to_string();
        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let post = parse_form_body(content_type.as_deref(), body);

        Self {
            method: parts.method,
            path: parts.uri.path().to_string(),
            get: QueryDict::parse(&query_string),
            query_string,
            content_type,
            post,
            headers: parts.headers,
            params: HashMap::new(),
            session: SessionData::default(),
            cached_cookies: std::sync::OnceLock::new(),
        }
    }

    /// Returns the HTTP method.
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string (without the leading `?`).
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Returns the content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the request headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the GET parameters.
    pub const fn get_vars(&self) -> &QueryDict {
        &self.get
    }

    /// Returns the POST parameters.
    pub const fn post_vars(&self) -> &QueryDict {
        &self.post
    }

    /// Returns a route parameter captured by the router.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Sets a route parameter.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Returns the session attached to this request.
    pub const fn session(&self) -> &SessionData {
        &self.session
    }

    /// Returns the session mutably.
    pub fn session_mut(&mut self) -> &mut SessionData {
        &mut self.session
    }

    /// Replaces the session attached to this request.
    pub fn set_session(&mut self, session: SessionData) {
        self.session = session;
    }

    /// Consumes the request and returns its session.
    pub fn into_session(self) -> SessionData {
        self.session
    }

    /// Returns the parsed cookies. The `Cookie` header is parsed once.
    pub fn cookies(&self) -> &HashMap<String, String> {
        self.cached_cookies.get_or_init(|| {
            self.headers
                .get(http::header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .map(cookies::parse_cookie_header)
                .unwrap_or_default()
        })
    }

    /// Returns a single cookie value.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies().get(name).map(String::as_str)
    }

    /// Returns `true` if the request was made with `X-Requested-With: XMLHttpRequest`.
    pub fn is_ajax(&self) -> bool {
        self.headers
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "XMLHttpRequest")
    }
}

fn parse_form_body(content_type: Option<&str>, body: &[u8]) -> QueryDict {
    if content_type.is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded")) {
        QueryDict::parse(&String::from_utf8_lossy(body))
    } else {
        QueryDict::new()
    }
}

/// Builder for constructing [`HttpRequest`] instances in tests.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: Method,
    path: String,
    query_string: String,
    content_type: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
    post: Option<QueryDict>,
    params: HashMap<String, String>,
    session: Option<SessionData>,
}

impl Default for HttpRequestBuilder {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query_string: String::new(),
            content_type: None,
            headers: HeaderMap::new(),
            body: Vec::new(),
            post: None,
            params: HashMap::new(),
            session: None,
        }
    }
}

impl HttpRequestBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Sets the query string (without leading `?`).
    #[must_use]
    pub fn query_string(mut self, qs: &str) -> Self {
        self.query_string = qs.to_string();
        self
    }

    /// Sets the content type.
    #[must_use]
    pub fn content_type(mut self, ct: &str) -> Self {
        self.content_type = Some(ct.to_string());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::header::HeaderName::from_bytes(name.as_bytes()),
            http::header::HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Sets the POST parameters directly, bypassing body parsing.
    #[must_use]
    pub fn post(mut self, post: QueryDict) -> Self {
        self.method = Method::POST;
        self.post = Some(post);
        self
    }

    /// Sets a route parameter.
    #[must_use]
    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Attaches a session.
    #[must_use]
    pub fn session(mut self, session: SessionData) -> Self {
        self.session = Some(session);
        self
    }

    /// Builds the [`HttpRequest`].
    pub fn build(self) -> HttpRequest {
        let post = self
            .post
            .unwrap_or_else(|| parse_form_body(self.content_type.as_deref(), &self.body));

        HttpRequest {
            method: self.method,
            path: self.path,
            get: QueryDict::parse(&self.query_string),
            query_string: self.query_string,
            content_type: self.content_type,
            post,
            headers: self.headers,
            params: self.params,
            session: self.session.unwrap_or_default(),
            cached_cookies: std::sync::OnceLock::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = HttpRequest::builder().build();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/");
        assert!(request.get_vars().is_empty());
        assert!(request.post_vars().is_empty());
        assert!(request.session().is_empty());
    }

    #[test]
    fn test_form_body_parsed_as_post() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .content_type("application/x-www-form-urlencoded")
            .body(b"filter%5BName%5D=Mark".to_vec())
            .build();
        assert!(request.post_vars().contains_root("filter"));
    }

    #[test]
    fn test_json_body_not_parsed_as_post() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .content_type("application/json")
            .body(b"{\"a\":1}".to_vec())
            .build();
        assert!(request.post_vars().is_empty());
    }

    #[test]
    fn test_params_and_session() {
        let mut session = SessionData::new("k".into());
        session.set("x", serde_json::json!(true));
        let mut request = HttpRequest::builder()
            .param("n", "Email")
            .session(session)
            .build();
        assert_eq!(request.param("n"), Some("Email"));
        assert!(request.param("missing").is_none());
        request.session_mut().remove("x");
        assert!(request.into_session().is_empty());
    }

    #[test]
    fn test_cookies() {
        let request = HttpRequest::builder()
            .header("cookie", "sessionid=abc; other=1")
            .build();
        assert_eq!(request.cookie("sessionid"), Some("abc"));
        assert!(request.cookie("nope").is_none());
    }

    #[test]
    fn test_from_axum() {
        let (parts, ()) = http::Request::builder()
            .method("POST")
            .uri("/admin/contacts/app-Contact?gridState-app-Contact-0=%7B%7D")
            .header("content-type", "application/x-www-form-urlencoded")
            .header("x-requested-with", "XMLHttpRequest")
            .body(())
            .unwrap()
            .into_parts();
        let request = HttpRequest::from_axum(parts, b"records%5B%5D=1&records%5B%5D=2");
        assert_eq!(request.path(), "/admin/contacts/app-Contact");
        assert!(request.get_vars().contains_key("gridState-app-Contact-0"));
        assert_eq!(request.post_vars().get_list("records[]"), vec!["1", "2"]);
        assert!(request.is_ajax());
    }
}
