//! HTTP test client.
//!
//! [`TestClient`] sends simulated requests through an axum router without
//! opening a socket. Cookies set by responses are kept and sent with later
//! requests, so a session started by one request carries over to the next.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use adminplus_test::client::TestClient;
//! use axum::Router;
//! use axum::routing::get;
//!
//! async fn example() {
//!     let app = Router::new().route("/hello", get(|| async { "Hello" }));
//!     let mut client = TestClient::new(app);
//!
//!     let response = client.get("/hello").await;
//!     assert_eq!(response.status_code(), 200);
//!     assert_eq!(response.text(), "Hello");
//! }
//! ```

use std::collections::HashMap;

use axum::body::{Body, Bytes};
use axum::Router;
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use adminplus_core::AdminError;

/// A test client wrapping an axum router.
pub struct TestClient {
    app: Router,
    cookies: HashMap<String, String>,
}

impl TestClient {
    /// Creates a client with an empty cookie jar.
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookies: HashMap::new(),
        }
    }

    /// Sends a GET request. `path` may carry a query string.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    /// Sends a GET request with `params` encoded as the query string.
    pub async fn get_with(&mut self, path: &str, params: &[(&str, &str)]) -> TestResponse {
        let query = encode_form(params);
        let uri = if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        };
        self.get(&uri).await
    }

    /// Sends a POST request with URL-encoded form data. Keys may repeat.
    pub async fn post(&mut self, path: &str, data: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, path, Some(encode_form(data).into_bytes()))
            .await
    }

    /// Sets a cookie sent with subsequent requests.
    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    /// Returns a cookie from the jar.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Clears the cookie jar.
    pub fn clear_cookies(&mut self) {
        self.cookies.clear();
    }

    fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    async fn send(&mut self, method: Method, path: &str, body: Option<Vec<u8>>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if body.is_some() {
            builder = builder.header("content-type", "application/x-www-form-urlencoded");
        }
        if let Some(cookie) = self.cookie_header() {
            builder = builder.header("cookie", cookie);
        }
        let req = builder
            .body(body.map_or_else(Body::empty, Body::from))
            .expect("request builder should not fail");

        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("router should not error");

        let status = response.status();
        let headers = response.headers().clone();

        let mut response_cookies = HashMap::new();
        for value in headers.get_all(http::header::SET_COOKIE) {
            let Ok(cookie_str) = value.to_str() else {
                continue;
            };
            if let Some((name, val)) = cookie_str.split(';').next().and_then(|p| p.split_once('=')) {
                let name = name.trim().to_string();
                let val = val.trim().to_string();
                self.cookies.insert(name.clone(), val.clone());
                response_cookies.insert(name, val);
            }
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_or_else(|_| Bytes::new(), http_body_util::Collected::to_bytes);

        TestResponse {
            status,
            headers,
            body: body.to_vec(),
            cookies: response_cookies,
        }
    }
}

impl std::fmt::Debug for TestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClient")
            .field("cookies", &self.cookies)
            .finish_non_exhaustive()
    }
}

fn encode_form(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// The response to a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The raw body.
    pub body: Vec<u8>,
    /// Cookies set by the response.
    pub cookies: HashMap<String, String>,
}

impl TestResponse {
    /// Returns the body as text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Deserializes the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, AdminError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| AdminError::SerializationError(e.to_string()))
    }

    /// Returns the numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns `true` if the body contains `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.text().contains(text)
    }
}
