//! HTTP response types.
//!
//! [`HttpResponse`] is what every admin action returns. [`JsonResponse`] and
//! [`HttpResponseRedirect`] are shortcuts for the two shapes the admin
//! produces most: JSON payloads and `302` redirects.

use axum::response::IntoResponse;
use http::{HeaderMap, HeaderValue, StatusCode};

use adminplus_core::AdminError;

use crate::cookies::Cookie;

/// An HTTP response.
///
/// # Examples
///
/// ```
/// use adminplus_http::HttpResponse;
///
/// let response = HttpResponse::ok("Hello");
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(response.text(), "Hello");
/// ```
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    content_type: String,
}

impl HttpResponse {
    /// Creates a new response with the given status and body.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
            content_type: "text/html; charset=utf-8".to_string(),
        }
    }

    /// Creates a 200 OK response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found(body: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, body)
    }

    /// Creates a 500 Internal Server Error response.
    pub fn server_error(body: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, body)
    }

    /// Builds a JSON error response (`{"error": "..."}`) from an [`AdminError`],
    /// using the error's status code.
    pub fn from_error(error: &AdminError) -> Self {
        let status = StatusCode::from_u16(error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        JsonResponse::with_status(status, &serde_json::json!({ "error": error.to_string() }))
    }

    /// Returns the status code.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Sets the status code.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Returns the response headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the response headers mutably.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns a header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the content type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Sets the content type.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = content_type.into();
    }

    /// Returns the body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, AdminError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Adds a `Set-Cookie` header. Several cookies may be set on one response.
    pub fn set_cookie(&mut self, cookie: &Cookie) {
        if let Ok(value) = HeaderValue::from_str(&cookie.to_set_cookie_header()) {
            self.headers.append(http::header::SET_COOKIE, value);
        }
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response = axum::response::Response::new(axum::body::Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        if let Ok(ct) = HeaderValue::from_str(&self.content_type) {
            headers.insert(http::header::CONTENT_TYPE, ct);
        }
        for (key, value) in &self.headers {
            headers.append(key, value.clone());
        }
        response
    }
}

/// A JSON response.
pub struct JsonResponse;

impl JsonResponse {
    /// Creates a 200 JSON response from a serializable value.
    ///
    /// Serialization failures become a 500 response.
    pub fn new<T: serde::Serialize>(data: &T) -> HttpResponse {
        Self::with_status(StatusCode::OK, data)
    }

    /// Creates a JSON response with a custom status code.
    pub fn with_status<T: serde::Serialize>(status: StatusCode, data: &T) -> HttpResponse {
        match serde_json::to_string(data) {
            Ok(json) => {
                let mut response = HttpResponse::new(status, json);
                response.set_content_type("application/json");
                response
            }
            Err(e) => HttpResponse::server_error(format!("JSON serialization error: {e}")),
        }
    }
}

/// An HTTP redirect response (302 Found).
pub struct HttpResponseRedirect;

impl HttpResponseRedirect {
    /// Creates a 302 Found redirect to the given URL.
    pub fn new(url: &str) -> HttpResponse {
        let mut response = HttpResponse::new(StatusCode::FOUND, "");
        if let Ok(value) = HeaderValue::from_str(url) {
            response.headers.insert(http::header::LOCATION, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response() {
        let response = JsonResponse::new(&serde_json::json!([{"label": "a", "value": "a"}]));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.content_type(), "application/json");
        assert_eq!(response.json().unwrap()[0]["label"], "a");
    }

    #[test]
    fn test_redirect() {
        let response = HttpResponseRedirect::new("/admin/contacts/app-Contact");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.header("location"), Some("/admin/contacts/app-Contact"));
    }

    #[test]
    fn test_from_error_uses_status() {
        let response = HttpResponse::from_error(&AdminError::NotFound("bulk action 'x'".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.json().unwrap();
        assert!(body["error"].as_str().unwrap().contains("bulk action 'x'"));
    }

    #[test]
    fn test_set_cookie_appends() {
        let mut response = HttpResponse::ok("");
        response.set_cookie(&Cookie::new("a", "1"));
        response.set_cookie(&Cookie::new("b", "2"));
        let cookies: Vec<_> = response
            .headers()
            .get_all(http::header::SET_COOKIE)
            .iter()
            .collect();
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn test_into_response_keeps_headers() {
        let mut response = HttpResponseRedirect::new("/x");
        response.set_cookie(&Cookie::new("sessionid", "k"));
        let axum_response = response.into_response();
        assert_eq!(axum_response.status(), StatusCode::FOUND);
        assert_eq!(
            axum_response.headers().get(http::header::LOCATION).unwrap(),
            "/x"
        );
        assert!(axum_response.headers().contains_key(http::header::SET_COOKIE));
    }
}
