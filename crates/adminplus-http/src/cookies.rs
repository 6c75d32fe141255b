//! Cookie handling: parsing the `Cookie` request header and formatting
//! `Set-Cookie` response headers. The session cookie is the only cookie the
//! admin itself sets.

use std::collections::HashMap;
use std::fmt;

/// The `SameSite` attribute for cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Cookies are sent with same-site requests only.
    Strict,
    /// Cookies are sent with top-level navigations.
    Lax,
    /// Cookies are sent with all requests (requires Secure).
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "Strict"),
            Self::Lax => write!(f, "Lax"),
            Self::None => write!(f, "None"),
        }
    }
}

/// A cookie to be set on an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// The cookie name.
    pub name: String,
    /// The cookie value.
    pub value: String,
    /// Maximum age in seconds. `None` means session cookie.
    pub max_age: Option<u64>,
    /// The path for which the cookie is valid.
    pub path: String,
    /// Whether the cookie should only be sent over HTTPS.
    pub secure: bool,
    /// Whether the cookie is inaccessible to JavaScript.
    pub httponly: bool,
    /// The `SameSite` attribute.
    pub samesite: Option<SameSite>,
}

impl Cookie {
    /// Creates a new cookie with the given name and value, and sensible defaults.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age: None,
            path: "/".to_string(),
            secure: false,
            httponly: false,
            samesite: None,
        }
    }

    /// Sets the max age.
    #[must_use]
    pub const fn max_age(mut self, max_age: u64) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Sets the path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the secure flag.
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets the httponly flag.
    #[must_use]
    pub const fn httponly(mut self, httponly: bool) -> Self {
        self.httponly = httponly;
        self
    }

    /// Sets the `SameSite` attribute.
    #[must_use]
    pub const fn samesite(mut self, samesite: SameSite) -> Self {
        self.samesite = Some(samesite);
        self
    }

    /// Formats this cookie as a `Set-Cookie` header value.
    pub fn to_set_cookie_header(&self) -> String {
        let mut parts = vec![format!("{}={}", self.name, self.value)];

        if let Some(max_age) = self.max_age {
            parts.push(format!("Max-Age={max_age}"));
        }

        parts.push(format!("Path={}", self.path));

        if self.secure {
            parts.push("Secure".to_string());
        }

        if self.httponly {
            parts.push("HttpOnly".to_string());
        }

        if let Some(samesite) = self.samesite {
            parts.push(format!("SameSite={samesite}"));
        }

        parts.join("; ")
    }
}

/// Parses a `Cookie` header value into a map of name-value pairs.
///
/// Malformed entries (no `=`) are skipped.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for part in header.split(';') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some((name, value)) = trimmed.split_once('=') {
            let name = name.trim();
            if !name.is_empty() {
                cookies.insert(name.to_string(), value.trim().to_string());
            }
        }
    }

    cookies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_header() {
        let cookies = parse_cookie_header("sessionid=abc123; theme=dark");
        assert_eq!(cookies.get("sessionid").map(String::as_str), Some("abc123"));
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn test_parse_cookie_header_malformed() {
        let cookies = parse_cookie_header("broken; ; =nothing; ok=1");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("ok").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_set_cookie_header_defaults() {
        let cookie = Cookie::new("sessionid", "abc");
        assert_eq!(cookie.to_set_cookie_header(), "sessionid=abc; Path=/");
    }

    #[test]
    fn test_set_cookie_header_all_attributes() {
        let cookie = Cookie::new("sessionid", "abc")
            .max_age(3600)
            .path("/admin")
            .secure(true)
            .httponly(true)
            .samesite(SameSite::Lax);
        assert_eq!(
            cookie.to_set_cookie_header(),
            "sessionid=abc; Max-Age=3600; Path=/admin; Secure; HttpOnly; SameSite=Lax"
        );
    }
}
