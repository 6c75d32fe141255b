//! Core error type for modeladmin-plus.
//!
//! [`AdminError`] covers the HTTP-facing failures of the admin, record lookup
//! failures, configuration problems and serialization errors. Every variant maps
//! to an HTTP status code via [`AdminError::status_code`].

use thiserror::Error;

/// The primary error type for modeladmin-plus.
#[derive(Error, Debug)]
pub enum AdminError {
    // ── HTTP errors ──────────────────────────────────────────────────

    /// HTTP 400 Bad Request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// HTTP 403 Forbidden / Permission Denied.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// HTTP 404 Not Found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 405 Method Not Allowed.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// HTTP 500 Internal Server Error.
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    // ── Records ──────────────────────────────────────────────────────

    /// A record lookup by identifier found nothing.
    #[error("Record does not exist: {0}")]
    DoesNotExist(String),

    /// The record store rejected an operation.
    #[error("Store error: {0}")]
    StoreError(String),

    // ── Sessions ─────────────────────────────────────────────────────

    /// The session backend failed to load or save a session.
    #[error("Session error: {0}")]
    SessionError(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The admin is improperly configured (unknown snippet, unmanaged model, ...).
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AdminError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `BadRequest` -> 400
    /// - `PermissionDenied` -> 403
    /// - `NotFound`, `DoesNotExist` -> 404
    /// - `MethodNotAllowed` -> 405
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::PermissionDenied(_) => 403,
            Self::NotFound(_) | Self::DoesNotExist(_) => 404,
            Self::MethodNotAllowed(_) => 405,
            Self::InternalServerError(_)
            | Self::StoreError(_)
            | Self::SessionError(_)
            | Self::ConfigurationError(_)
            | Self::ImproperlyConfigured(_)
            | Self::SerializationError(_)
            | Self::IoError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, AdminError>`.
pub type AdminResult<T> = Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_error_status_codes() {
        assert_eq!(AdminError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(AdminError::PermissionDenied("x".into()).status_code(), 403);
        assert_eq!(AdminError::NotFound("x".into()).status_code(), 404);
        assert_eq!(AdminError::DoesNotExist("x".into()).status_code(), 404);
        assert_eq!(AdminError::MethodNotAllowed("x".into()).status_code(), 405);
        assert_eq!(AdminError::SessionError("x".into()).status_code(), 500);
        assert_eq!(
            AdminError::ImproperlyConfigured("x".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::NotFound("contact".into());
        assert_eq!(err.to_string(), "Not found: contact");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: AdminError = io_err.into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AdminError = json_err.into();
        assert!(matches!(err, AdminError::SerializationError(_)));
    }
}
