//! Errors raised by backend calls and the session store.

use std::fmt;

// =========================================================
// Error kinds
// =========================================================

/// What went wrong with a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request could not be assembled (bad header, unserializable body)
    RequestBuild,
    /// Transport failure: offline, CORS, DNS
    Network,
    /// The backend answered with a non-2xx status
    Status,
    /// The response body did not match the expected shape
    Serialization,
    /// The session could not be written to durable storage
    Storage,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::RequestBuild => "REQUEST_BUILD_FAILED",
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Status => "HTTP_STATUS",
            ApiErrorKind::Serialization => "RESPONSE_PARSE_ERROR",
            ApiErrorKind::Storage => "SESSION_STORAGE_FAILED",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_code())
    }
}

// =========================================================
// Operation trace
// =========================================================

/// One step of the operation trace, e.g. `applications.update_status(12)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    pub operation: String,
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

struct Trace<'a>(&'a [ErrorSpan]);

impl fmt::Display for Trace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, " | trace: ")?;
        for (i, span) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", span.operation)?;
            if let Some(detail) = &span.detail {
                write!(f, "({})", detail)?;
            }
        }
        Ok(())
    }
}

// =========================================================
// Core error type
// =========================================================

/// Failure of a single accessor call.
///
/// Carries the kind, the HTTP status when there was one, the message to show,
/// the underlying error and the chain of operations it passed through.
#[derive(Debug, thiserror::Error)]
#[error("[{kind}] {message}{}", Trace(.spans))]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn request_build(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::RequestBuild, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Serialization, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Storage, message)
    }

    /// Non-2xx response. `body` is searched for the backend's `message`/`error` field.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = backend_message(body)
            .unwrap_or_else(|| format!("request failed with status {}", status));
        Self {
            status: Some(status),
            ..Self::new(ApiErrorKind::Status, message)
        }
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }

    /// Text suitable for an inline error message.
    pub fn user_message(&self) -> String {
        match self.kind {
            ApiErrorKind::Status => self.message.clone(),
            ApiErrorKind::Network => "Could not reach the server. Check your connection.".to_string(),
            ApiErrorKind::RequestBuild | ApiErrorKind::Serialization => {
                "Unexpected response from the server.".to_string()
            }
            ApiErrorKind::Storage => {
                "Could not save your session. Check that browser storage is enabled.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::serialization(e.to_string()).with_source(e)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Pulls `message` (or `error`) out of a JSON error body.
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key)?.as_str().map(str::to_string))
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_prefer_backend_message() {
        let e = ApiError::from_status(400, r#"{"message":"National ID already registered"}"#);
        assert_eq!(e.status, Some(400));
        assert_eq!(e.user_message(), "National ID already registered");

        let e = ApiError::from_status(409, r#"{"error":"Email taken"}"#);
        assert_eq!(e.user_message(), "Email taken");

        let e = ApiError::from_status(500, "<html>oops</html>");
        assert_eq!(e.user_message(), "request failed with status 500");
    }

    #[test]
    fn display_includes_trace() {
        let e = ApiError::network("offline")
            .in_op("http.send")
            .in_op_with("applications.update_status", "12");
        assert_eq!(
            e.to_string(),
            "[NETWORK_ERROR] offline | trace: http.send -> applications.update_status(12)"
        );
        assert_eq!(e.spans().len(), 2);
    }

    #[test]
    fn unauthorized_statuses() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(ApiError::from_status(403, "").is_unauthorized());
        assert!(!ApiError::from_status(404, "").is_unauthorized());
        assert!(!ApiError::network("x").is_unauthorized());
    }

    #[test]
    fn storage_errors_explain_themselves() {
        let e = ApiError::storage("token not persisted").in_op("session.login");
        assert_eq!(e.error_code(), "SESSION_STORAGE_FAILED");
        assert!(e.user_message().contains("browser storage"));
    }

    #[test]
    fn json_errors_keep_their_source() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e: ApiError = err.into();
        assert_eq!(e.kind, ApiErrorKind::Serialization);
        assert!(std::error::Error::source(&e).is_some());
    }
}
