use std::fmt;

use thiserror::Error;

/// Closed taxonomy of failures surfaced by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidRequest,
    Authentication,
    Card,
    PermissionDenied,
    NotFound,
    RateLimit,
    Idempotency,
    ApiConnection,
    ServerError,
    MalformedResponse,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Card => "card",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Idempotency => "idempotency",
            ErrorKind::ApiConnection => "api_connection",
            ErrorKind::ServerError => "server_error",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed API call. Every façade call yields either a payload or exactly one of these.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} error: {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    /// `None` when no HTTP response was received (transport or client-side validation failure).
    pub http_status: Option<u16>,
    pub raw_type: Option<String>,
    pub param: Option<String>,
    pub code: Option<String>,
    pub request_id: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: None,
            raw_type: None,
            param: None,
            code: None,
            request_id: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::new(ErrorKind::ApiConnection, err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::new(
            ErrorKind::InvalidRequest,
            format!("Invalid request parameters: {}", err),
        )
    }
}

/// Failures raised below the HTTP status line: DNS, TLS, timeouts, resets.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Webhook signature verification failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookError {
    #[error("Missing or malformed signature header: {0}")]
    MalformedHeader(String),

    #[error("No signature matched the expected signature for the payload")]
    SignatureMismatch,

    #[error("Timestamp outside the tolerance zone ({0}s)")]
    TimestampOutOfTolerance(i64),

    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    #[error("HMAC initialization failed: {0}")]
    Hmac(String),
}

/// Maps a Stripe error `type` and HTTP status to one [`ErrorKind`].
///
/// The `type` is authoritative when it is recognized. For
/// `invalid_request_error` the status disambiguates, so a 404 carrying that
/// type is a [`ErrorKind::NotFound`]. Unrecognized or absent types fall back
/// to the status table.
pub fn map_error(raw_type: Option<&str>, status: u16) -> ErrorKind {
    match raw_type {
        Some("idempotency_error") => ErrorKind::Idempotency,
        Some("card_error") => ErrorKind::Card,
        Some("rate_limit_error") => ErrorKind::RateLimit,
        Some("authentication_error") => ErrorKind::Authentication,
        Some("api_connection_error") => ErrorKind::ApiConnection,
        Some("api_error") => ErrorKind::ServerError,
        Some("invalid_request_error") => match status_kind(status) {
            kind @ (ErrorKind::Authentication
            | ErrorKind::PermissionDenied
            | ErrorKind::NotFound
            | ErrorKind::RateLimit) => kind,
            _ => ErrorKind::InvalidRequest,
        },
        _ => status_kind(status),
    }
}

/// Status-only lookup.
pub fn status_kind(status: u16) -> ErrorKind {
    match status {
        400 => ErrorKind::InvalidRequest,
        401 => ErrorKind::Authentication,
        402 => ErrorKind::Card,
        403 => ErrorKind::PermissionDenied,
        404 => ErrorKind::NotFound,
        429 => ErrorKind::RateLimit,
        500..=599 => ErrorKind::ServerError,
        _ => ErrorKind::Unknown,
    }
}

/// Returns the status-derived kind when it disagrees with the kind picked by
/// [`map_error`]. Statuses without a specific kind never conflict.
pub fn kind_conflict(raw_type: Option<&str>, status: u16) -> Option<ErrorKind> {
    let from_status = status_kind(status);
    if from_status == ErrorKind::Unknown {
        return None;
    }

    let mapped = map_error(raw_type, status);
    (mapped != from_status).then_some(from_status)
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(map_error(None, 400), ErrorKind::InvalidRequest);
        assert_eq!(map_error(None, 401), ErrorKind::Authentication);
        assert_eq!(map_error(None, 402), ErrorKind::Card);
        assert_eq!(map_error(None, 403), ErrorKind::PermissionDenied);
        assert_eq!(map_error(None, 404), ErrorKind::NotFound);
        assert_eq!(map_error(None, 429), ErrorKind::RateLimit);
        assert_eq!(map_error(None, 500), ErrorKind::ServerError);
        assert_eq!(map_error(None, 503), ErrorKind::ServerError);
        assert_eq!(map_error(None, 418), ErrorKind::Unknown);
        assert_eq!(map_error(None, 302), ErrorKind::Unknown);
    }

    #[test]
    fn test_invalid_request_type_uses_status() {
        assert_eq!(
            map_error(Some("invalid_request_error"), 404),
            ErrorKind::NotFound
        );
        assert_eq!(
            map_error(Some("invalid_request_error"), 400),
            ErrorKind::InvalidRequest
        );
        assert_eq!(
            map_error(Some("invalid_request_error"), 409),
            ErrorKind::InvalidRequest
        );
    }

    #[test]
    fn test_type_takes_precedence() {
        assert_eq!(map_error(Some("idempotency_error"), 400), ErrorKind::Idempotency);
        assert_eq!(map_error(Some("idempotency_error"), 409), ErrorKind::Idempotency);
        assert_eq!(map_error(Some("card_error"), 402), ErrorKind::Card);
        assert_eq!(map_error(Some("api_error"), 500), ErrorKind::ServerError);
        assert_eq!(map_error(Some("rate_limit_error"), 429), ErrorKind::RateLimit);
    }

    #[test]
    fn test_unrecognized_type_falls_back_to_status() {
        assert_eq!(map_error(Some("brand_new_error"), 403), ErrorKind::PermissionDenied);
        assert_eq!(map_error(Some("brand_new_error"), 418), ErrorKind::Unknown);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let types = [
            None,
            Some("invalid_request_error"),
            Some("card_error"),
            Some("idempotency_error"),
            Some("api_error"),
            Some("whatever"),
        ];
        for raw_type in types {
            for status in 100..600u16 {
                assert_eq!(map_error(raw_type, status), map_error(raw_type, status));
            }
        }
    }

    #[test]
    fn test_kind_conflict() {
        assert_eq!(kind_conflict(Some("card_error"), 402), None);
        assert_eq!(kind_conflict(Some("invalid_request_error"), 404), None);
        assert_eq!(
            kind_conflict(Some("card_error"), 500),
            Some(ErrorKind::ServerError)
        );
        assert_eq!(kind_conflict(Some("idempotency_error"), 409), None);
    }

    #[test]
    fn test_transport_error_maps_to_api_connection() {
        let err: ApiError = TransportError::Connection("reset by peer".to_string()).into();

        assert_eq!(err.kind, ErrorKind::ApiConnection);
        assert!(err.http_status.is_none());
        assert!(err.message.contains("reset by peer"));
    }
}
