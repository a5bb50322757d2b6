use serde::Deserialize;
use serde_json::Value;

use crate::error::{kind_conflict, map_error, ApiError, ApiResult, ErrorKind};
use crate::transport::HttpResponse;

/// Upper bound on raw body text copied into an error message.
pub const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: Option<String>,
    param: Option<String>,
    code: Option<String>,
}

/// Decodes a raw response body into a JSON value, or the error it describes.
pub fn decode(raw: &[u8], status: u16) -> ApiResult<Value> {
    if (200..300).contains(&status) {
        return serde_json::from_slice(raw).map_err(|e| {
            tracing::error!(status, "Failed to parse Stripe response: {}", e);
            ApiError::malformed(format!("Failed to parse response: {}", e)).with_status(status)
        });
    }

    match serde_json::from_slice::<ErrorEnvelope>(raw) {
        Ok(envelope) => Err(error_from_body(envelope.error, status)),
        Err(_) => {
            let text = String::from_utf8_lossy(raw);
            Err(ApiError::new(ErrorKind::Unknown, truncate(&text, MAX_ERROR_BODY_CHARS))
                .with_status(status))
        }
    }
}

/// [`decode`] plus the `Request-Id` header on failures.
pub fn decode_response(response: &HttpResponse) -> ApiResult<Value> {
    decode(&response.body, response.status)
        .map_err(|e| e.with_request_id(response.header("request-id").map(str::to_string)))
}

fn error_from_body(body: ErrorBody, status: u16) -> ApiError {
    let raw_type = body.error_type.as_deref();
    let kind = map_error(raw_type, status);

    if let Some(from_status) = kind_conflict(raw_type, status) {
        tracing::warn!(
            status,
            error_type = raw_type.unwrap_or_default(),
            mapped = %kind,
            status_kind = %from_status,
            "Stripe error type disagrees with HTTP status"
        );
    }

    let message = body
        .message
        .unwrap_or_else(|| format!("Stripe API error (HTTP {})", status));

    ApiError {
        kind,
        message,
        http_status: Some(status),
        raw_type: body.error_type,
        param: body.param,
        code: body.code,
        request_id: None,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
