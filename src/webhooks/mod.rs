use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

use crate::error::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Default maximum age of a signed webhook, in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

const SIGNATURE_SCHEME: &str = "v1";

pub struct WebhookVerifier;

impl WebhookVerifier {
    /// Verifies a `Stripe-Signature` header and parses the event payload.
    pub fn construct_event(
        payload: &[u8],
        signature_header: &str,
        secret: &str,
    ) -> Result<Value, WebhookError> {
        Self::construct_event_at(
            payload,
            signature_header,
            secret,
            DEFAULT_TOLERANCE_SECS,
            Utc::now().timestamp(),
        )
    }

    /// Like [`WebhookVerifier::construct_event`] with an explicit tolerance and clock.
    pub fn construct_event_at(
        payload: &[u8],
        signature_header: &str,
        secret: &str,
        tolerance_secs: i64,
        now: i64,
    ) -> Result<Value, WebhookError> {
        Self::verify_signature(payload, signature_header, secret, tolerance_secs, now)?;

        serde_json::from_slice(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
    }

    /// Header format: `t=<unix timestamp>,v1=<hex hmac>[,v1=...][,v0=...]`.
    /// The signed payload is `"{t}.{payload}"`.
    pub fn verify_signature(
        payload: &[u8],
        signature_header: &str,
        secret: &str,
        tolerance_secs: i64,
        now: i64,
    ) -> Result<(), WebhookError> {
        let (timestamp, signatures) = parse_header(signature_header)?;

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| WebhookError::Hmac(e.to_string()))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);

        let matched = signatures.iter().any(|candidate| {
            hex::decode(candidate)
                .map(|bytes| mac.clone().verify_slice(&bytes).is_ok())
                .unwrap_or(false)
        });
        if !matched {
            return Err(WebhookError::SignatureMismatch);
        }

        if tolerance_secs > 0 && now.abs_diff(timestamp) > tolerance_secs.unsigned_abs() {
            return Err(WebhookError::TimestampOutOfTolerance(tolerance_secs));
        }

        Ok(())
    }

    /// Builds a header value for `payload`, as Stripe would send it.
    pub fn sign(payload: &[u8], secret: &str, timestamp: i64) -> Result<String, WebhookError> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| WebhookError::Hmac(e.to_string()))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);

        let signature = hex::encode(mac.finalize().into_bytes());
        Ok(format!("t={},{}={}", timestamp, SIGNATURE_SCHEME, signature))
    }
}

fn parse_header(header: &str) -> Result<(i64, Vec<&str>), WebhookError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                let parsed = value.parse::<i64>().map_err(|_| {
                    WebhookError::MalformedHeader(format!("invalid timestamp {:?}", value))
                })?;
                timestamp = Some(parsed);
            }
            SIGNATURE_SCHEME => signatures.push(value),
            _ => {}
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| WebhookError::MalformedHeader("no timestamp".to_string()))?;
    if signatures.is_empty() {
        return Err(WebhookError::MalformedHeader(format!(
            "no {} signatures",
            SIGNATURE_SCHEME
        )));
    }

    Ok((timestamp, signatures))
}
