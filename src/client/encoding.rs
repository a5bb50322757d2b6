use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult, ErrorKind};

/// Flattens request parameters into Stripe's bracketed form notation.
///
/// `{"metadata": {"foo": "Bar"}, "items": [{"type": "sku"}]}` becomes
/// `metadata[foo]=Bar` and `items[0][type]=sku`. `null` is sent as an empty
/// string, which Stripe treats as "unset".
pub fn to_form_pairs<T: Serialize + ?Sized>(params: &T) -> ApiResult<Vec<(String, String)>> {
    let value = serde_json::to_value(params).map_err(|e| {
        ApiError::new(
            ErrorKind::InvalidRequest,
            format!("Failed to serialize request parameters: {}", e),
        )
    })?;

    let mut pairs = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten(key, value, &mut pairs);
            }
        }
        Value::Null => {}
        other => {
            return Err(ApiError::new(
                ErrorKind::InvalidRequest,
                format!("Request parameters must be an object, got {}", other),
            ))
        }
    }

    Ok(pairs)
}

fn flatten(prefix: String, value: Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten(format!("{}[{}]", prefix, key), value, pairs);
            }
        }
        Value::Array(items) => {
            for (idx, value) in items.into_iter().enumerate() {
                flatten(format!("{}[{}]", prefix, idx), value, pairs);
            }
        }
        Value::String(s) => pairs.push((prefix, s)),
        Value::Null => pairs.push((prefix, String::new())),
        scalar => pairs.push((prefix, scalar.to_string())),
    }
}
