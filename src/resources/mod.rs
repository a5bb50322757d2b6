//! Per-resource method groups, each borrowed from a [`crate::StripeClient`].
//!
//! Every operation returns the decoded JSON object as a [`serde_json::Value`]
//! or exactly one [`crate::ApiError`].

mod accounts;
mod capabilities;
mod customers;
mod order_returns;
mod orders;
mod products;
mod refunds;
mod skus;
mod webhook_endpoints;

pub use accounts::*;
pub use capabilities::*;
pub use customers::*;
pub use order_returns::*;
pub use orders::*;
pub use products::*;
pub use refunds::*;
pub use skus::*;
pub use webhook_endpoints::*;

use crate::error::{ApiError, ApiResult, ErrorKind};

/// Accepts only ids that stay a single path segment: ASCII alphanumerics, `_`,
/// `-` and `.`, excluding the dot segments `.` and `..`.
pub(crate) fn object_id(id: &str) -> ApiResult<&str> {
    let valid = !id.is_empty()
        && id != "."
        && id != ".."
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if !valid {
        return Err(ApiError::new(
            ErrorKind::InvalidRequest,
            format!("Invalid object id: {:?}", id),
        ));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        assert_eq!(object_id("or_123").unwrap(), "or_123");
        assert_eq!(object_id("card_payments").unwrap(), "card_payments");
        assert_eq!(object_id("sku-blue.large").unwrap(), "sku-blue.large");

        let rejected = [
            "", "   ", " or_123 ", "or_1/pay", ".", "..", "x?expand=y", "x#frag", "or_1%2F",
        ];
        for id in rejected {
            assert_eq!(
                object_id(id).unwrap_err().kind,
                ErrorKind::InvalidRequest,
                "{:?}",
                id
            );
        }
    }
}
