use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use super::{object_id, Capabilities};
use crate::client::{ListIter, ListParams, StripeClient};
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Standard,
    Express,
    Custom,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Individual,
    Company,
    NonProfit,
    GovernmentEntity,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateAccount {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 2, message = "Country must be a two-letter code"))]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_capabilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Parameters without a typed field, sent as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_capabilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/v1/accounts` (Connect accounts) and `/v1/account` (the caller's own account).
pub struct Accounts<'a> {
    client: &'a StripeClient,
}

impl StripeClient {
    pub fn account(&self) -> Accounts<'_> {
        Accounts { client: self }
    }
}

impl<'a> Accounts<'a> {
    pub async fn create(&self, params: &CreateAccount) -> ApiResult<Value> {
        params.validate()?;
        self.client.post("/v1/accounts", params).await
    }

    /// The account owning the API key.
    pub async fn current(&self) -> ApiResult<Value> {
        self.client.get("/v1/account", &()).await
    }

    pub async fn find(&self, account_id: &str) -> ApiResult<Value> {
        let id = object_id(account_id)?;
        self.client.get(&format!("/v1/accounts/{}", id), &()).await
    }

    pub async fn update(&self, account_id: &str, params: &UpdateAccount) -> ApiResult<Value> {
        params.validate()?;
        let id = object_id(account_id)?;
        self.client.post(&format!("/v1/accounts/{}", id), params).await
    }

    pub async fn delete(&self, account_id: &str) -> ApiResult<Value> {
        let id = object_id(account_id)?;
        self.client.delete(&format!("/v1/accounts/{}", id)).await
    }

    pub async fn all(&self, params: &ListParams) -> ApiResult<Value> {
        self.client.get("/v1/accounts", params).await
    }

    pub fn iter(&self, params: ListParams) -> ListIter {
        self.client.list_iter("/v1/accounts", params)
    }

    pub fn capabilities(&self) -> Capabilities<'a> {
        Capabilities::new(self.client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_account_serializes_type() {
        let params = CreateAccount {
            account_type: Some(AccountType::Custom),
            email: Some("jane@example.com".to_string()),
            requested_capabilities: Some(vec!["card_payments".to_string(), "transfers".to_string()]),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "type": "custom",
                "email": "jane@example.com",
                "requested_capabilities": ["card_payments", "transfers"]
            })
        );
    }

    #[test]
    fn test_create_account_rejects_bad_email() {
        let params = CreateAccount {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };

        assert!(params.validate().is_err());
    }
}
