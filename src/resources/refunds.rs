use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use super::object_id;
use crate::client::{ListIter, ListParams, StripeClient};
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RefundReason {
    Duplicate,
    Fraudulent,
    RequestedByCustomer,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateRefund {
    /// Amount in the smallest currency unit; `None` refunds the full charge.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Refund amount must be positive"))]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RefundReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_application_fee: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_transfer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRefund {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct RefundBody<'p> {
    charge: &'p str,
    #[serde(flatten)]
    params: &'p CreateRefund,
}

/// `/v1/refunds`
pub struct Refunds<'a> {
    client: &'a StripeClient,
}

impl StripeClient {
    pub fn refunds(&self) -> Refunds<'_> {
        Refunds { client: self }
    }
}

impl<'a> Refunds<'a> {
    pub async fn create(&self, charge_id: &str, params: &CreateRefund) -> ApiResult<Value> {
        params.validate()?;
        let charge = object_id(charge_id)?;
        self.client
            .post("/v1/refunds", &RefundBody { charge, params })
            .await
    }

    pub async fn find(&self, refund_id: &str) -> ApiResult<Value> {
        let id = object_id(refund_id)?;
        self.client.get(&format!("/v1/refunds/{}", id), &()).await
    }

    pub async fn update(&self, refund_id: &str, params: &UpdateRefund) -> ApiResult<Value> {
        let id = object_id(refund_id)?;
        self.client.post(&format!("/v1/refunds/{}", id), params).await
    }

    pub async fn all(&self, params: &ListParams) -> ApiResult<Value> {
        self.client.get("/v1/refunds", params).await
    }

    pub fn iter(&self, params: ListParams) -> ListIter {
        self.client.list_iter("/v1/refunds", params)
    }
}
