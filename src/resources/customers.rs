use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use super::object_id;
use crate::client::{ListIter, ListParams, StripeClient};
use crate::error::ApiResult;

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CustomerParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 350, message = "Description too long"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Payment source token, e.g. `tok_visa`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/v1/customers`
pub struct Customers<'a> {
    client: &'a StripeClient,
}

impl StripeClient {
    pub fn customers(&self) -> Customers<'_> {
        Customers { client: self }
    }
}

impl<'a> Customers<'a> {
    pub async fn create(&self, params: &CustomerParams) -> ApiResult<Value> {
        params.validate()?;
        self.client.post("/v1/customers", params).await
    }

    pub async fn find(&self, customer_id: &str) -> ApiResult<Value> {
        let id = object_id(customer_id)?;
        self.client.get(&format!("/v1/customers/{}", id), &()).await
    }

    pub async fn update(&self, customer_id: &str, params: &CustomerParams) -> ApiResult<Value> {
        params.validate()?;
        let id = object_id(customer_id)?;
        self.client.post(&format!("/v1/customers/{}", id), params).await
    }

    pub async fn delete(&self, customer_id: &str) -> ApiResult<Value> {
        let id = object_id(customer_id)?;
        self.client.delete(&format!("/v1/customers/{}", id)).await
    }

    pub async fn all(&self, params: &ListParams) -> ApiResult<Value> {
        self.client.get("/v1/customers", params).await
    }

    pub fn iter(&self, params: ListParams) -> ListIter {
        self.client.list_iter("/v1/customers", params)
    }
}
