use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use super::object_id;
use crate::client::{ListIter, ListParams, StripeClient};
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Good,
    Service,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    /// Orders only accept products of type `good`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Attribute names SKUs of this product vary by, e.g. `["size", "color"]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shippable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shippable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/v1/products`
pub struct Products<'a> {
    client: &'a StripeClient,
}

impl StripeClient {
    pub fn products(&self) -> Products<'_> {
        Products { client: self }
    }
}

impl<'a> Products<'a> {
    pub async fn create(&self, params: &CreateProduct) -> ApiResult<Value> {
        params.validate()?;
        self.client.post("/v1/products", params).await
    }

    pub async fn find(&self, product_id: &str) -> ApiResult<Value> {
        let id = object_id(product_id)?;
        self.client.get(&format!("/v1/products/{}", id), &()).await
    }

    pub async fn update(&self, product_id: &str, params: &UpdateProduct) -> ApiResult<Value> {
        let id = object_id(product_id)?;
        self.client.post(&format!("/v1/products/{}", id), params).await
    }

    pub async fn delete(&self, product_id: &str) -> ApiResult<Value> {
        let id = object_id(product_id)?;
        self.client.delete(&format!("/v1/products/{}", id)).await
    }

    pub async fn all(&self, params: &ListParams) -> ApiResult<Value> {
        self.client.get("/v1/products", params).await
    }

    pub fn iter(&self, params: ListParams) -> ListIter {
        self.client.list_iter("/v1/products", params)
    }
}
