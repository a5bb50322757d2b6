use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use super::object_id;
use crate::client::{ListIter, ListParams, StripeClient};
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InventoryType {
    Finite,
    Bucket,
    Infinite,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Inventory {
    #[serde(rename = "type")]
    pub inventory_type: InventoryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    /// Bucket level: `in_stock`, `limited` or `out_of_stock`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Inventory {
    pub fn finite(quantity: u64) -> Self {
        Self {
            inventory_type: InventoryType::Finite,
            quantity: Some(quantity),
            value: None,
        }
    }

    pub fn infinite() -> Self {
        Self {
            inventory_type: InventoryType::Infinite,
            quantity: None,
            value: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateSku {
    pub product: String,
    #[validate(length(min = 3, max = 3, message = "Currency must be 3 characters"))]
    pub currency: String,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,
    pub inventory: Inventory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateSku {
    pub fn new(
        product: impl Into<String>,
        currency: impl Into<String>,
        price: i64,
        inventory: Inventory,
    ) -> Self {
        Self {
            product: product.into(),
            currency: currency.into(),
            price,
            inventory,
            id: None,
            attributes: None,
            active: None,
            metadata: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateSku {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Inventory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/v1/skus`
pub struct Skus<'a> {
    client: &'a StripeClient,
}

impl StripeClient {
    pub fn skus(&self) -> Skus<'_> {
        Skus { client: self }
    }
}

impl<'a> Skus<'a> {
    pub async fn create(&self, params: &CreateSku) -> ApiResult<Value> {
        params.validate()?;
        self.client.post("/v1/skus", params).await
    }

    pub async fn find(&self, sku_id: &str) -> ApiResult<Value> {
        let id = object_id(sku_id)?;
        self.client.get(&format!("/v1/skus/{}", id), &()).await
    }

    pub async fn update(&self, sku_id: &str, params: &UpdateSku) -> ApiResult<Value> {
        params.validate()?;
        let id = object_id(sku_id)?;
        self.client.post(&format!("/v1/skus/{}", id), params).await
    }

    pub async fn delete(&self, sku_id: &str) -> ApiResult<Value> {
        let id = object_id(sku_id)?;
        self.client.delete(&format!("/v1/skus/{}", id)).await
    }

    pub async fn all(&self, params: &ListParams) -> ApiResult<Value> {
        self.client.get("/v1/skus", params).await
    }

    pub fn iter(&self, params: ListParams) -> ListIter {
        self.client.list_iter("/v1/skus", params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_sku_body() {
        let params = CreateSku::new("prod_123", "usd", 1500, Inventory::finite(500));

        assert!(params.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "product": "prod_123",
                "currency": "usd",
                "price": 1500,
                "inventory": {"type": "finite", "quantity": 500}
            })
        );
    }
}
