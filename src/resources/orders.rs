use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use super::object_id;
use crate::client::{ListIter, ListParams, StripeClient};
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderItemType {
    Sku,
    Tax,
    Shipping,
    Discount,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    Paid,
    Canceled,
    Fulfilled,
    Returned,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderItem {
    #[serde(rename = "type")]
    pub item_type: OrderItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OrderItem {
    pub fn sku(parent: impl Into<String>) -> Self {
        Self {
            item_type: OrderItemType::Sku,
            parent: Some(parent.into()),
            quantity: None,
            amount: None,
            currency: None,
            description: None,
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateOrder {
    #[validate(length(min = 3, max = 3, message = "Currency must be 3 characters"))]
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_shipping_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct PayOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Application fee cannot be negative"))]
    pub application_fee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct ReturnItems<'p> {
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'p [OrderItem]>,
}

/// `/v1/orders`
pub struct Orders<'a> {
    client: &'a StripeClient,
}

impl StripeClient {
    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }
}

impl<'a> Orders<'a> {
    pub async fn create(&self, params: &CreateOrder) -> ApiResult<Value> {
        params.validate()?;
        self.client.post("/v1/orders", params).await
    }

    pub async fn find(&self, order_id: &str) -> ApiResult<Value> {
        let id = object_id(order_id)?;
        self.client.get(&format!("/v1/orders/{}", id), &()).await
    }

    pub async fn update(&self, order_id: &str, params: &UpdateOrder) -> ApiResult<Value> {
        let id = object_id(order_id)?;
        self.client.post(&format!("/v1/orders/{}", id), params).await
    }

    pub async fn pay(&self, order_id: &str, params: &PayOrder) -> ApiResult<Value> {
        params.validate()?;
        let id = object_id(order_id)?;
        self.client.post(&format!("/v1/orders/{}/pay", id), params).await
    }

    /// Returns the given items, or every item of the order when `items` is `None`.
    pub async fn return_items(
        &self,
        order_id: &str,
        items: Option<&[OrderItem]>,
    ) -> ApiResult<Value> {
        let id = object_id(order_id)?;
        self.client
            .post(&format!("/v1/orders/{}/returns", id), &ReturnItems { items })
            .await
    }

    pub async fn all(&self, params: &ListParams) -> ApiResult<Value> {
        self.client.get("/v1/orders", params).await
    }

    pub fn iter(&self, params: ListParams) -> ListIter {
        self.client.list_iter("/v1/orders", params)
    }
}
