use serde_json::Value;

use super::object_id;
use crate::client::{ListIter, ListParams, StripeClient};
use crate::error::ApiResult;

/// `/v1/order_returns`, created through [`super::Orders::return_items`].
pub struct OrderReturns<'a> {
    client: &'a StripeClient,
}

impl StripeClient {
    pub fn order_returns(&self) -> OrderReturns<'_> {
        OrderReturns { client: self }
    }
}

impl<'a> OrderReturns<'a> {
    pub async fn find(&self, return_id: &str) -> ApiResult<Value> {
        let id = object_id(return_id)?;
        self.client.get(&format!("/v1/order_returns/{}", id), &()).await
    }

    pub async fn all(&self, params: &ListParams) -> ApiResult<Value> {
        self.client.get("/v1/order_returns", params).await
    }

    pub fn iter(&self, params: ListParams) -> ListIter {
        self.client.list_iter("/v1/order_returns", params)
    }
}
