use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use super::object_id;
use crate::client::{ListIter, ListParams, StripeClient};
use crate::error::ApiResult;

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateWebhookEndpoint {
    #[validate(url(message = "Webhook URL must be a valid URL"))]
    pub url: String,
    /// Event types to deliver; `["*"]` subscribes to everything.
    #[validate(length(min = 1, message = "At least one event type is required"))]
    pub enabled_events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateWebhookEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Webhook URL must be a valid URL"))]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/v1/webhook_endpoints`
pub struct WebhookEndpoints<'a> {
    client: &'a StripeClient,
}

impl StripeClient {
    pub fn webhook_endpoints(&self) -> WebhookEndpoints<'_> {
        WebhookEndpoints { client: self }
    }
}

impl<'a> WebhookEndpoints<'a> {
    pub async fn create(&self, params: &CreateWebhookEndpoint) -> ApiResult<Value> {
        params.validate()?;
        self.client.post("/v1/webhook_endpoints", params).await
    }

    pub async fn find(&self, endpoint_id: &str) -> ApiResult<Value> {
        let id = object_id(endpoint_id)?;
        self.client
            .get(&format!("/v1/webhook_endpoints/{}", id), &())
            .await
    }

    pub async fn update(
        &self,
        endpoint_id: &str,
        params: &UpdateWebhookEndpoint,
    ) -> ApiResult<Value> {
        params.validate()?;
        let id = object_id(endpoint_id)?;
        self.client
            .post(&format!("/v1/webhook_endpoints/{}", id), params)
            .await
    }

    pub async fn delete(&self, endpoint_id: &str) -> ApiResult<Value> {
        let id = object_id(endpoint_id)?;
        self.client
            .delete(&format!("/v1/webhook_endpoints/{}", id))
            .await
    }

    pub async fn all(&self, params: &ListParams) -> ApiResult<Value> {
        self.client.get("/v1/webhook_endpoints", params).await
    }

    pub fn iter(&self, params: ListParams) -> ListIter {
        self.client.list_iter("/v1/webhook_endpoints", params)
    }
}
