use serde::Serialize;
use serde_json::{Map, Value};

use super::object_id;
use crate::client::StripeClient;
use crate::error::ApiResult;

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCapability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Capabilities of a connected account, `/v1/accounts/{account}/capabilities`.
pub struct Capabilities<'a> {
    client: &'a StripeClient,
}

impl<'a> Capabilities<'a> {
    pub(crate) fn new(client: &'a StripeClient) -> Self {
        Self { client }
    }

    pub async fn find(&self, account_id: &str, capability: &str) -> ApiResult<Value> {
        let path = capability_path(account_id, capability)?;
        self.client.get(&path, &()).await
    }

    pub async fn update(
        &self,
        account_id: &str,
        capability: &str,
        params: &UpdateCapability,
    ) -> ApiResult<Value> {
        let path = capability_path(account_id, capability)?;
        self.client.post(&path, params).await
    }

    pub async fn all(&self, account_id: &str) -> ApiResult<Value> {
        let account = object_id(account_id)?;
        self.client
            .get(&format!("/v1/accounts/{}/capabilities", account), &())
            .await
    }
}

fn capability_path(account_id: &str, capability: &str) -> ApiResult<String> {
    Ok(format!(
        "/v1/accounts/{}/capabilities/{}",
        object_id(account_id)?,
        object_id(capability)?
    ))
}
