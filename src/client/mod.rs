mod decode;
mod encoding;
mod pagination;

pub use decode::{decode, decode_response, MAX_ERROR_BODY_CHARS};
pub use encoding::to_form_pairs;
pub use pagination::{ListIter, ListParams, Page};

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpRequest, RequestBody, ReqwestTransport, Transport};

const USER_AGENT: &str = concat!("stripe-client-rust/", env!("CARGO_PKG_VERSION"));

/// Per-request header overrides. Idempotency keys are always caller-supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub idempotency_key: Option<String>,
    /// Connected account to act on behalf of (`Stripe-Account`).
    pub stripe_account: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    pub fn stripe_account(mut self, account: impl Into<String>) -> Self {
        self.stripe_account = Some(account.into());
        self
    }
}

#[derive(Clone)]
pub struct StripeClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    options: RequestOptions,
}

impl StripeClient {
    /// Builds a client backed by [`ReqwestTransport`].
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            options: RequestOptions::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a client sharing this one's config and transport whose requests
    /// carry `options`.
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            options,
        }
    }

    pub async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> ApiResult<Value> {
        let query = to_form_pairs(query)?;
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, params: &B) -> ApiResult<Value> {
        let form = to_form_pairs(params)?;
        self.request(Method::POST, path, Vec::new(), Some(RequestBody::Form(form)))
            .await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::DELETE, path, Vec::new(), None).await
    }

    /// Lazily iterates every item of the list endpoint at `path`.
    pub fn list_iter(&self, path: impl Into<String>, params: ListParams) -> ListIter {
        ListIter::new(self.clone(), path, params)
    }

    pub(crate) fn build_request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<RequestBody>,
    ) -> HttpRequest {
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.api_key),
            ),
            ("Stripe-Version".to_string(), self.config.api_version.clone()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];

        if method == Method::POST {
            if let Some(key) = &self.options.idempotency_key {
                headers.push(("Idempotency-Key".to_string(), key.clone()));
            }
        }

        if let Some(account) = &self.options.stripe_account {
            headers.push(("Stripe-Account".to_string(), account.clone()));
        }

        HttpRequest {
            method,
            url: format!("{}{}", self.config.base_url, path),
            query,
            headers,
            body,
        }
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<RequestBody>,
    ) -> ApiResult<Value> {
        let request = self.build_request(method.clone(), path, query, body);

        tracing::debug!(method = %method, path, "Sending Stripe request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!(method = %method, path, "Stripe transport failure: {}", e);
            ApiError::from(e)
        })?;

        decode_response(&response).map_err(|e| {
            tracing::warn!(
                method = %method,
                path,
                status = response.status,
                kind = %e.kind,
                request_id = e.request_id.as_deref().unwrap_or_default(),
                "Stripe API error: {}",
                e.message
            );
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transport::HttpResponse;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Connection("unreachable".to_string()))
        }
    }

    #[derive(Default)]
    struct Recording {
        requests: std::sync::Mutex<Vec<HttpRequest>>,
    }

    #[async_trait]
    impl Transport for Recording {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            Ok(HttpResponse::new(200, r#"{"id":"or_1"}"#))
        }
    }

    fn client() -> StripeClient {
        StripeClient::with_transport(
            ClientConfig::new("sk_test_123").base_url("http://localhost:12111"),
            Arc::new(Unreachable),
        )
    }

    #[test]
    fn test_base_headers() {
        let request = client().build_request(Method::GET, "/v1/orders", Vec::new(), None);

        assert_eq!(request.url, "http://localhost:12111/v1/orders");
        assert_eq!(request.header("authorization"), Some("Bearer sk_test_123"));
        assert_eq!(request.header("stripe-version"), Some("2019-12-03"));
        assert!(request.header("user-agent").unwrap().starts_with("stripe-client-rust/"));
        assert_eq!(request.header("idempotency-key"), None);
    }

    #[test]
    fn test_idempotency_key_only_on_post() {
        let client = client().with_options(
            RequestOptions::new()
                .idempotency_key("order-create-1")
                .stripe_account("acct_123"),
        );

        let post = client.build_request(Method::POST, "/v1/orders", Vec::new(), None);
        assert_eq!(post.header("idempotency-key"), Some("order-create-1"));
        assert_eq!(post.header("stripe-account"), Some("acct_123"));

        let get = client.build_request(Method::GET, "/v1/orders", Vec::new(), None);
        assert_eq!(get.header("idempotency-key"), None);
        assert_eq!(get.header("stripe-account"), Some("acct_123"));
    }

    #[test]
    fn test_with_options_leaves_original_untouched() {
        let base = client();
        let _scoped = base.with_options(RequestOptions::new().idempotency_key("k"));

        let request = base.build_request(Method::POST, "/v1/orders", Vec::new(), None);
        assert_eq!(request.header("idempotency-key"), None);
    }

    #[test]
    fn test_post_sends_form_body() {
        let transport = Arc::new(Recording::default());
        let client = StripeClient::with_transport(
            ClientConfig::new("sk_test_123"),
            Arc::clone(&transport) as Arc<dyn Transport>,
        );

        let params = serde_json::json!({"metadata": {"foo": "bar"}});
        tokio_test::block_on(client.post("/v1/orders/or_1", &params)).unwrap();
        tokio_test::block_on(client.get("/v1/orders/or_1", &())).unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests[0].body,
            Some(RequestBody::Form(vec![(
                "metadata[foo]".to_string(),
                "bar".to_string()
            )]))
        );
        assert_eq!(requests[1].body, None);
    }

    #[test]
    fn test_transport_failure_is_api_connection() {
        let err = tokio_test::block_on(client().get("/v1/orders/or_1", &())).unwrap_err();

        assert_eq!(err.kind, crate::error::ErrorKind::ApiConnection);
        assert_eq!(err.http_status, None);
    }
}
