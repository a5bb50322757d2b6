//! Async client for the Stripe HTTP API.
//!
//! Responses are returned as order-preserving [`serde_json::Value`]s and every
//! failure is a single [`ApiError`] whose [`ErrorKind`] is derived from the
//! Stripe error `type` and the HTTP status.
//!
//! ```no_run
//! use stripe_client::{ClientConfig, ListParams, StripeClient};
//!
//! # async fn run() -> Result<(), stripe_client::ApiError> {
//! let client = StripeClient::new(ClientConfig::new("sk_test_..."))?;
//!
//! let order = client.orders().find("or_123").await?;
//! println!("{}", order["status"]);
//!
//! let mut orders = client.orders().iter(ListParams::new().limit(50));
//! while let Some(order) = orders.next().await {
//!     println!("{}", order?["id"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
pub mod transport;
pub mod webhooks;

pub use client::{ListIter, ListParams, Page, RequestOptions, StripeClient};
pub use config::ClientConfig;
pub use error::{map_error, ApiError, ApiResult, ErrorKind, TransportError, WebhookError};
pub use transport::{HttpRequest, HttpResponse, RequestBody, ReqwestTransport, Transport};
pub use webhooks::WebhookVerifier;
