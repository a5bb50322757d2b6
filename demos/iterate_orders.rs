//! Lists every paid order of the account behind `STRIPE_API_KEY`.
//!
//! ```sh
//! STRIPE_API_KEY=sk_test_... cargo run --example iterate_orders
//! ```

use stripe_client::{logging::init_tracing, ClientConfig, ErrorKind, ListParams, StripeClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing()?;

    let config = ClientConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    tracing::info!(config = ?config, "Configuration loaded");

    let client = StripeClient::new(config)?;

    let mut orders = client
        .orders()
        .iter(ListParams::new().limit(25).filter("status", "paid"));

    let mut count = 0usize;
    while let Some(order) = orders.next().await {
        match order {
            Ok(order) => {
                count += 1;
                println!(
                    "{}\t{}\t{}",
                    order["id"].as_str().unwrap_or("?"),
                    order["amount"],
                    order["currency"].as_str().unwrap_or("?")
                );
            }
            Err(e) if e.kind == ErrorKind::RateLimit => {
                tracing::warn!("Rate limited, retrying page in 2s");
                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(count, "Finished listing paid orders");

    Ok(())
}
