//! Storefront Pricing - variant price resolution service

use anyhow::Result;
use storefront_pricing::{app, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.clone().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = config.bind_addr();
    tracing::info!("Storefront pricing listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app()).await?;
    Ok(())
}
