use anyhow::{anyhow, Result};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wind_gateway_api::AppState;
use wind_gateway_bridge::{BridgeClient, BridgeConfig};
use wind_gateway_core::{DataSource, MarketDataClient};

mod config;
mod shutdown;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::Config::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Wind gateway");

    let source = Arc::new(DataSource::acquire(load_backend(&config).await));

    // Startup connect; requests retry on their own if this fails
    if source.connect().await {
        tracing::info!(backend = source.backend_name(), "Data source connected");
    } else {
        tracing::warn!(
            backend = source.backend_name(),
            "Data source not connected at startup"
        );
    }

    let app = wind_gateway_api::routes(AppState::new(source)).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Reaches the vendor bridge if one is configured.
async fn load_backend(config: &config::Config) -> Result<Arc<dyn MarketDataClient>> {
    let url = config
        .bridge_url
        .as_deref()
        .ok_or_else(|| anyhow!("no bridge URL configured"))?;

    let bridge = BridgeConfig::new(url).with_timeout(config.bridge_timeout());
    let client = BridgeClient::probe(bridge).await?;
    Ok(Arc::new(client))
}
