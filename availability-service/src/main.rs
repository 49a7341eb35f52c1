use anyhow::Context;
use availability_service::{
    build_router,
    config::{ServiceConfig, StockSourceConfig},
    cors_layer, spawn_stock_reload,
    stock_source::{ApiStockSource, FileStockSource, StockSource},
    AppState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServiceConfig::from_env().context("invalid service configuration")?;

    let stock_source: Arc<dyn StockSource> = match &config.stock_source {
        StockSourceConfig::File { path } => Arc::new(FileStockSource::new(path.clone())),
        StockSourceConfig::Api { base_url, timeout } => {
            Arc::new(ApiStockSource::new(base_url.clone(), *timeout)?)
        }
    };
    stock_source
        .load()
        .await
        .with_context(|| format!("failed to load stock source {}", stock_source.describe()))?;

    let state = AppState::new(stock_source.clone(), config.weekend_mode);
    if let Some(every) = config.reload_interval {
        info!(interval_secs = every.as_secs(), "Periodic stock source reload enabled");
        spawn_stock_reload(state.clone(), every);
    }

    let app = build_router(state).layer(cors_layer(&config.allowed_origins));

    let addr = config.socket_addr();
    info!(
        %addr,
        stock_source = %stock_source.describe(),
        weekend_mode = config.weekend_mode.as_str(),
        "starting availability-service"
    );
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
