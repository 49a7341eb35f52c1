pub mod availability;
pub mod calendar;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod stock_source;

pub use crate::availability::{evaluate, AvailabilityRequest, AvailabilityVerdict, StockLookup};
pub use crate::handlers::*;
pub use crate::stock_source::StockSource;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use crate::calendar::WeekendMode;
use common_observability::AvailabilityMetrics;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, warn};

pub const SERVICE_NAME: &str = "availability-service";

#[derive(Clone)]
pub struct AppState {
    pub stock_source: Arc<dyn StockSource>,
    pub weekend_mode: WeekendMode,
    pub metrics: Arc<AvailabilityMetrics>,
}

impl AppState {
    pub fn new(stock_source: Arc<dyn StockSource>, weekend_mode: WeekendMode) -> Self {
        Self {
            stock_source,
            weekend_mode,
            metrics: Arc::new(AvailabilityMetrics::new()),
        }
    }
}

async fn error_metrics_mw(
    State(metrics): State<Arc<AvailabilityMetrics>>,
    req: axum::http::Request<Body>,
    next: middleware::Next,
) -> axum::response::Response {
    let resp = next.run(req).await;
    let status = resp.status();
    if status.as_u16() >= 400 {
        let code = resp
            .headers()
            .get(common_http_errors::ERROR_CODE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        metrics
            .http_errors_total
            .with_label_values(&[SERVICE_NAME, code, status.as_str()])
            .inc();
    }
    resp
}

/// Every route the service exposes, with error metrics attached.
pub fn build_router(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    Router::new()
        .route("/", get(docs::redirect_to_docs))
        .route("/healthz", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/docs", get(docs::docs_page))
        .route("/openapi.json", get(docs::openapi_spec))
        .route("/api/check-availability", check_availability_route())
        .fallback(route_not_found)
        .with_state(state)
        .layer(middleware::from_fn_with_state(metrics, error_metrics_mw))
}

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
}

/// Re-run `load` on the stock source every `every`. Failed reloads keep the
/// previously loaded data.
pub fn spawn_stock_reload(state: AppState, every: Duration) {
    let source = state.stock_source.clone();
    let metrics = state.metrics.clone();
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately; startup already loaded once
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match source.load().await {
                Ok(()) => {
                    metrics.stock_source_reloads_total.with_label_values(&["ok"]).inc();
                    debug!(source = %source.describe(), "Reloaded stock source");
                }
                Err(err) => {
                    metrics.stock_source_reloads_total.with_label_values(&["error"]).inc();
                    warn!(error = %err, source = %source.describe(), "Failed to reload stock source");
                }
            }
        }
    });
}
