use crate::availability::{evaluate, AvailabilityRequest, AvailabilityVerdict};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    routing::{post, MethodRouter},
    Json,
};
use chrono::Local;
use common_http_errors::{ApiError, ApiResult};
use serde::Deserialize;
use std::time::Instant;
use tracing::info;

/// Wire shape of `POST /api/check-availability`. Absent fields fall back to
/// empty/zero and are caught by validation rather than the JSON parser.
#[derive(Debug, Default, Deserialize)]
pub struct CheckAvailabilityPayload {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub warehouse_location: String,
}

impl CheckAvailabilityPayload {
    /// A literal `null` body decodes to an empty payload and fails validation.
    pub fn parse(body: &[u8]) -> ApiResult<Self> {
        serde_json::from_slice::<Option<Self>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|err| ApiError::bad_request("invalid_json", format!("Invalid JSON: {err}")))
    }

    pub fn validate(self) -> ApiResult<AvailabilityRequest> {
        if self.product_id.is_empty() {
            return Err(ApiError::bad_request("missing_product_id", "product_id is required"));
        }
        if self.quantity <= 0 {
            return Err(ApiError::bad_request(
                "invalid_quantity",
                "quantity must be greater than 0",
            ));
        }
        if self.warehouse_location.is_empty() {
            return Err(ApiError::bad_request(
                "missing_warehouse_location",
                "warehouse_location is required",
            ));
        }
        Ok(AvailabilityRequest {
            product_id: self.product_id,
            quantity: self.quantity as u64,
            warehouse_location: self.warehouse_location,
        })
    }
}

pub fn check_availability_route() -> MethodRouter<AppState> {
    post(check_availability).fallback(method_not_allowed)
}

pub async fn check_availability(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<AvailabilityVerdict>> {
    let request = CheckAvailabilityPayload::parse(&body)?.validate()?;
    let is_weekend = state.weekend_mode.resolve(&Local::now());

    let started = Instant::now();
    let lookup = state
        .stock_source
        .lookup(&request.product_id, &request.warehouse_location)
        .await;
    state
        .metrics
        .stock_lookup_duration_seconds
        .observe(started.elapsed().as_secs_f64());

    let verdict = evaluate(&request, lookup, is_weekend);
    let outcome = verdict.outcome();
    state
        .metrics
        .checks_total
        .with_label_values(&[outcome.as_str()])
        .inc();
    info!(
        product_id = %request.product_id,
        warehouse = %request.warehouse_location,
        quantity = request.quantity,
        is_weekend,
        outcome = outcome.as_str(),
        available_quantity = verdict.available_quantity,
        "Availability checked"
    );

    Ok(Json(verdict))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn route_not_found() -> ApiError {
    ApiError::NotFound { code: "route_not_found" }
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> ApiResult<String> {
    state
        .metrics
        .render()
        .map_err(|e| ApiError::internal(format!("metrics encode error: {e}")))
}
