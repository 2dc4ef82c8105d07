//! REST API handlers.
//!
//! Each handler reads the latest snapshot and returns a JSON response.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::debug;

use bankops_core::{Endpoint, EndpointStatus, HealthSnapshot};

use crate::ApiState;

/// Response wrapper for consistent API format.
#[derive(Serialize)]
struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

/// A registered service joined with its current status.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub key: String,
    pub display_name: String,
    pub label: String,
    pub base_url: String,
    pub status: EndpointStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<u64>,
}

impl ServiceStatus {
    fn from_endpoint(endpoint: &Endpoint, snapshot: &HealthSnapshot) -> Self {
        Self {
            key: endpoint.key.clone(),
            display_name: endpoint.display_name.clone(),
            label: endpoint.label.clone(),
            base_url: endpoint.base_url.clone(),
            status: snapshot.status_of(&endpoint.key),
            observed_at: snapshot.outcomes.get(&endpoint.key).map(|o| o.observed_at),
        }
    }
}

// ── Health ─────────────────────────────────────────────────────

/// GET /api/v1/health
pub async fn get_health(State(state): State<ApiState>) -> impl IntoResponse {
    ApiResponse::ok(state.latest())
}

// ── Services ───────────────────────────────────────────────────

/// GET /api/v1/services
pub async fn list_services(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.latest();
    let services: Vec<ServiceStatus> = state
        .registry
        .iter()
        .map(|ep| ServiceStatus::from_endpoint(ep, &snapshot))
        .collect();
    ApiResponse::ok(services)
}

/// GET /api/v1/services/:key
pub async fn get_service(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    match state.registry.get(&key) {
        Some(ep) => ApiResponse::ok(ServiceStatus::from_endpoint(ep, &state.latest())).into_response(),
        None => {
            debug!(%key, "unknown service requested");
            error_response("service not found", StatusCode::NOT_FOUND).into_response()
        }
    }
}

// ── Metrics ────────────────────────────────────────────────────

/// GET /metrics
pub async fn prometheus_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let body = crate::render_prometheus(&state.registry, &state.latest());
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
