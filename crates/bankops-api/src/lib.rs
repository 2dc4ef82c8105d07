//! bankops-api — REST API for the BankOps console status monitor.
//!
//! Serves the latest health snapshot as JSON, exposes Prometheus gauges,
//! and mounts the dashboard under `/dashboard`.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/v1/health` | Latest aggregated snapshot |
//! | GET | `/api/v1/services` | Registered services with current status |
//! | GET | `/api/v1/services/:key` | One service |
//! | GET | `/metrics` | Prometheus exposition |

pub mod handlers;
pub mod prometheus;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use bankops_core::{EndpointRegistry, HealthSnapshot};
use tokio::sync::watch;

pub use prometheus::render_prometheus;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<EndpointRegistry>,
    pub snapshots: watch::Receiver<HealthSnapshot>,
}

impl ApiState {
    pub fn latest(&self) -> HealthSnapshot {
        self.snapshots.borrow().clone()
    }
}

/// Build the complete API router (REST + dashboard + metrics).
pub fn build_router(
    registry: Arc<EndpointRegistry>,
    snapshots: watch::Receiver<HealthSnapshot>,
) -> Router {
    let api_state = ApiState {
        registry: registry.clone(),
        snapshots: snapshots.clone(),
    };

    let dashboard_state = bankops_dashboard::DashboardState {
        registry,
        snapshots,
    };

    let api_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/services", get(handlers::list_services))
        .route("/services/{key}", get(handlers::get_service))
        .with_state(api_state.clone());

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/dashboard", bankops_dashboard::dashboard_router(dashboard_state))
        .route("/metrics", get(handlers::prometheus_metrics).with_state(api_state))
}
