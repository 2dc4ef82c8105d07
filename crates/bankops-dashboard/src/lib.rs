//! bankops-dashboard — server-rendered service status for the BankOps console.
//!
//! Renders the console's top-bar status indicator from the latest
//! [`HealthSnapshot`](bankops_core::HealthSnapshot): one dot per service,
//! an `online/total` count and a tri-state banner.
//!
//! # Routes
//!
//! | Route | Handler |
//! |---|---|
//! | `/dashboard` | Status page with per-service table |
//! | `/dashboard/partials/status` | Status bar fragment (HTMX refresh) |

pub mod pages;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use bankops_core::{EndpointRegistry, HealthSnapshot};
use tokio::sync::watch;

/// Shared state for dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub registry: Arc<EndpointRegistry>,
    pub snapshots: watch::Receiver<HealthSnapshot>,
}

impl DashboardState {
    /// Clone of the snapshot currently published.
    pub fn latest(&self) -> HealthSnapshot {
        self.snapshots.borrow().clone()
    }
}

/// Build the dashboard router.
pub fn dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(pages::status_page))
        .route("/partials/status", get(pages::status_bar))
        .with_state(state)
}
