//! Serve mode — runs the health poller and the HTTP surface together.
//!
//! In this mode, the daemon:
//! 1. Starts the health poller (first round immediately)
//! 2. Serves the REST API, Prometheus gauges and dashboard
//! 3. On Ctrl-C, stops accepting requests and then stops the poller

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use bankops_core::EndpointRegistry;
use bankops_health::{HealthPoller, HttpProbe};

/// Run the daemon until Ctrl-C.
pub async fn run(port: u16, registry: Arc<EndpointRegistry>) -> anyhow::Result<()> {
    info!(endpoints = registry.len(), "BankOps status daemon starting");

    // ── Health poller ───────────────────────────────────────────

    let poller = HealthPoller::new(registry.clone(), HttpProbe);
    let handle = poller.start();

    // ── API server ──────────────────────────────────────────────

    let router = bankops_api::build_router(registry, handle.subscribe());
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
        })
        .await?;

    handle.stop();

    info!("BankOps status daemon stopped");
    Ok(())
}
