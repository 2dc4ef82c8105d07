//! View types for dashboard template rendering.
//!
//! These types carry pre-formatted strings so templates stay simple.

use bankops_core::{EndpointRegistry, EndpointStatus, HealthSnapshot, OverallStatus};

// ── Status Bar ──────────────────────────────────────────────────

pub struct StatusBarView {
    pub services: Vec<ServiceView>,
    pub summary: String,
    pub banner: &'static str,
    pub banner_class: &'static str,
    pub round: u64,
}

pub struct ServiceView {
    pub key: String,
    pub name: String,
    pub label: String,
    pub base_url: String,
    pub status: &'static str,
    pub dot_class: &'static str,
    pub observed_display: String,
}

impl StatusBarView {
    /// Lay the snapshot out in registry order.
    pub fn build(registry: &EndpointRegistry, snapshot: &HealthSnapshot) -> Self {
        let services = registry
            .iter()
            .map(|ep| {
                let status = snapshot.status_of(&ep.key);
                let observed_display = snapshot
                    .outcomes
                    .get(&ep.key)
                    .map(|o| format_observed(o.observed_at))
                    .unwrap_or_else(|| "—".to_string());
                ServiceView {
                    key: ep.key.clone(),
                    name: ep.display_name.clone(),
                    label: ep.label.clone(),
                    base_url: ep.base_url.clone(),
                    status: status.label(),
                    dot_class: dot_class(status),
                    observed_display,
                }
            })
            .collect();

        Self {
            services,
            summary: snapshot.summary(),
            banner: snapshot.overall.label(),
            banner_class: banner_class(snapshot.overall),
            round: snapshot.round,
        }
    }
}

fn dot_class(status: EndpointStatus) -> &'static str {
    match status {
        EndpointStatus::Online => "dot-online",
        EndpointStatus::Offline => "dot-offline",
        EndpointStatus::Checking => "dot-checking",
    }
}

fn banner_class(overall: OverallStatus) -> &'static str {
    match overall {
        OverallStatus::AllUp => "banner-ok",
        OverallStatus::Partial => "banner-warn",
        OverallStatus::AllDown => "banner-down",
    }
}

/// Format epoch milliseconds as a UTC wall-clock time.
fn format_observed(epoch_ms: u64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms as i64)
        .map(|dt| dt.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "—".to_string())
}
