//! Prometheus text exposition format.
//!
//! Renders the latest health snapshot as gauges for scraping by a
//! Prometheus server or compatible agent.

use bankops_core::{EndpointRegistry, EndpointStatus, HealthSnapshot};

/// Render a snapshot into Prometheus text format.
///
/// Services still being checked are omitted from `bankops_service_up`.
pub fn render_prometheus(registry: &EndpointRegistry, snapshot: &HealthSnapshot) -> String {
    let mut out = String::new();

    out.push_str("# HELP bankops_service_up Whether the service answered its last health probe.\n");
    out.push_str("# TYPE bankops_service_up gauge\n");
    for ep in registry {
        let value = match snapshot.status_of(&ep.key) {
            EndpointStatus::Online => 1,
            EndpointStatus::Offline => 0,
            EndpointStatus::Checking => continue,
        };
        out.push_str(&format!(
            "bankops_service_up{{service=\"{}\"}} {}\n",
            ep.key, value
        ));
    }

    out.push_str("# HELP bankops_services_online Services reachable in the last round.\n");
    out.push_str("# TYPE bankops_services_online gauge\n");
    out.push_str(&format!("bankops_services_online {}\n", snapshot.online_count));

    out.push_str("# HELP bankops_services_total Registered services.\n");
    out.push_str("# TYPE bankops_services_total gauge\n");
    out.push_str(&format!("bankops_services_total {}\n", snapshot.total_count));

    out.push_str("# HELP bankops_health_round Sequence number of the last published round.\n");
    out.push_str("# TYPE bankops_health_round gauge\n");
    out.push_str(&format!("bankops_health_round {}\n", snapshot.round));

    out
}
