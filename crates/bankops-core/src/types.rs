//! Shared types used across BankOps crates.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::registry::EndpointRegistry;

/// A backend service reachable at a fixed base address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Unique logical name, e.g. `LOAN_SERVICE`.
    pub key: String,
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:8006`.
    pub base_url: String,
    /// Short name derived from `key` (`LOAN_SERVICE` → `LOAN`).
    pub display_name: String,
    /// Long human-friendly name; falls back to `display_name`.
    pub label: String,
}

impl Endpoint {
    pub fn new(key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let key = key.into();
        let display_name = display_name_for(&key);
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            label: display_name.clone(),
            display_name,
            key,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Full URL of the liveness probe.
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

/// Derive the short display name from a registry key.
///
/// Drops a trailing `_SERVICE` and turns the remaining underscores into spaces.
pub fn display_name_for(key: &str) -> String {
    let trimmed = key.strip_suffix("_SERVICE").unwrap_or(key);
    trimmed.replace('_', " ")
}

/// Result of probing one endpoint during one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub endpoint_key: String,
    pub reachable: bool,
    /// Epoch milliseconds at which the probe settled.
    pub observed_at: u64,
}

impl ProbeOutcome {
    pub fn new(endpoint_key: impl Into<String>, reachable: bool) -> Self {
        Self {
            endpoint_key: endpoint_key.into(),
            reachable,
            observed_at: epoch_millis(),
        }
    }
}

/// Display state of a single endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    /// No round has completed yet.
    Checking,
    Online,
    Offline,
}

impl EndpointStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EndpointStatus::Checking => "checking",
            EndpointStatus::Online => "online",
            EndpointStatus::Offline => "offline",
        }
    }
}

/// Tri-state summary across all endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    AllUp,
    Partial,
    AllDown,
}

impl OverallStatus {
    /// Classify an online count against the registry size.
    pub fn from_counts(online: usize, total: usize) -> Self {
        if online == total {
            OverallStatus::AllUp
        } else if online == 0 {
            OverallStatus::AllDown
        } else {
            OverallStatus::Partial
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverallStatus::AllUp => "All Systems Operational",
            OverallStatus::Partial => "Partial Outage",
            OverallStatus::AllDown => "Services Offline",
        }
    }
}

/// Aggregated, consistent view of every endpoint's last-known reachability.
///
/// Replaced wholesale after each round; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Sequence number of the round that produced this snapshot. `0` means
    /// no round has completed yet.
    pub round: u64,
    pub outcomes: BTreeMap<String, ProbeOutcome>,
    pub online_count: usize,
    pub total_count: usize,
    pub overall: OverallStatus,
}

impl HealthSnapshot {
    /// The snapshot shown before the first round completes: every endpoint
    /// is still checking.
    pub fn checking(registry: &EndpointRegistry) -> Self {
        let total_count = registry.len();
        Self {
            round: 0,
            outcomes: BTreeMap::new(),
            online_count: 0,
            total_count,
            overall: OverallStatus::from_counts(0, total_count),
        }
    }

    pub fn status_of(&self, key: &str) -> EndpointStatus {
        match self.outcomes.get(key) {
            None => EndpointStatus::Checking,
            Some(o) if o.reachable => EndpointStatus::Online,
            Some(_) => EndpointStatus::Offline,
        }
    }

    pub fn is_checking(&self) -> bool {
        self.round == 0
    }

    /// `"6/8 online"`.
    pub fn summary(&self) -> String {
        format!("{}/{} online", self.online_count, self.total_count)
    }
}

pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_service_suffix() {
        assert_eq!(display_name_for("LOAN_SERVICE"), "LOAN");
        assert_eq!(display_name_for("API_GATEWAY"), "API GATEWAY");
        assert_eq!(display_name_for("CUSTOMER"), "CUSTOMER");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let ep = Endpoint::new("CARD_SERVICE", "http://127.0.0.1:8004/");
        assert_eq!(ep.base_url, "http://127.0.0.1:8004");
        assert_eq!(ep.health_url(), "http://127.0.0.1:8004/health");
        assert_eq!(ep.label, "CARD");
    }

    #[test]
    fn overall_from_counts() {
        assert_eq!(OverallStatus::from_counts(8, 8), OverallStatus::AllUp);
        assert_eq!(OverallStatus::from_counts(6, 8), OverallStatus::Partial);
        assert_eq!(OverallStatus::from_counts(0, 8), OverallStatus::AllDown);
        assert_eq!(OverallStatus::from_counts(1, 1), OverallStatus::AllUp);
        assert_eq!(OverallStatus::from_counts(0, 1), OverallStatus::AllDown);
    }

    #[test]
    fn status_of_missing_key_is_checking() {
        let registry = EndpointRegistry::locked();
        let snapshot = HealthSnapshot::checking(&registry);
        assert!(snapshot.is_checking());
        assert_eq!(snapshot.status_of("LOAN_SERVICE"), EndpointStatus::Checking);
        assert_eq!(snapshot.summary(), "0/9 online");
    }

    #[test]
    fn overall_serializes_screaming_case() {
        let json = serde_json::to_string(&OverallStatus::AllDown).unwrap();
        assert_eq!(json, "\"ALL_DOWN\"");
        let json = serde_json::to_string(&EndpointStatus::Online).unwrap();
        assert_eq!(json, "\"online\"");
    }
}
