//! Status aggregation — reduces one round of outcomes into a snapshot.

use std::collections::BTreeMap;

use bankops_core::{EndpointRegistry, HealthSnapshot, OverallStatus, ProbeOutcome};

/// Build the snapshot for round `round` from one outcome per registered
/// endpoint.
///
/// Pure and deterministic. Callers guarantee one outcome per registry entry;
/// `total_count` always comes from the registry.
pub fn aggregate(
    round: u64,
    outcomes: Vec<ProbeOutcome>,
    registry: &EndpointRegistry,
) -> HealthSnapshot {
    let outcomes: BTreeMap<String, ProbeOutcome> = outcomes
        .into_iter()
        .map(|o| (o.endpoint_key.clone(), o))
        .collect();

    let total_count = registry.len();
    let online_count = outcomes.values().filter(|o| o.reachable).count();

    HealthSnapshot {
        round,
        outcomes,
        online_count,
        total_count,
        overall: OverallStatus::from_counts(online_count, total_count),
    }
}
