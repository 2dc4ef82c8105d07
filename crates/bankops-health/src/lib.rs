//! bankops-health — service health polling for the BankOps console.
//!
//! Probes every registered backend in parallel, bounds each probe with a
//! timeout, and reduces the results into a single [`HealthSnapshot`] that
//! the display layer consumes through a `watch` channel.
//!
//! # Architecture
//!
//! ```text
//! HealthPoller::start() → PollerHandle
//!   └── Poll loop task (one per handle)
//!       ├── interval tick → spawn round N
//!       │   ├── guarded_probe() per endpoint (join_all barrier)
//!       │   └── aggregate() → HealthSnapshot { round: N }
//!       └── SnapshotPublisher (drops stale rounds and post-stop delivery)
//! ```
//!
//! # Failure model
//!
//! A probe never fails. Timeouts, refused connections, DNS errors and
//! non-2xx responses all collapse into `reachable = false`, so every round
//! produces exactly one outcome per endpoint.
//!
//! [`HealthSnapshot`]: bankops_core::HealthSnapshot

use std::time::Duration;

pub mod aggregate;
pub mod checker;
pub mod poller;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::aggregate;
pub use checker::{HttpProbe, Probe, ProbeResult, guarded_probe, http_probe};
pub use poller::{HealthPoller, PollSettings, PollerHandle, SnapshotPublisher, run_round};

/// Period between polling rounds.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound on a single liveness probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(3000);
