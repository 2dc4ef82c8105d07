//! Health poller — background task that probes every endpoint on a timer.
//!
//! [`HealthPoller::start`] spawns one poll loop and returns a
//! [`PollerHandle`]. The handle owns the loop: dropping or stopping it
//! cancels the timer, aborts in-flight rounds and detaches the publisher so
//! nothing is delivered afterwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use bankops_core::{EndpointRegistry, HealthSnapshot, OverallStatus};

use crate::aggregate::aggregate;
use crate::checker::{Probe, guarded_probe};
use crate::{POLL_INTERVAL, PROBE_TIMEOUT};

/// Timer settings for a poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Period between rounds.
    pub interval: Duration,
    /// Per-probe upper bound.
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            timeout: PROBE_TIMEOUT,
        }
    }
}

/// Probes all endpoints once and aggregates the results as round `round`.
///
/// The snapshot is built only after every probe has settled.
pub async fn run_round<P: Probe>(
    registry: &EndpointRegistry,
    probe: &P,
    timeout: Duration,
    round: u64,
) -> HealthSnapshot {
    let outcomes = join_all(
        registry
            .iter()
            .map(|endpoint| guarded_probe(probe, endpoint, timeout)),
    )
    .await;

    let snapshot = aggregate(round, outcomes, registry);
    match snapshot.overall {
        OverallStatus::AllDown => warn!(round, total = snapshot.total_count, "all services offline"),
        _ => debug!(
            round,
            online = snapshot.online_count,
            total = snapshot.total_count,
            "health round complete"
        ),
    }
    snapshot
}

/// Single writer for the snapshot channel.
///
/// Publishes only rounds newer than the one currently visible, and nothing
/// at all once the consumer has detached. The detached flag is only read
/// and written under the channel's write lock.
#[derive(Debug, Clone)]
pub struct SnapshotPublisher {
    tx: Arc<watch::Sender<HealthSnapshot>>,
    detached: Arc<AtomicBool>,
}

impl SnapshotPublisher {
    pub fn new(tx: watch::Sender<HealthSnapshot>) -> Self {
        Self {
            tx: Arc::new(tx),
            detached: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replace the visible snapshot. Returns whether it was published.
    pub fn publish(&self, snapshot: HealthSnapshot) -> bool {
        let round = snapshot.round;
        let mut detached = false;

        let published = self.tx.send_if_modified(|current| {
            if self.detached.load(Ordering::Acquire) {
                detached = true;
                false
            } else if snapshot.round > current.round {
                *current = snapshot;
                true
            } else {
                false
            }
        });

        if published {
            info!(round, "health snapshot published");
        } else if detached {
            debug!(round, "consumer detached, dropping snapshot");
        } else {
            debug!(round, current = self.tx.borrow().round, "discarding stale round");
        }
        published
    }

    /// Refuse every later publish. Returns `false` if already detached.
    ///
    /// Once this returns, no in-flight [`publish`](Self::publish) can
    /// deliver.
    pub fn detach(&self) -> bool {
        let mut first = false;
        self.tx.send_if_modified(|_| {
            first = !self.detached.swap(true, Ordering::AcqRel);
            false
        });
        first
    }

    pub fn subscribe(&self) -> watch::Receiver<HealthSnapshot> {
        self.tx.subscribe()
    }
}

/// Periodic health poller over a fixed registry.
pub struct HealthPoller<P> {
    registry: Arc<EndpointRegistry>,
    probe: Arc<P>,
    settings: PollSettings,
}

impl<P: Probe> HealthPoller<P> {
    /// Create a poller with the production interval and timeout.
    pub fn new(registry: Arc<EndpointRegistry>, probe: P) -> Self {
        Self {
            registry,
            probe: Arc::new(probe),
            settings: PollSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Start polling. The first round runs immediately.
    ///
    /// The returned handle already holds the initial snapshot with every
    /// endpoint checking. Must be called from within a Tokio runtime.
    pub fn start(&self) -> PollerHandle {
        let (tx, snapshots) = watch::channel(HealthSnapshot::checking(&self.registry));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let publisher = SnapshotPublisher::new(tx);

        let registry = self.registry.clone();
        let probe = self.probe.clone();
        let settings = self.settings;
        let loop_publisher = publisher.clone();

        let task = tokio::spawn(async move {
            run_poll_loop(registry, probe, settings, loop_publisher, shutdown_rx).await;
        });

        info!(
            endpoints = self.registry.len(),
            interval_secs = settings.interval.as_secs(),
            timeout_ms = settings.timeout.as_millis() as u64,
            "health poller started"
        );

        PollerHandle {
            shutdown_tx,
            publisher,
            snapshots,
            task,
        }
    }
}

/// Cancellation handle for a running poller. Stops the poller on drop.
pub struct PollerHandle {
    shutdown_tx: watch::Sender<bool>,
    publisher: SnapshotPublisher,
    snapshots: watch::Receiver<HealthSnapshot>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<HealthSnapshot> {
        self.snapshots.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> HealthSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Stop polling. No snapshot is published after this returns.
    pub fn stop(self) {
        self.detach();
    }

    fn detach(&self) {
        if !self.publisher.detach() {
            return;
        }
        let _ = self.shutdown_tx.send(true);
        self.task.abort();
        info!("health poller stopped");
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

/// The poll loop: one round per tick, rounds run independently and are
/// ordered by sequence number at publish time.
async fn run_poll_loop<P: Probe>(
    registry: Arc<EndpointRegistry>,
    probe: Arc<P>,
    settings: PollSettings,
    publisher: SnapshotPublisher,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut rounds = JoinSet::new();
    let mut next_round: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                next_round += 1;
                let round = next_round;
                let registry = registry.clone();
                let probe = probe.clone();
                let publisher = publisher.clone();

                rounds.spawn(async move {
                    let snapshot = run_round(&registry, probe.as_ref(), settings.timeout, round).await;
                    publisher.publish(snapshot);
                });
            }
            Some(joined) = rounds.join_next() => {
                if let Err(e) = joined {
                    if e.is_panic() {
                        error!(error = %e, "health round panicked");
                    }
                }
            }
            _ = shutdown.changed() => {
                debug!("poll loop shutting down");
                break;
            }
        }
    }

    rounds.abort_all();
}
