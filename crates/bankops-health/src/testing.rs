//! Scripted probes for exercising the poller without a network.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bankops_core::{Endpoint, EndpointRegistry};

use crate::checker::{Probe, ProbeResult};

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Up,
    Refused,
    Silent,
    Delayed(Duration, ProbeResult),
    /// The first call sleeps and fails; every later call is healthy.
    SlowFirstCall(Duration),
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedProbe {
    behaviors: HashMap<String, Behavior>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(key.to_string(), behavior);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Probe for ScriptedProbe {
    fn check(&self, endpoint: &Endpoint) -> impl Future<Output = ProbeResult> + Send {
        let behavior = self
            .behaviors
            .get(&endpoint.key)
            .copied()
            .unwrap_or(Behavior::Refused);
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        async move {
            match behavior {
                Behavior::Up => ProbeResult::Healthy,
                Behavior::Refused => ProbeResult::Failed,
                Behavior::Silent => std::future::pending().await,
                Behavior::Delayed(delay, result) => {
                    tokio::time::sleep(delay).await;
                    result
                }
                Behavior::SlowFirstCall(delay) if call == 0 => {
                    tokio::time::sleep(delay).await;
                    ProbeResult::Failed
                }
                Behavior::SlowFirstCall(_) => ProbeResult::Healthy,
            }
        }
    }
}

/// Registry of `n` endpoints keyed `SVC_0_SERVICE`, `SVC_1_SERVICE`, ...
pub fn registry_of(n: usize) -> EndpointRegistry {
    let endpoints = (0..n)
        .map(|i| Endpoint::new(format!("SVC_{i}_SERVICE"), format!("http://127.0.0.1:{}", 9000 + i)))
        .collect();
    EndpointRegistry::new(endpoints).unwrap()
}
