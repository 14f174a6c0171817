use std::sync::Arc;

use clustermetrics_core::error::Result;

use crate::catalog::ClusterManagerMetrics;
use crate::obs::{Collector, OnceGuard, Registry};

use super::register_all;

/// Registers the base group exactly once per registry.
///
/// The once-flag lives in the registry, keyed by the group's leader metric
/// name, so every `BaseLifecycle` that targets the same registry (for the
/// process registry: every call site in the process) shares it. The guard
/// blocks concurrent first callers until the single registration attempt
/// finishes, then hands every caller the same outcome.
///
/// Whichever catalog wins the first call is the one registered; call sites
/// should share one catalog (see [`ClusterManagerMetrics::global`]) so their
/// recorders write to the registered gauges.
pub struct BaseLifecycle {
    registry: Arc<dyn Registry>,
    metrics: Arc<ClusterManagerMetrics>,
}

impl BaseLifecycle {
    pub fn new(registry: Arc<dyn Registry>, metrics: Arc<ClusterManagerMetrics>) -> Self {
        Self { registry, metrics }
    }

    fn guard(&self) -> OnceGuard {
        let key = format!("base/{}", self.metrics.leader.desc().fq_name());
        self.registry.once_guard(&key)
    }

    /// Register leader, ready duration and build info.
    ///
    /// A collision is a catalog bug: the error is cached and returned to every
    /// caller, and the host is expected to abort.
    pub fn register_base(&self) -> Result<()> {
        self.guard()
            .get_or_init(|| -> Result<()> {
                let group = self.metrics.base_group();
                register_all(self.registry.as_ref(), &group)?;
                tracing::info!(count = group.len(), "base metrics registered");
                Ok(())
            })
            .clone()
    }

    /// True once the base group was registered successfully.
    pub fn is_registered(&self) -> bool {
        matches!(self.guard().get(), Some(Ok(())))
    }
}
