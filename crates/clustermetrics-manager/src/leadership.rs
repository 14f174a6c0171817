//! Leadership transition handling.
//!
//! The election itself lives elsewhere; this module reacts to its
//! announcements by flipping the leader gauge and driving the functional
//! lifecycle. Transitions are applied one at a time in arrival order.

use std::sync::{Arc, OnceLock};

use tokio::sync::mpsc;

use clustermetrics_core::error::Result;

use crate::catalog::ClusterManagerMetrics;
use crate::lifecycle::{BaseLifecycle, FunctionalLifecycle};
use crate::obs::{default_registry, Registry};
use crate::recorder::Recorder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadershipEvent {
    Acquired,
    Lost,
}

/// Base + functional lifecycle and recorder, bound to one registry.
pub struct LeaderMetrics {
    base: BaseLifecycle,
    functional: FunctionalLifecycle,
    recorder: Recorder,
}

impl LeaderMetrics {
    pub fn new(registry: Arc<dyn Registry>, metrics: Arc<ClusterManagerMetrics>) -> Self {
        Self {
            base: BaseLifecycle::new(Arc::clone(&registry), Arc::clone(&metrics)),
            functional: FunctionalLifecycle::new(registry, Arc::clone(&metrics)),
            recorder: Recorder::new(metrics),
        }
    }

    /// Process instance: the process registry plus the process catalog.
    /// Hosts call [`ClusterManagerMetrics::init_global`] first to install a
    /// configured catalog; otherwise defaults are used.
    pub fn global() -> Result<Arc<Self>> {
        static GLOBAL: OnceLock<Arc<LeaderMetrics>> = OnceLock::new();
        if let Some(lm) = GLOBAL.get() {
            return Ok(Arc::clone(lm));
        }
        let metrics = ClusterManagerMetrics::global()?;
        let registry: Arc<dyn Registry> = default_registry();
        let lm = Arc::new(Self::new(registry, metrics));
        Ok(Arc::clone(GLOBAL.get_or_init(|| lm)))
    }

    pub fn base(&self) -> &BaseLifecycle {
        &self.base
    }

    pub fn functional(&self) -> &FunctionalLifecycle {
        &self.functional
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn on_started_leading(&self) -> Result<()> {
        self.functional.register_functional()?;
        self.recorder.set_leader(true);
        tracing::info!("leadership acquired");
        Ok(())
    }

    pub fn on_stopped_leading(&self) {
        self.recorder.set_leader(false);
        self.functional.unregister_functional();
        tracing::info!("leadership lost");
    }

    /// Apply transitions until the sender side closes. Stops at the first
    /// registration collision and returns it; the host should treat that as
    /// fatal.
    pub async fn run(&self, mut rx: mpsc::Receiver<LeadershipEvent>) -> Result<()> {
        while let Some(ev) = rx.recv().await {
            tracing::debug!(?ev, "leadership transition");
            match ev {
                LeadershipEvent::Acquired => self.on_started_leading()?,
                LeadershipEvent::Lost => self.on_stopped_leading(),
            }
        }
        Ok(())
    }
}
