use std::sync::{Arc, Mutex, MutexGuard};

use clustermetrics_core::error::Result;

use crate::catalog::ClusterManagerMetrics;
use crate::obs::Registry;

use super::register_all;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Registered,
}

/// Adds and removes the subnet gauges as leadership comes and goes.
///
/// Register and unregister are serialized by an internal lock, so a host
/// that cannot order its transitions still gets a well-defined registry.
pub struct FunctionalLifecycle {
    registry: Arc<dyn Registry>,
    metrics: Arc<ClusterManagerMetrics>,
    state: Mutex<RegistrationState>,
}

impl FunctionalLifecycle {
    pub fn new(registry: Arc<dyn Registry>, metrics: Arc<ClusterManagerMetrics>) -> Self {
        Self {
            registry,
            metrics,
            state: Mutex::new(RegistrationState::Unregistered),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RegistrationState> {
        // Nothing inside the critical section can leave the state half-written.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> RegistrationState {
        *self.lock_state()
    }

    /// Register the four subnet gauges, starting from 0.
    ///
    /// Fails with `AlreadyRegistered` if any of them is already present; in
    /// that case nothing from this call stays registered.
    pub fn register_functional(&self) -> Result<()> {
        let mut state = self.lock_state();
        if *state == RegistrationState::Unregistered {
            // values written during the previous term are stale
            for g in self.metrics.functional_gauges() {
                g.set(0.0);
            }
        }

        let group = self.metrics.functional_group();
        register_all(self.registry.as_ref(), &group)?;
        *state = RegistrationState::Registered;
        tracing::info!(count = group.len(), "functional metrics registered");
        Ok(())
    }

    /// Remove the four subnet gauges. Missing ones are skipped, so this is
    /// safe to call at any time. Returns how many were actually removed.
    pub fn unregister_functional(&self) -> usize {
        let mut state = self.lock_state();
        let mut removed = 0;
        for c in &self.metrics.functional_group() {
            if self.registry.unregister(c) {
                removed += 1;
            } else {
                tracing::debug!(fq_name = %c.desc().fq_name(), "functional metric not registered, skipping");
            }
        }
        *state = RegistrationState::Unregistered;
        tracing::info!(removed, "functional metrics unregistered");
        removed
    }
}
