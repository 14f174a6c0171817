//! Registration lifecycle of the two metric groups.
//!
//! - base: registered once per process, never removed.
//! - functional: registered on leadership gain, removed on loss.

pub mod base;
pub mod functional;

pub use base::BaseLifecycle;
pub use functional::{FunctionalLifecycle, RegistrationState};

use std::sync::Arc;

use clustermetrics_core::error::Result;

use crate::obs::{Collector, Registry};

/// Register every collector in `group` or none of them. On the first
/// collision, collectors added by this call are removed again and the error
/// is returned.
pub(crate) fn register_all(registry: &dyn Registry, group: &[Arc<dyn Collector>]) -> Result<()> {
    for (i, c) in group.iter().enumerate() {
        if let Err(e) = registry.register(Arc::clone(c)) {
            tracing::error!(fq_name = %c.desc().fq_name(), error = %e, "metric registration collided");
            for done in &group[..i] {
                registry.unregister(done);
            }
            return Err(e);
        }
    }
    Ok(())
}
