//! Value updates for the catalog gauges.
//!
//! Recording never looks at registration state. A write to a gauge that is
//! not registered lands on the detached collector and is discarded when the
//! functional group is registered again (registration resets it to 0).

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::ClusterManagerMetrics;

#[derive(Clone)]
pub struct Recorder {
    metrics: Arc<ClusterManagerMetrics>,
}

impl Recorder {
    pub fn new(metrics: Arc<ClusterManagerMetrics>) -> Self {
        Self { metrics }
    }

    /// Number of subnets currently allocated to nodes.
    pub fn record_subnet_usage(&self, v4_allocated: f64, v6_allocated: f64) {
        self.metrics.v4_allocated_host_subnets.set(v4_allocated);
        self.metrics.v6_allocated_host_subnets.set(v6_allocated);
    }

    /// Number of subnets available per the cluster configuration.
    pub fn record_subnet_count(&self, v4_total: f64, v6_total: f64) {
        self.metrics.v4_host_subnets.set(v4_total);
        self.metrics.v6_host_subnets.set(v6_total);
    }

    pub fn set_leader(&self, is_leader: bool) {
        self.metrics.leader.set(if is_leader { 1.0 } else { 0.0 });
    }

    pub fn record_ready_duration(&self, d: Duration) {
        self.metrics.ready_duration.set(d.as_secs_f64());
    }
}
