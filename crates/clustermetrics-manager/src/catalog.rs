//! Cluster manager metric catalog.
//!
//! Every metric the cluster manager exposes is declared here once. The catalog
//! owns the collector instances; lifecycle controllers only decide whether a
//! registry can see them. Build labels are captured at construction and never
//! re-evaluated.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use clustermetrics_core::build_info::BuildInfo;
use clustermetrics_core::error::{MetricsError, Result};
use clustermetrics_core::metric::{MetricDesc, MetricId, MetricKind};

use crate::config::MetricsSection;
use crate::obs::{Collector, Gauge, GaugeFunc};

pub const LEADER: &str = "leader";
pub const READY_DURATION_SECONDS: &str = "ready_duration_seconds";
pub const BUILD_INFO: &str = "build_info";
pub const NUM_V4_HOST_SUBNETS: &str = "num_v4_host_subnets";
pub const NUM_V6_HOST_SUBNETS: &str = "num_v6_host_subnets";
pub const ALLOCATED_V4_HOST_SUBNETS: &str = "allocated_v4_host_subnets";
pub const ALLOCATED_V6_HOST_SUBNETS: &str = "allocated_v6_host_subnets";

#[derive(Debug)]
pub struct ClusterManagerMetrics {
    // base group
    pub leader: Arc<Gauge>,
    pub ready_duration: Arc<Gauge>,
    pub build_info: Arc<GaugeFunc>,

    // functional group
    pub v4_host_subnets: Arc<Gauge>,
    pub v6_host_subnets: Arc<Gauge>,
    pub v4_allocated_host_subnets: Arc<Gauge>,
    pub v6_allocated_host_subnets: Arc<Gauge>,

    build: BuildInfo,
}

impl ClusterManagerMetrics {
    pub fn new(section: &MetricsSection, build: BuildInfo) -> Result<Self> {
        section.validate()?;
        let id = |name: &str| MetricId::new(&section.namespace, &section.subsystem, name);
        let gauge = |name: &str, help: &str| Arc::new(Gauge::new(MetricDesc::new(id(name), help, MetricKind::Gauge)));

        let build_desc = build.labels().iter().fold(
            MetricDesc::new(
                id(BUILD_INFO),
                "A metric with a constant '1' value labeled by version, revision, branch, \
                 and toolchain version from which the cluster manager was built and when and who built it",
                MetricKind::GaugeFunc,
            ),
            |d, (k, v)| d.with_const_label(*k, *v),
        );

        let metrics = Self {
            leader: gauge(
                LEADER,
                "Identifies whether the instance of the cluster manager is a leader(1) or not(0).",
            ),
            ready_duration: gauge(
                READY_DURATION_SECONDS,
                "The duration for the cluster manager to get to ready state",
            ),
            build_info: Arc::new(GaugeFunc::new(build_desc, || 1.0)),
            v4_host_subnets: gauge(NUM_V4_HOST_SUBNETS, "The total number of v4 host subnets possible"),
            v6_host_subnets: gauge(NUM_V6_HOST_SUBNETS, "The total number of v6 host subnets possible"),
            v4_allocated_host_subnets: gauge(
                ALLOCATED_V4_HOST_SUBNETS,
                "The total number of v4 host subnets currently allocated",
            ),
            v6_allocated_host_subnets: gauge(
                ALLOCATED_V6_HOST_SUBNETS,
                "The total number of v6 host subnets currently allocated",
            ),
            build,
        };
        metrics.check_descriptors()?;
        Ok(metrics)
    }

    /// Process catalog. Built from default names and the compile-time build
    /// identity unless [`init_global`](Self::init_global) ran first.
    pub fn global() -> Result<Arc<Self>> {
        if let Some(m) = GLOBAL.get() {
            return Ok(Arc::clone(m));
        }
        let m = Arc::new(Self::new(&MetricsSection::default(), BuildInfo::from_env())?);
        Ok(Arc::clone(GLOBAL.get_or_init(|| m)))
    }

    /// Install the process catalog from config. Fails with `BadConfig` if a
    /// catalog with a different prefix or build identity is already installed.
    pub fn init_global(section: &MetricsSection, build: BuildInfo) -> Result<Arc<Self>> {
        let candidate = Arc::new(Self::new(section, build)?);
        let installed = GLOBAL.get_or_init(|| Arc::clone(&candidate));
        if installed.leader.desc().fq_name() != candidate.leader.desc().fq_name()
            || installed.build != candidate.build
        {
            return Err(MetricsError::BadConfig(format!(
                "process catalog already installed as {}",
                installed.leader.desc().fq_name()
            )));
        }
        Ok(Arc::clone(installed))
    }

    /// Leader, ready duration, build info.
    pub fn base_group(&self) -> [Arc<dyn Collector>; 3] {
        [
            self.leader.clone(),
            self.ready_duration.clone(),
            self.build_info.clone(),
        ]
    }

    /// The four subnet gauges, in registration order.
    pub fn functional_group(&self) -> [Arc<dyn Collector>; 4] {
        [
            self.v4_host_subnets.clone(),
            self.v6_host_subnets.clone(),
            self.v4_allocated_host_subnets.clone(),
            self.v6_allocated_host_subnets.clone(),
        ]
    }

    pub(crate) fn functional_gauges(&self) -> [&Gauge; 4] {
        [
            &self.v4_host_subnets,
            &self.v6_host_subnets,
            &self.v4_allocated_host_subnets,
            &self.v6_allocated_host_subnets,
        ]
    }

    pub fn build(&self) -> &BuildInfo {
        &self.build
    }

    fn check_descriptors(&self) -> Result<()> {
        let all: Vec<Arc<dyn Collector>> = self
            .base_group()
            .into_iter()
            .chain(self.functional_group())
            .collect();
        check_unique(&all)
    }
}

static GLOBAL: OnceLock<Arc<ClusterManagerMetrics>> = OnceLock::new();

/// Validate every descriptor in `group` and reject repeated identities.
pub fn check_unique(group: &[Arc<dyn Collector>]) -> Result<()> {
    let mut seen = HashSet::new();
    for c in group {
        let desc = c.desc();
        desc.validate()?;
        if !seen.insert(desc.fq_name()) {
            return Err(MetricsError::DuplicateDescriptor(desc.fq_name().to_string()));
        }
    }
    Ok(())
}
