#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use clustermetrics_core::{MetricDesc, MetricId, MetricKind};
use clustermetrics_manager::catalog::{check_unique, ClusterManagerMetrics};
use clustermetrics_manager::config::MetricsSection;
use clustermetrics_manager::obs::{Collector, Gauge, GaugeFunc};


fn gauge(name: &str) -> Arc<dyn Collector> {
    Arc::new(Gauge::new(MetricDesc::new(
        MetricId::new("ovnkube", "clustermanager", name),
        "help",
        MetricKind::Gauge,
    )))
}

#[test]
fn repeated_identity_rejected() {
    let func: Arc<dyn Collector> = Arc::new(GaugeFunc::new(
        MetricDesc::new(MetricId::new("ovnkube", "clustermanager", "leader"), "help", MetricKind::GaugeFunc),
        || 1.0,
    ));
    let err = check_unique(&[gauge("leader"), gauge("ready_duration_seconds"), func]).expect_err("collision");
    assert_eq!(err.kind().as_str(), "DUPLICATE_DESCRIPTOR");
    assert_eq!(err.to_string(), "duplicate descriptor in catalog: ovnkube_clustermanager_leader");
}

#[test]
fn distinct_identities_pass() {
    check_unique(&[gauge("a"), gauge("b"), gauge("c")]).expect("distinct");
}

#[test]
fn invalid_descriptor_rejected() {
    let err = check_unique(&[gauge("bad-name")]).expect_err("invalid");
    assert_eq!(err.kind().as_str(), "INVALID_NAME");
}

#[test]
fn catalog_groups_are_disjoint() {
    let m = ClusterManagerMetrics::new(&MetricsSection::default(), fixture::build_info()).unwrap();
    let all: Vec<Arc<dyn Collector>> = m.base_group().into_iter().chain(m.functional_group()).collect();
    assert_eq!(all.len(), 7);
    check_unique(&all).expect("catalog identities are distinct");
}
