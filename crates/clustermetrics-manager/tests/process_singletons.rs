//! Process registry and process catalog shared by independent call sites.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Barrier};
use std::thread;

use clustermetrics_core::BuildInfo;
use clustermetrics_manager::catalog::ClusterManagerMetrics;
use clustermetrics_manager::config::MetricsSection;
use clustermetrics_manager::leadership::LeaderMetrics;
use clustermetrics_manager::lifecycle::BaseLifecycle;
use clustermetrics_manager::obs::{default_registry, Registry};

const LEADER: &str = "ovnkube_clustermanager_leader";

fn process_base() -> BaseLifecycle {
    let registry: Arc<dyn Registry> = default_registry();
    BaseLifecycle::new(registry, ClusterManagerMetrics::global().unwrap())
}

#[test]
fn separate_call_sites_register_base_once() {
    let first = process_base();
    let second = process_base();

    first.register_base().expect("first call site");
    second.register_base().expect("second call site sees the same guard");
    assert!(second.is_registered());
    assert!(default_registry().contains(LEADER));

    LeaderMetrics::global()
        .unwrap()
        .base()
        .register_base()
        .expect("process instance shares the guard too");
}

#[test]
fn racing_call_sites_on_process_registry() {
    let n = 8;
    let barrier = Barrier::new(n);
    thread::scope(|s| {
        for _ in 0..n {
            s.spawn(|| {
                let base = process_base();
                barrier.wait();
                base.register_base().expect("no duplicate error");
            });
        }
    });
    assert!(default_registry().contains(LEADER));
    assert!(default_registry().contains("ovnkube_clustermanager_build_info"));
}

#[test]
fn process_instance_uses_process_catalog() {
    let a = LeaderMetrics::global().unwrap();
    let b = LeaderMetrics::global().unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let catalog = ClusterManagerMetrics::global().unwrap();
    assert!(Arc::ptr_eq(&catalog, &ClusterManagerMetrics::global().unwrap()));
}

#[test]
fn init_global_accepts_matching_and_rejects_other_prefix() {
    let same = ClusterManagerMetrics::init_global(&MetricsSection::default(), BuildInfo::from_env())
        .expect("defaults match the installed catalog");
    assert!(Arc::ptr_eq(&same, &ClusterManagerMetrics::global().unwrap()));

    let other = MetricsSection {
        namespace: "other".into(),
        subsystem: "clustermanager".into(),
    };
    let err = ClusterManagerMetrics::init_global(&other, BuildInfo::from_env()).expect_err("prefix differs");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}
