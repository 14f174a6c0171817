#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use clustermetrics_core::build_info::BuildOverrides;
use clustermetrics_core::BuildInfo;
use clustermetrics_manager::catalog::ClusterManagerMetrics;
use clustermetrics_manager::config::MetricsSection;
use clustermetrics_manager::obs::{render_text, Collector, InMemoryRegistry, Registry};

use fixture::fixture;

#[test]
fn renders_build_labels_and_values() {
    let f = fixture();
    f.leader.base().register_base().unwrap();
    f.leader.recorder().set_leader(true);

    let text = render_text(&f.registry.gather());
    assert!(text.contains("# TYPE ovnkube_clustermanager_build_info gauge"));
    assert!(text.contains(
        "ovnkube_clustermanager_build_info{branch=\"main\",build_date=\"2026-10-01\",\
         build_user=\"ci@builder\",goversion=\"rustc 1.80.0\",revision=\"deadbeef\",version=\"0.1.0\"} 1"
    ));
    assert!(text.contains("ovnkube_clustermanager_leader 1\n"));
    assert!(text.contains("ovnkube_clustermanager_ready_duration_seconds 0\n"));
    assert!(!text.contains("host_subnets"));
}

#[test]
fn gather_is_sorted() {
    let f = fixture();
    f.leader.base().register_base().unwrap();
    f.leader.functional().register_functional().unwrap();

    let names: Vec<String> = f.registry.gather().iter().map(|s| s.desc.fq_name().to_string()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 7);
}

#[test]
fn label_values_are_escaped() {
    let build = BuildInfo {
        branch: "feat/\"quoted\"".into(),
        ..fixture::build_info()
    };
    let m = ClusterManagerMetrics::new(&MetricsSection::default(), build).unwrap();
    assert_eq!(m.build_info.desc().const_label("branch"), Some("feat/\"quoted\""));

    let registry = InMemoryRegistry::new();
    registry.register(m.build_info.clone()).unwrap();
    let text = render_text(&registry.gather());
    assert!(text.contains("branch=\"feat/\\\"quoted\\\"\""));
}

#[test]
fn custom_prefix_and_overrides() {
    let section = MetricsSection {
        namespace: "ovn".into(),
        subsystem: "".into(),
    };
    let build = fixture::build_info().with_overrides(&BuildOverrides {
        version: Some("9.9".into()),
        ..Default::default()
    });
    let m = ClusterManagerMetrics::new(&section, build).unwrap();
    assert_eq!(m.leader.desc().fq_name(), "ovn_leader");
    assert_eq!(m.build_info.desc().const_label("version"), Some("9.9"));
    assert_eq!(m.build().version, "9.9");
}

#[test]
fn global_catalog_is_shared() {
    let a = ClusterManagerMetrics::global().unwrap();
    let b = ClusterManagerMetrics::global().unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(a.leader.desc().fq_name(), "ovnkube_clustermanager_leader");
}
