//! End-to-end leadership terms driven through the transition channel.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use tokio::sync::mpsc;

use clustermetrics_manager::leadership::LeadershipEvent;
use clustermetrics_manager::obs::Registry;

use fixture::{fixture, FUNCTIONAL, LEADER, V4_ALLOC, V4_TOTAL, V6_ALLOC, V6_TOTAL};

#[test]
fn two_leadership_terms() {
    let f = fixture();
    let lm = &f.leader;

    lm.base().register_base().unwrap();
    lm.on_started_leading().expect("first term");
    assert_eq!(f.registry.value(LEADER), Some(1.0));

    lm.recorder().record_subnet_count(100.0, 50.0);
    lm.recorder().record_subnet_usage(10.0, 3.0);
    assert_eq!(f.registry.value(V4_TOTAL), Some(100.0));
    assert_eq!(f.registry.value(V6_TOTAL), Some(50.0));
    assert_eq!(f.registry.value(V4_ALLOC), Some(10.0));
    assert_eq!(f.registry.value(V6_ALLOC), Some(3.0));

    lm.on_stopped_leading();
    assert_eq!(f.registry.value(LEADER), Some(0.0));
    for name in FUNCTIONAL {
        assert!(!f.registry.contains(name), "{name} still present");
    }

    lm.on_started_leading().expect("second term");
    for name in FUNCTIONAL {
        assert_eq!(f.registry.value(name), Some(0.0), "{name} not reset");
    }
}

#[tokio::test]
async fn run_applies_events_in_order() {
    let f = fixture();
    f.leader.base().register_base().unwrap();
    let registry = Arc::clone(&f.registry);
    let leader = Arc::new(f.leader);

    let (tx, rx) = mpsc::channel(8);
    let task = {
        let leader = Arc::clone(&leader);
        tokio::spawn(async move { leader.run(rx).await })
    };

    for ev in [
        LeadershipEvent::Acquired,
        LeadershipEvent::Lost,
        LeadershipEvent::Lost,
        LeadershipEvent::Acquired,
    ] {
        tx.send(ev).await.unwrap();
    }
    drop(tx);

    task.await.unwrap().expect("no collision");
    assert_eq!(registry.value(LEADER), Some(1.0));
    assert_eq!(registry.len(), 7);
}

#[tokio::test]
async fn run_stops_on_double_acquire() {
    let f = fixture();
    let leader = Arc::new(f.leader);

    let (tx, rx) = mpsc::channel(8);
    tx.send(LeadershipEvent::Acquired).await.unwrap();
    tx.send(LeadershipEvent::Acquired).await.unwrap();
    drop(tx);

    let err = leader.run(rx).await.expect_err("double registration surfaces");
    assert_eq!(err.kind().as_str(), "ALREADY_REGISTERED");
}
