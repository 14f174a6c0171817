//! clustermetrics manager library entry.
//!
//! Holds the metric catalog of the cluster manager, the in-memory registry it
//! is exposed through, and the lifecycle that decides which metrics are
//! visible: base metrics once per process, functional metrics only while this
//! instance is leader.

pub mod catalog;
pub mod config;
pub mod leadership;
pub mod lifecycle;
pub mod obs;
pub mod recorder;
