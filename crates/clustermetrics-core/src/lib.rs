//! clustermetrics core: metric identity, descriptors, build identity and the
//! shared error surface.
//!
//! This crate carries no registry or runtime dependencies so the same
//! descriptors can be used by the in-memory registry, tests, and any other
//! backend a host plugs in.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every fallible path surfaces as `MetricsError`/`Result`; deciding whether a
//! failure is fatal is left to the host.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod build_info;
pub mod error;
pub mod metric;

/// Shared result type.
pub use error::{ErrorKind, MetricsError, Result};
pub use build_info::{BuildInfo, BuildOverrides};
pub use metric::{MetricDesc, MetricId, MetricKind};
