//! Top-level facade crate for clustermetrics.
//!
//! Re-exports core types and the manager library so users can depend on a single crate.

pub mod core {
    pub use clustermetrics_core::*;
}

pub mod manager {
    pub use clustermetrics_manager::*;
}
