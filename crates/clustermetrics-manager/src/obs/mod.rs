//! In-process metrics backend (dependency-light).
//!
//! The registry stores collectors keyed by fully-qualified name and renders
//! them in the Prometheus text exposition format. Serving the text is left to
//! the host.

pub mod exposition;
pub mod registry;

pub use exposition::render_text;
pub use registry::{default_registry, Collector, Gauge, GaugeFunc, InMemoryRegistry, OnceGuard, Registry, Sample};
