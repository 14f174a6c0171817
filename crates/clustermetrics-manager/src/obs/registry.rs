//! Collectors and the process-wide registry.
//!
//! Gauge values are stored as `f64` bits in an `AtomicU64`, so writes never
//! take a lock and never touch registration state. The registry is a
//! `DashMap` keyed by fully-qualified name; insertion goes through the entry
//! API so two racing registrations of one name cannot both succeed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use clustermetrics_core::error::{MetricsError, Result};
use clustermetrics_core::metric::MetricDesc;

/// Anything the registry can read a value from.
pub trait Collector: Send + Sync {
    fn desc(&self) -> &MetricDesc;
    fn value(&self) -> f64;
}

/// Settable gauge.
#[derive(Debug)]
pub struct Gauge {
    desc: MetricDesc,
    bits: AtomicU64,
}

impl Gauge {
    pub fn new(desc: MetricDesc) -> Self {
        Self {
            desc,
            bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Collector for Gauge {
    fn desc(&self) -> &MetricDesc {
        &self.desc
    }

    fn value(&self) -> f64 {
        self.get()
    }
}

/// Gauge whose value is computed on every read.
pub struct GaugeFunc {
    desc: MetricDesc,
    f: Box<dyn Fn() -> f64 + Send + Sync>,
}

impl GaugeFunc {
    pub fn new(desc: MetricDesc, f: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Self { desc, f: Box::new(f) }
    }
}

impl std::fmt::Debug for GaugeFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaugeFunc").field("desc", &self.desc).finish_non_exhaustive()
    }
}

impl Collector for GaugeFunc {
    fn desc(&self) -> &MetricDesc {
        &self.desc
    }

    fn value(&self) -> f64 {
        (self.f)()
    }
}

/// Point-in-time reading of one registered collector.
#[derive(Debug, Clone)]
pub struct Sample {
    pub desc: MetricDesc,
    pub value: f64,
}

/// One-shot outcome shared by every caller that asks a registry for the same
/// guard key.
pub type OnceGuard = Arc<OnceLock<Result<()>>>;

/// Metrics backend seam. Controllers take `Arc<dyn Registry>` so tests can
/// inject a fresh instance instead of the process-wide one.
pub trait Registry: Send + Sync {
    /// Add a collector; fails with `AlreadyRegistered` if the name is taken.
    fn register(&self, c: Arc<dyn Collector>) -> Result<()>;

    /// Remove `c` if that same instance is registered. Returns whether
    /// anything was removed. A different collector holding the name is kept.
    fn unregister(&self, c: &Arc<dyn Collector>) -> bool;

    /// Current value of a registered metric.
    fn value(&self, fq_name: &str) -> Option<f64>;

    fn contains(&self, fq_name: &str) -> bool {
        self.value(fq_name).is_some()
    }

    /// Snapshot of every registered collector, sorted by name.
    fn gather(&self) -> Vec<Sample>;

    /// Guard for work that must happen once against this registry. Every call
    /// with the same key returns the same guard.
    fn once_guard(&self, key: &str) -> OnceGuard;
}

#[derive(Default)]
pub struct InMemoryRegistry {
    map: DashMap<String, Arc<dyn Collector>>,
    guards: DashMap<String, OnceGuard>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
            guards: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Registry for InMemoryRegistry {
    fn register(&self, c: Arc<dyn Collector>) -> Result<()> {
        let name = c.desc().fq_name().to_string();
        match self.map.entry(name) {
            Entry::Occupied(e) => Err(MetricsError::AlreadyRegistered(e.key().clone())),
            Entry::Vacant(e) => {
                tracing::debug!(fq_name = %e.key(), "metric registered");
                e.insert(c);
                Ok(())
            }
        }
    }

    fn unregister(&self, c: &Arc<dyn Collector>) -> bool {
        let name = c.desc().fq_name();
        let removed = self
            .map
            .remove_if(name, |_, existing| Arc::ptr_eq(existing, c))
            .is_some();
        if removed {
            tracing::debug!(fq_name = %name, "metric unregistered");
        }
        removed
    }

    fn value(&self, fq_name: &str) -> Option<f64> {
        self.map.get(fq_name).map(|c| c.value().value())
    }

    fn gather(&self) -> Vec<Sample> {
        let mut out: Vec<Sample> = self
            .map
            .iter()
            .map(|r| Sample {
                desc: r.value().desc().clone(),
                value: r.value().value(),
            })
            .collect();
        out.sort_by(|a, b| a.desc.fq_name().cmp(b.desc.fq_name()));
        out
    }

    fn once_guard(&self, key: &str) -> OnceGuard {
        // shard lock is released before the caller runs the guarded work
        Arc::clone(&self.guards.entry(key.to_string()).or_default())
    }
}

static DEFAULT_REGISTRY: OnceLock<Arc<InMemoryRegistry>> = OnceLock::new();

/// Process-wide registry, created on first use.
pub fn default_registry() -> Arc<InMemoryRegistry> {
    Arc::clone(DEFAULT_REGISTRY.get_or_init(|| Arc::new(InMemoryRegistry::new())))
}
