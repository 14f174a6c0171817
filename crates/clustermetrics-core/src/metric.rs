//! Metric identity and descriptors.
//!
//! A metric is identified by `(namespace, subsystem, name)`; the registry keys
//! on the fully-qualified name built from those parts. Constant labels are
//! fixed when the descriptor is built and kept sorted by key so rendering is
//! deterministic.

use std::fmt;

use crate::error::{MetricsError, Result};

/// How the registry obtains a metric's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Value is set explicitly.
    Gauge,
    /// Value is computed on every read.
    GaugeFunc,
}

/// Metric identity: `(namespace, subsystem, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricId {
    pub namespace: String,
    pub subsystem: String,
    pub name: String,
}

impl MetricId {
    pub fn new(namespace: impl Into<String>, subsystem: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            subsystem: subsystem.into(),
            name: name.into(),
        }
    }

    /// Join non-empty parts with `_`, e.g. `ovnkube_clustermanager_leader`.
    pub fn fq_name(&self) -> String {
        [self.namespace.as_str(), self.subsystem.as_str(), self.name.as_str()]
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Every non-empty part must be a valid identifier; the name is mandatory.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MetricsError::InvalidName("metric name must not be empty".into()));
        }
        for part in [&self.namespace, &self.subsystem, &self.name] {
            if !part.is_empty() && !is_valid_identifier(part) {
                return Err(MetricsError::InvalidName(part.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fq_name())
    }
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Static description of one metric.
#[derive(Debug, Clone)]
pub struct MetricDesc {
    id: MetricId,
    fq_name: String,
    help: String,
    kind: MetricKind,
    const_labels: Vec<(String, String)>,
}

impl MetricDesc {
    pub fn new(id: MetricId, help: impl Into<String>, kind: MetricKind) -> Self {
        let fq_name = id.fq_name();
        Self {
            id,
            fq_name,
            help: help.into(),
            kind,
            const_labels: Vec::new(),
        }
    }

    /// Attach a constant label. Labels stay sorted by key; a repeated key
    /// replaces the earlier value.
    pub fn with_const_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.const_labels.binary_search_by(|(k, _)| k.as_str().cmp(&key)) {
            Ok(i) => self.const_labels[i].1 = value,
            Err(i) => self.const_labels.insert(i, (key, value)),
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.id.validate()?;
        if self.help.is_empty() {
            return Err(MetricsError::InvalidName(format!("{}: help text must not be empty", self.fq_name)));
        }
        for (k, _) in &self.const_labels {
            if !is_valid_identifier(k) || k.starts_with("__") {
                return Err(MetricsError::InvalidName(format!("{}: label {k}", self.fq_name)));
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &MetricId {
        &self.id
    }

    pub fn fq_name(&self) -> &str {
        &self.fq_name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn const_labels(&self) -> &[(String, String)] {
        &self.const_labels
    }

    /// Look up a constant label by key.
    pub fn const_label(&self, key: &str) -> Option<&str> {
        self.const_labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
