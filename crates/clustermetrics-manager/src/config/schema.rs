use serde::Deserialize;

use clustermetrics_core::build_info::BuildOverrides;
use clustermetrics_core::error::{MetricsError, Result};
use clustermetrics_core::metric::is_valid_identifier;

pub const DEFAULT_NAMESPACE: &str = "ovnkube";
pub const DEFAULT_SUBSYSTEM: &str = "clustermanager";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterMetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub metrics: MetricsSection,

    #[serde(default)]
    pub build: BuildOverrides,
}

impl ClusterMetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::BadConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.metrics.validate()
    }
}

/// Identity prefix shared by every metric in the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_subsystem")]
    pub subsystem: String,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            subsystem: default_subsystem(),
        }
    }
}

impl MetricsSection {
    /// Empty parts are allowed and skipped in the fully-qualified name.
    pub fn validate(&self) -> Result<()> {
        for (field, v) in [("metrics.namespace", &self.namespace), ("metrics.subsystem", &self.subsystem)] {
            if !v.is_empty() && !is_valid_identifier(v) {
                return Err(MetricsError::BadConfig(format!(
                    "{field} must match [a-zA-Z_][a-zA-Z0-9_]*, got {v:?}"
                )));
            }
        }
        Ok(())
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.into()
}
fn default_subsystem() -> String {
    DEFAULT_SUBSYSTEM.into()
}
