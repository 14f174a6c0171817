//! Build identity baked into the `build_info` metric.
//!
//! Values come from compile-time environment variables set by the build
//! pipeline; a host may override individual fields from config before the
//! catalog is built. After that the snapshot is never re-read.

use serde::Deserialize;

pub const LABEL_VERSION: &str = "version";
pub const LABEL_REVISION: &str = "revision";
pub const LABEL_BRANCH: &str = "branch";
pub const LABEL_BUILD_USER: &str = "build_user";
pub const LABEL_BUILD_DATE: &str = "build_date";
/// Kept as `goversion` so existing dashboards keep matching; carries the
/// toolchain version.
pub const LABEL_TOOLCHAIN: &str = "goversion";

/// Immutable snapshot of how the running binary was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub revision: String,
    pub branch: String,
    pub build_user: String,
    pub build_date: String,
    pub toolchain: String,
}

impl BuildInfo {
    /// Read the values injected at compile time.
    pub fn from_env() -> Self {
        let info = Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            revision: option_env!("CLUSTERMETRICS_REVISION").unwrap_or_default().to_string(),
            branch: option_env!("CLUSTERMETRICS_BRANCH").unwrap_or_default().to_string(),
            build_user: option_env!("CLUSTERMETRICS_BUILD_USER").unwrap_or_default().to_string(),
            build_date: option_env!("CLUSTERMETRICS_BUILD_DATE").unwrap_or_default().to_string(),
            toolchain: option_env!("CLUSTERMETRICS_RUSTC_VERSION").unwrap_or("unknown").to_string(),
        };
        tracing::debug!(version = %info.version, revision = %info.revision, "build identity captured");
        info
    }

    /// Replace the fields set in `o`; the toolchain is not overridable.
    pub fn with_overrides(mut self, o: &BuildOverrides) -> Self {
        let pairs = [
            (&mut self.version, &o.version),
            (&mut self.revision, &o.revision),
            (&mut self.branch, &o.branch),
            (&mut self.build_user, &o.build_user),
            (&mut self.build_date, &o.build_date),
        ];
        for (field, over) in pairs {
            if let Some(v) = over {
                *field = v.clone();
            }
        }
        self
    }

    /// Constant label set for `build_info`.
    pub fn labels(&self) -> [(&'static str, &str); 6] {
        [
            (LABEL_VERSION, self.version.as_str()),
            (LABEL_REVISION, self.revision.as_str()),
            (LABEL_BRANCH, self.branch.as_str()),
            (LABEL_BUILD_USER, self.build_user.as_str()),
            (LABEL_BUILD_DATE, self.build_date.as_str()),
            (LABEL_TOOLCHAIN, self.toolchain.as_str()),
        ]
    }
}

/// Optional per-field overrides, read from the `build:` config section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildOverrides {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub build_user: Option<String>,
    #[serde(default)]
    pub build_date: Option<String>,
}
