//! Shared error type across clustermetrics crates.

use thiserror::Error;

/// Stable error codes, used by hosts and tests to classify failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Identity already present in the registry.
    AlreadyRegistered,
    /// Metric name component is not a valid identifier.
    InvalidName,
    /// Two catalog entries share one identity.
    DuplicateDescriptor,
    /// Configuration rejected.
    BadConfig,
}

impl ErrorKind {
    /// String representation used in logs and assertions.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::AlreadyRegistered => "ALREADY_REGISTERED",
            ErrorKind::InvalidName => "INVALID_NAME",
            ErrorKind::DuplicateDescriptor => "DUPLICATE_DESCRIPTOR",
            ErrorKind::BadConfig => "BAD_CONFIG",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and manager.
///
/// `Clone` because the one-time base registration hands the same outcome to
/// every caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("duplicate metrics collector registration attempted: {0}")]
    AlreadyRegistered(String),
    #[error("invalid metric name: {0}")]
    InvalidName(String),
    #[error("duplicate descriptor in catalog: {0}")]
    DuplicateDescriptor(String),
    #[error("bad config: {0}")]
    BadConfig(String),
}

impl MetricsError {
    /// Map the error to its stable code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MetricsError::AlreadyRegistered(_) => ErrorKind::AlreadyRegistered,
            MetricsError::InvalidName(_) => ErrorKind::InvalidName,
            MetricsError::DuplicateDescriptor(_) => ErrorKind::DuplicateDescriptor,
            MetricsError::BadConfig(_) => ErrorKind::BadConfig,
        }
    }
}
