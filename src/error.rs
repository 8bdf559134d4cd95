//! Error types for PolicySim.
//!
//! The engine itself never fails on well-formed input: lookup misses are treated
//! as zero-effect and malformed numbers are coerced. These types cover the
//! boundaries where something *can* go wrong (parsing ids, loading config) and
//! the rare execution fault that the caller recovers from.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::MetricId;

/// Validation errors that occur while interpreting caller-supplied values.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unknown policy id: '{id}'")]
    UnknownPolicy {
        id: String,
    },

    #[error("Unknown metric id: '{id}'")]
    UnknownMetric {
        id: String,
    },

    #[error("Unknown scenario: '{id}'")]
    UnknownScenario {
        id: String,
    },

    #[error("Invalid engine configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },

    #[error("Malformed simulation input: {reason}")]
    MalformedInput {
        reason: String,
    },

    #[error("Invalid year range: start ({start}) must be before end ({end})")]
    InvalidYearRange {
        start: i32,
        end: i32,
    },
}

/// Execution errors raised while computing metrics.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Metric {metric} produced a non-finite value ({value})")]
    NonFiniteMetric {
        metric: MetricId,
        value: f64,
    },
}

/// Errors loading an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error type for PolicySim.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl SimError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Returns true if this is a config error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns true if a caller can fall back to the neutral baseline and keep going.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Validation(_) | Self::Execution(_) => true,
            Self::Config(_) | Self::Internal { .. } => false,
        }
    }
}

/// Result type alias for PolicySim operations.
pub type SimResult<T> = Result<T, SimError>;
