//! Engine error types.
//!
//! This module defines the error taxonomy for the oscillatory network engine:
//! boundary validation failures, numeric divergence during integration, and
//! configuration errors raised at construction time.

use thiserror::Error;

/// Errors that can occur while building or simulating a network.
#[derive(Debug, Error)]
pub enum SyncNetError {
    /// Invalid argument at a call boundary
    #[error("Invalid argument '{name}': {value}. {reason}")]
    InvalidArgument {
        /// Parameter name
        name: String,
        /// Offending value as string
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Integration produced a non-finite phase
    #[error("Numeric divergence at t={time}: oscillator {index} produced a non-finite phase")]
    NumericDivergence {
        /// Simulation time at which the divergence was detected
        time: f64,
        /// Index of the offending oscillator
        index: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for engine operations.
pub type SyncNetResult<T> = Result<T, SyncNetError>;

impl SyncNetError {
    /// Create an invalid argument error.
    pub fn invalid_arg(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        SyncNetError::InvalidArgument {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable (can be retried with different arguments).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SyncNetError::InvalidArgument { .. } | SyncNetError::ConfigError(_)
        )
    }

    /// Check if this error indicates a numeric failure during integration.
    pub fn is_numeric_error(&self) -> bool {
        matches!(self, SyncNetError::NumericDivergence { .. })
    }
}
