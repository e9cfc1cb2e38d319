//! Error types for the axis interpolation engine.
//!
//! Numerical degeneracies (antipodal quaternions, vanishing `sin(theta)`, pole
//! singularities) are not errors: they have defined results and are handled
//! where they occur. What remains are bad inputs at the API edges.

use serde::{Deserialize, Serialize};

use crate::ids::AxisId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum InterpError {
    /// Negative or non-finite time value, in milliseconds
    #[error("Invalid time value: {time} ms")]
    InvalidTime { time: f64 },

    /// Animation length that cannot be divided by
    #[error("Invalid animation length: {length} ms (must be > 0)")]
    InvalidAnimationLength { length: f64 },

    /// Invalid configuration value
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Requested lifecycle transition is not allowed from the current state
    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidState { current: String, requested: String },

    /// Axis id not registered with the driver
    #[error("Axis not found: {id:?}")]
    AxisNotFound { id: AxisId },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl InterpError {
    /// Check if the caller can retry with corrected input
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidTime { .. } | Self::InvalidState { .. } | Self::AxisNotFound { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidTime { .. } | Self::InvalidAnimationLength { .. } => "time",
            Self::InvalidConfig { .. } | Self::Serialization { .. } => "config",
            Self::InvalidState { .. } => "state",
            Self::AxisNotFound { .. } => "driver",
        }
    }
}

impl From<serde_json::Error> for InterpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
