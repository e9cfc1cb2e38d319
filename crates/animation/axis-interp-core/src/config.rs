//! Core configuration for axis-interp-core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InterpError;
use crate::strategy::RotationStrategy;
use crate::time::AnimationTime;

/// Driver pacing and per-axis defaults.
///
/// Missing JSON fields fall back to [`Config::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed tick period of the driver.
    pub tick_interval_ms: u64,
    /// Length of one animation, same unit as elapsed time.
    pub animation_length_ms: f64,
    /// Strategy used by axes built from this config.
    pub default_interpolation: RotationStrategy,
    /// Frame count of [`AnimationDriver::show_all_frames`](crate::AnimationDriver::show_all_frames).
    pub preview_frame_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            animation_length_ms: 5000.0,
            default_interpolation: RotationStrategy::default(),
            preview_frame_count: 10,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self, InterpError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, InterpError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), InterpError> {
        if self.tick_interval_ms == 0 {
            return Err(InterpError::InvalidConfig {
                reason: "tick_interval_ms must be > 0".into(),
            });
        }
        if !(self.animation_length_ms.is_finite() && self.animation_length_ms > 0.0) {
            return Err(InterpError::InvalidAnimationLength {
                length: self.animation_length_ms,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn animation_length(&self) -> Result<AnimationTime, InterpError> {
        AnimationTime::from_millis(self.animation_length_ms).map_err(|_| {
            InterpError::InvalidAnimationLength {
                length: self.animation_length_ms,
            }
        })
    }

    /// Settings for an axis using `strategy` and this config's length.
    pub fn axis_settings(&self, strategy: RotationStrategy) -> Result<AxisSettings, InterpError> {
        Ok(AxisSettings {
            strategy,
            animation_length: self.animation_length()?,
        })
    }

    /// Settings for an axis using the configured default strategy.
    pub fn default_axis_settings(&self) -> Result<AxisSettings, InterpError> {
        self.axis_settings(self.default_interpolation)
    }
}

/// Per-axis strategy and length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisSettings {
    pub strategy: RotationStrategy,
    pub animation_length: AnimationTime,
}
