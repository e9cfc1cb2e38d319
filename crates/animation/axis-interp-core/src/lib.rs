//! Axis Interpolation Core
//!
//! Animates a rigid axis (position + orientation) from a start pose to an end
//! pose over a fixed time window. Orientation can be interpolated per Euler
//! component or through quaternions (Lerp or Slerp), and intermediate poses can
//! be sampled up front for previewing.
//!
//! The crate is engine-agnostic: rendering, input and the wall clock live
//! outside. An [`AnimationDriver`] ticks axes from an injected [`Clock`], while
//! [`InterpolationAxis::pose_at`] stays a pure function of elapsed time.

pub mod axis;
pub mod config;
pub mod driver;
pub mod error;
pub mod ids;
pub mod math;
pub mod pose;
pub mod preview;
pub mod rotation;
pub mod strategy;
pub mod time;

// Re-exports for consumers (adapters)
pub use axis::{AxisState, InterpolationAxis};
pub use config::{AxisSettings, Config};
pub use driver::{AnimationDriver, Clock, DriverState, ManualClock, SystemClock, TickOutcome};
pub use error::InterpError;
pub use ids::{AxisId, IdAllocator};
pub use math::{Matrix3, Matrix4, Vector3, Vector4};
pub use pose::Pose;
pub use preview::sample_frames;
pub use rotation::{euler_from_quaternion, normalize_degrees, quaternion_from_euler};
pub use strategy::{QuaternionInterpolation, RotationStrategy};
pub use time::{AnimationTime, TimeRange};

/// Axis interpolation result type
pub type Result<T> = core::result::Result<T, InterpError>;
