//! A single animated axis: start and end poses, a strategy and a fixed length.
//!
//! [`InterpolationAxis::pose_at`] is pure. [`InterpolationAxis::tick`] walks the
//! `Idle -> Running -> Complete` lifecycle and caches the current pose.

use serde::{Deserialize, Serialize};

use crate::config::AxisSettings;
use crate::error::InterpError;
use crate::pose::Pose;
use crate::preview::sample_frames;
use crate::strategy::RotationStrategy;
use crate::time::{AnimationTime, TimeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisState {
    /// Constructed or reset; current pose is the start pose.
    #[default]
    Idle,
    Running,
    /// Elapsed time reached the length; current pose is the end pose.
    Complete,
}

impl AxisState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Complete => "complete",
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

#[derive(Debug, Clone)]
pub struct InterpolationAxis {
    start: Pose,
    end: Pose,
    current: Pose,
    strategy: RotationStrategy,
    range: TimeRange,
    state: AxisState,
    elapsed: AnimationTime,
    frames: Option<Vec<Pose>>,
}

impl InterpolationAxis {
    /// New idle axis. A zero `animation_length` is rejected.
    pub fn new(
        start: Pose,
        end: Pose,
        strategy: RotationStrategy,
        animation_length: AnimationTime,
    ) -> Result<Self, InterpError> {
        if animation_length.is_zero() {
            return Err(InterpError::InvalidAnimationLength {
                length: animation_length.as_millis(),
            });
        }
        Ok(Self {
            start,
            end,
            current: start,
            strategy,
            range: TimeRange::from_duration(animation_length),
            state: AxisState::Idle,
            elapsed: AnimationTime::zero(),
            frames: None,
        })
    }

    pub fn from_settings(start: Pose, end: Pose, settings: AxisSettings) -> Result<Self, InterpError> {
        Self::new(start, end, settings.strategy, settings.animation_length)
    }

    #[inline]
    pub fn start(&self) -> &Pose {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &Pose {
        &self.end
    }

    #[inline]
    pub fn current(&self) -> &Pose {
        &self.current
    }

    #[inline]
    pub fn strategy(&self) -> RotationStrategy {
        self.strategy
    }

    #[inline]
    pub fn state(&self) -> AxisState {
        self.state
    }

    #[inline]
    pub fn animation_length(&self) -> AnimationTime {
        self.range.end
    }

    /// Elapsed time seen by the last tick.
    #[inline]
    pub fn elapsed(&self) -> AnimationTime {
        self.elapsed
    }

    /// Last preview, if one was requested since construction or reset.
    #[inline]
    pub fn frames(&self) -> Option<&[Pose]> {
        self.frames.as_deref()
    }

    /// Normalized progress `t / T` for `elapsed`, clamped to `[0, 1]`.
    #[inline]
    pub fn progress_at(&self, elapsed: AnimationTime) -> f64 {
        self.range.progress(elapsed)
    }

    /// Pose after `elapsed` time. Does not touch the axis state.
    pub fn pose_at(&self, elapsed: AnimationTime) -> Pose {
        self.strategy
            .pose_at(&self.start, &self.end, self.progress_at(elapsed))
    }

    /// Advance to `elapsed` (measured from animation start) and return the
    /// current pose. Ticks after completion are no-ops.
    pub fn tick(&mut self, elapsed: AnimationTime) -> &Pose {
        match self.state {
            AxisState::Complete => return &self.current,
            AxisState::Idle => {
                log::debug!("axis started ({})", self.strategy.name());
                self.state = AxisState::Running;
            }
            AxisState::Running => {}
        }
        self.elapsed = elapsed;
        self.current = self.pose_at(elapsed);
        log::trace!(
            "axis tick at {} ms, progress {:.4}",
            elapsed.as_millis(),
            self.progress_at(elapsed)
        );
        if elapsed >= self.range.end {
            self.current = self.end;
            self.state = AxisState::Complete;
            log::debug!(
                "axis complete after {} ms ({})",
                elapsed.as_millis(),
                self.strategy.name()
            );
        }
        &self.current
    }

    /// Back to `Idle` with new endpoints. Clears any preview.
    pub fn reset(&mut self, start: Pose, end: Pose) {
        self.start = start;
        self.end = end;
        self.restart();
    }

    /// Back to `Idle` with the current endpoints.
    pub fn restart(&mut self) {
        self.current = self.start;
        self.state = AxisState::Idle;
        self.elapsed = AnimationTime::zero();
        self.frames = None;
        log::debug!("axis reset ({})", self.strategy.name());
    }

    /// Change the strategy. Only allowed while the axis is not running.
    pub fn set_strategy(&mut self, strategy: RotationStrategy) -> Result<(), InterpError> {
        if self.state == AxisState::Running {
            return Err(InterpError::InvalidState {
                current: self.state.name().into(),
                requested: format!("strategy {}", strategy.name()),
            });
        }
        self.strategy = strategy;
        self.frames = None;
        Ok(())
    }

    /// Sample `frame_count` interior poses over the axis length and keep them
    /// as the current preview, replacing any previous one.
    pub fn show_all_frames(&mut self, frame_count: usize) -> &[Pose] {
        let frames = sample_frames(self, self.animation_length(), frame_count);
        self.frames.insert(frames).as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vector3, Vector4};

    fn ms(v: f64) -> AnimationTime {
        AnimationTime::from_millis(v).unwrap()
    }

    fn sample_axis(strategy: RotationStrategy) -> InterpolationAxis {
        let start = Pose::from_euler(Vector3::new(-20.0, 0.0, 10.0), Vector3::zero());
        let end = Pose::from_euler(Vector3::new(20.0, 0.0, -10.0), Vector3::new(0.0, 90.0, 0.0));
        InterpolationAxis::new(start, end, strategy, ms(7000.0)).unwrap()
    }

    #[test]
    fn zero_length_rejected() {
        let err = InterpolationAxis::new(
            Pose::identity(),
            Pose::identity(),
            RotationStrategy::slerp(),
            AnimationTime::zero(),
        )
        .unwrap_err();
        assert!(matches!(err, InterpError::InvalidAnimationLength { .. }));
    }

    #[test]
    fn lifecycle_idle_running_complete() {
        let mut axis = sample_axis(RotationStrategy::slerp());
        assert_eq!(axis.state(), AxisState::Idle);
        assert_eq!(axis.current(), axis.start());

        axis.tick(ms(3500.0));
        assert_eq!(axis.state(), AxisState::Running);
        assert_eq!(axis.current().position(), Vector3::zero());

        let end = *axis.end();
        assert_eq!(*axis.tick(ms(7000.0)), end);
        assert_eq!(axis.state(), AxisState::Complete);

        // completed axes ignore further ticks
        axis.tick(ms(100.0));
        assert_eq!(*axis.current(), end);
        assert_eq!(axis.elapsed(), ms(7000.0));
    }

    #[test]
    fn overshoot_lands_on_end() {
        let mut axis = sample_axis(RotationStrategy::Euler);
        axis.tick(ms(9000.0));
        assert!(axis.state().is_complete());
        assert_eq!(axis.current(), axis.end());
    }

    #[test]
    fn pose_at_is_pure() {
        let axis = sample_axis(RotationStrategy::lerp());
        let a = axis.pose_at(ms(1234.0));
        let b = axis.pose_at(ms(1234.0));
        assert_eq!(a, b);
        assert_eq!(axis.state(), AxisState::Idle);
    }

    #[test]
    fn reset_from_any_state() {
        let mut axis = sample_axis(RotationStrategy::slerp());
        axis.show_all_frames(4);
        axis.tick(ms(7000.0));
        let start = Pose::from_quaternion(Vector3::new(1.0, 1.0, 1.0), Vector4::IDENTITY);
        axis.reset(start, Pose::identity());
        assert_eq!(axis.state(), AxisState::Idle);
        assert_eq!(*axis.current(), start);
        assert!(axis.frames().is_none());
        assert_eq!(axis.elapsed(), AnimationTime::zero());
    }

    #[test]
    fn strategy_locked_while_running() {
        let mut axis = sample_axis(RotationStrategy::slerp());
        axis.tick(ms(10.0));
        let err = axis.set_strategy(RotationStrategy::Euler).unwrap_err();
        assert_eq!(err.category(), "state");
        axis.restart();
        axis.set_strategy(RotationStrategy::Euler).unwrap();
        assert_eq!(axis.strategy(), RotationStrategy::Euler);
    }

    #[test]
    fn show_all_frames_replaces_previous() {
        let mut axis = sample_axis(RotationStrategy::slerp());
        assert_eq!(axis.show_all_frames(5).len(), 5);
        assert_eq!(axis.show_all_frames(3).len(), 3);
        assert_eq!(axis.frames().map(<[Pose]>::len), Some(3));
        assert!(axis.show_all_frames(1).is_empty());
        assert_eq!(axis.frames(), Some(&[][..]));
    }
}
