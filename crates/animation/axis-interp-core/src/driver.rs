//! Fixed-interval driver for one or more axes.
//!
//! The driver owns no thread and no timer. The host calls [`AnimationDriver::poll`]
//! as often as it likes; the driver reads an injected [`Clock`] and ticks every
//! axis at most once per interval, always with the absolute time elapsed since
//! [`AnimationDriver::start`]. A late poll therefore runs a single tick that
//! catches up, and an early poll is skipped.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::axis::InterpolationAxis;
use crate::config::Config;
use crate::error::InterpError;
use crate::ids::{AxisId, IdAllocator};
use crate::pose::Pose;
use crate::strategy::RotationStrategy;
use crate::time::AnimationTime;

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same reading, so a test can keep one
/// handle while the driver owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DriverState {
    #[default]
    Stopped,
    Running,
    /// Every axis reached its end pose.
    Complete,
}

impl DriverState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Complete => "complete",
        }
    }
}

/// Result of a single [`AnimationDriver::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// All axes were advanced to this elapsed time.
    Ticked(AnimationTime),
    /// Less than one interval since the previous tick.
    Skipped,
    /// The driver is not running.
    Inactive,
}

/// Ids of the axes created by [`AnimationDriver::comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonAxes {
    pub euler: AxisId,
    pub quaternion: AxisId,
}

pub struct AnimationDriver<C: Clock = SystemClock> {
    clock: C,
    config: Config,
    ids: IdAllocator,
    axes: Vec<(AxisId, InterpolationAxis)>,
    state: DriverState,
    started_at: Duration,
    last_tick: Option<Duration>,
    elapsed: AnimationTime,
}

impl<C: Clock> AnimationDriver<C> {
    /// Empty, stopped driver. The config is validated first.
    pub fn new(clock: C, config: Config) -> Result<Self, InterpError> {
        config.validate()?;
        Ok(Self {
            clock,
            config,
            ids: IdAllocator::new(),
            axes: Vec::new(),
            state: DriverState::Stopped,
            started_at: Duration::ZERO,
            last_tick: None,
            elapsed: AnimationTime::zero(),
        })
    }

    /// Driver with two axes over the same endpoints: one Euler, one quaternion.
    ///
    /// The quaternion axis uses the configured interpolation when that is a
    /// quaternion kind, Slerp otherwise.
    pub fn comparison(
        clock: C,
        start: Pose,
        end: Pose,
        config: Config,
    ) -> Result<(Self, ComparisonAxes), InterpError> {
        let quaternion_strategy = match config.default_interpolation {
            RotationStrategy::Euler => RotationStrategy::slerp(),
            quaternion => quaternion,
        };
        let mut driver = Self::new(clock, config)?;
        let euler = driver.add_axis_with(start, end, RotationStrategy::Euler)?;
        let quaternion = driver.add_axis_with(start, end, quaternion_strategy)?;
        Ok((driver, ComparisonAxes { euler, quaternion }))
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Elapsed time of the last tick.
    #[inline]
    pub fn elapsed(&self) -> AnimationTime {
        self.elapsed
    }

    pub fn add_axis(&mut self, axis: InterpolationAxis) -> AxisId {
        let id = self.ids.alloc_axis();
        self.axes.push((id, axis));
        log::debug!("driver added axis {:?}", id);
        id
    }

    /// Add an axis using the configured animation length.
    pub fn add_axis_with(
        &mut self,
        start: Pose,
        end: Pose,
        strategy: RotationStrategy,
    ) -> Result<AxisId, InterpError> {
        let settings = self.config.axis_settings(strategy)?;
        let axis = InterpolationAxis::from_settings(start, end, settings)?;
        Ok(self.add_axis(axis))
    }

    /// Add an axis using the configured default strategy and length.
    pub fn add_default_axis(&mut self, start: Pose, end: Pose) -> Result<AxisId, InterpError> {
        let settings = self.config.default_axis_settings()?;
        let axis = InterpolationAxis::from_settings(start, end, settings)?;
        Ok(self.add_axis(axis))
    }

    pub fn remove_axis(&mut self, id: AxisId) -> Result<InterpolationAxis, InterpError> {
        let index = self
            .axes
            .iter()
            .position(|(axis_id, _)| *axis_id == id)
            .ok_or(InterpError::AxisNotFound { id })?;
        Ok(self.axes.remove(index).1)
    }

    pub fn axis(&self, id: AxisId) -> Result<&InterpolationAxis, InterpError> {
        self.axes
            .iter()
            .find(|(axis_id, _)| *axis_id == id)
            .map(|(_, axis)| axis)
            .ok_or(InterpError::AxisNotFound { id })
    }

    pub fn axis_mut(&mut self, id: AxisId) -> Result<&mut InterpolationAxis, InterpError> {
        self.axes
            .iter_mut()
            .find(|(axis_id, _)| *axis_id == id)
            .map(|(_, axis)| axis)
            .ok_or(InterpError::AxisNotFound { id })
    }

    /// Drop every axis and stop. Ids are handed out from zero again.
    pub fn clear_axes(&mut self) {
        self.axes.clear();
        self.ids.reset();
        self.state = DriverState::Stopped;
        self.last_tick = None;
        log::debug!("driver cleared");
    }

    /// Preview of `id` with the configured frame count, kept on the axis.
    pub fn show_all_frames(&mut self, id: AxisId) -> Result<&[Pose], InterpError> {
        let frame_count = self.config.preview_frame_count;
        Ok(self.axis_mut(id)?.show_all_frames(frame_count))
    }

    /// Axes in insertion order.
    pub fn axes(&self) -> impl Iterator<Item = (AxisId, &InterpolationAxis)> {
        self.axes.iter().map(|(id, axis)| (*id, axis))
    }

    /// Restart every axis from its start pose and begin ticking.
    pub fn start(&mut self) -> Result<(), InterpError> {
        if self.state == DriverState::Running {
            return Err(self.invalid_transition(DriverState::Running));
        }
        for (_, axis) in &mut self.axes {
            axis.restart();
        }
        self.started_at = self.clock.now();
        self.last_tick = None;
        self.elapsed = AnimationTime::zero();
        self.state = DriverState::Running;
        log::debug!("driver started with {} axes", self.axes.len());
        Ok(())
    }

    /// Halt future ticks. Axes keep their current pose.
    pub fn stop(&mut self) -> Result<(), InterpError> {
        if self.state != DriverState::Running {
            return Err(self.invalid_transition(DriverState::Stopped));
        }
        self.state = DriverState::Stopped;
        log::debug!("driver stopped at {} ms", self.elapsed.as_millis());
        Ok(())
    }

    /// Tick all axes if at least one interval has passed since the last tick.
    pub fn poll(&mut self) -> TickOutcome {
        if self.state != DriverState::Running {
            return TickOutcome::Inactive;
        }
        let now = self.clock.now();
        if let Some(last) = self.last_tick {
            if now.saturating_sub(last) < self.config.tick_interval() {
                return TickOutcome::Skipped;
            }
        }
        self.last_tick = Some(now);
        self.elapsed = AnimationTime::from(now.saturating_sub(self.started_at));

        let mut all_complete = true;
        for (_, axis) in &mut self.axes {
            axis.tick(self.elapsed);
            all_complete &= axis.state().is_complete();
        }
        log::trace!("driver tick at {} ms", self.elapsed.as_millis());

        if all_complete {
            self.state = DriverState::Complete;
            log::debug!("driver complete at {} ms", self.elapsed.as_millis());
        }
        TickOutcome::Ticked(self.elapsed)
    }

    /// Time left until the next poll would tick.
    pub fn until_next_tick(&self) -> Duration {
        let interval = self.config.tick_interval();
        match self.last_tick {
            Some(last) => interval.saturating_sub(self.clock.now().saturating_sub(last)),
            None => Duration::ZERO,
        }
    }

    /// Start if needed, then alternate `poll` and `sleep` until every axis is
    /// complete. Returns the elapsed time of the final tick.
    ///
    /// `sleep` must let the clock advance, e.g. `std::thread::sleep` with a
    /// [`SystemClock`].
    pub fn run_until_complete(
        &mut self,
        mut sleep: impl FnMut(Duration),
    ) -> Result<AnimationTime, InterpError> {
        if self.state != DriverState::Running {
            self.start()?;
        }
        loop {
            self.poll();
            if self.state == DriverState::Complete {
                return Ok(self.elapsed);
            }
            let wait = self.until_next_tick();
            sleep(if wait.is_zero() {
                self.config.tick_interval()
            } else {
                wait
            });
        }
    }

    fn invalid_transition(&self, requested: DriverState) -> InterpError {
        InterpError::InvalidState {
            current: self.state.name().into(),
            requested: requested.name().into(),
        }
    }
}
