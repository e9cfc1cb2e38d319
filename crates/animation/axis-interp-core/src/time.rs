//! Animation time.
//!
//! Elapsed time and animation length share one unit, so the `t / T` progress
//! used by every strategy is always unit-consistent.

use std::ops::{Add, Sub};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InterpError;

const NANOS_PER_MILLI: f64 = 1_000_000.0;
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// A point in (or span of) animation time, in whole nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash, Default, Serialize, Deserialize)]
pub struct AnimationTime(u64);

impl AnimationTime {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Rejects negative, NaN and infinite input.
    pub fn from_millis(millis: f64) -> Result<Self, InterpError> {
        if !millis.is_finite() || millis < 0.0 {
            return Err(InterpError::InvalidTime { time: millis });
        }
        Ok(Self((millis * NANOS_PER_MILLI).round() as u64))
    }

    /// Rejects negative, NaN and infinite input. The error reports milliseconds.
    pub fn from_seconds(seconds: f64) -> Result<Self, InterpError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(InterpError::InvalidTime {
                time: seconds * 1000.0,
            });
        }
        Ok(Self((seconds * NANOS_PER_SECOND).round() as u64))
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> f64 {
        self.0 as f64 / NANOS_PER_MILLI
    }

    #[inline]
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / NANOS_PER_SECOND
    }
}

impl Add for AnimationTime {
    type Output = Self;

    /// Saturates at `u64::MAX` nanoseconds.
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for AnimationTime {
    type Output = Self;

    /// Saturates at zero.
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl From<Duration> for AnimationTime {
    fn from(value: Duration) -> Self {
        Self(u64::try_from(value.as_nanos()).unwrap_or(u64::MAX))
    }
}

impl From<AnimationTime> for Duration {
    fn from(value: AnimationTime) -> Self {
        Duration::from_nanos(value.0)
    }
}

/// Closed window `[start, end]` of animation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: AnimationTime,
    pub end: AnimationTime,
}

impl TimeRange {
    pub fn new(start: AnimationTime, end: AnimationTime) -> Result<Self, InterpError> {
        if end < start {
            return Err(InterpError::InvalidTime {
                time: end.as_millis() - start.as_millis(),
            });
        }
        Ok(Self { start, end })
    }

    /// `[0, length]`.
    #[inline]
    pub fn from_duration(length: AnimationTime) -> Self {
        Self {
            start: AnimationTime::ZERO,
            end: length,
        }
    }

    #[inline]
    pub fn length(&self) -> AnimationTime {
        self.end - self.start
    }

    /// Progress of `time` through the window, clamped to `[0, 1]`.
    ///
    /// Exactly 0 at or before `start`, exactly 1 at or after `end`. An empty
    /// window is already over, so it reports 1.
    pub fn progress(&self, time: AnimationTime) -> f64 {
        if time >= self.end {
            1.0
        } else if time <= self.start {
            0.0
        } else {
            let offset = (time - self.start).as_nanos() as f64;
            (offset / self.length().as_nanos() as f64).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: f64) -> AnimationTime {
        AnimationTime::from_millis(v).unwrap()
    }

    #[test]
    fn unit_conversions() {
        let t = AnimationTime::from_seconds(0.25).unwrap();
        assert_eq!(t, ms(250.0));
        assert_eq!(t.as_nanos(), 250_000_000);
        assert_eq!(t.as_millis(), 250.0);
        assert_eq!(t.as_seconds(), 0.25);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert_eq!(
            AnimationTime::from_millis(-5.0).unwrap_err(),
            InterpError::InvalidTime { time: -5.0 }
        );
        assert!(AnimationTime::from_millis(f64::NAN).is_err());
        assert!(AnimationTime::from_seconds(f64::INFINITY).is_err());
    }

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(ms(10.0) - ms(20.0), AnimationTime::ZERO);
        assert_eq!(
            AnimationTime::from_nanos(u64::MAX) + ms(1.0),
            AnimationTime::from_nanos(u64::MAX)
        );
        assert_eq!(ms(1.5) + ms(2.5), ms(4.0));
    }

    #[test]
    fn duration_interop() {
        let t = AnimationTime::from(Duration::from_micros(1500));
        assert_eq!(t, ms(1.5));
        assert_eq!(Duration::from(t), Duration::from_micros(1500));
    }

    #[test]
    fn progress_is_clamped_and_exact_at_edges() {
        let window = TimeRange::from_duration(ms(7000.0));
        assert_eq!(window.progress(AnimationTime::ZERO), 0.0);
        assert_eq!(window.progress(ms(3500.0)), 0.5);
        assert_eq!(window.progress(ms(7000.0)), 1.0);
        assert_eq!(window.progress(ms(12000.0)), 1.0);

        let offset = TimeRange::new(ms(100.0), ms(300.0)).unwrap();
        assert_eq!(offset.progress(ms(50.0)), 0.0);
        assert_eq!(offset.progress(ms(150.0)), 0.25);
        assert_eq!(offset.length(), ms(200.0));
    }

    #[test]
    fn empty_window_is_already_over() {
        assert_eq!(TimeRange::from_duration(AnimationTime::ZERO).progress(AnimationTime::ZERO), 1.0);
    }

    #[test]
    fn reversed_window_rejected() {
        assert!(TimeRange::new(ms(10.0), ms(5.0)).is_err());
    }
}
