//! Frame preview sampling.
//!
//! A preview is a snapshot of `frame_count` poses at evenly spaced, strictly
//! interior time offsets `i * T / (frame_count + 1)` for `i = 1..=frame_count`.
//! The start and end poses are already known to the caller and are not
//! repeated. Fewer than two frames produce an empty preview.

use crate::axis::InterpolationAxis;
use crate::pose::Pose;
use crate::time::{AnimationTime, TimeRange};

/// Smallest frame count that produces a preview.
pub const MIN_PREVIEW_FRAMES: usize = 2;

/// Interior progress values `i / (frame_count + 1)` for `i = 1..=frame_count`.
pub fn frame_progress(frame_count: usize) -> Vec<f64> {
    if frame_count < MIN_PREVIEW_FRAMES {
        return Vec::new();
    }
    let slots = (frame_count + 1) as f64;
    (1..=frame_count).map(|i| i as f64 / slots).collect()
}

/// Interior time offsets for a preview of `frame_count` frames, rounded to
/// whole nanoseconds. Labels only: sampling goes through [`frame_progress`],
/// so very short lengths still give interior frames.
pub fn frame_offsets(animation_length: AnimationTime, frame_count: usize) -> Vec<AnimationTime> {
    let range = TimeRange::from_duration(animation_length);
    frame_progress(frame_count)
        .into_iter()
        .map(|u| {
            let nanos = (range.length().as_nanos() as f64 * u).round() as u64;
            AnimationTime::from_nanos(nanos)
        })
        .collect()
}

/// Sample `frame_count` interior poses of `axis` over `animation_length`.
///
/// Progress `t_i / T` equals `i / (frame_count + 1)` for any length, so the
/// poses are computed from progress directly.
pub fn sample_frames(
    axis: &InterpolationAxis,
    animation_length: AnimationTime,
    frame_count: usize,
) -> Vec<Pose> {
    let frames: Vec<Pose> = frame_progress(frame_count)
        .into_iter()
        .map(|u| axis.strategy().pose_at(axis.start(), axis.end(), u))
        .collect();
    log::trace!(
        "sampled {} preview frames ({}) over {} ms",
        frames.len(),
        axis.strategy().name(),
        animation_length.as_millis()
    );
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::strategy::RotationStrategy;

    fn ms(v: f64) -> AnimationTime {
        AnimationTime::from_millis(v).unwrap()
    }

    #[test]
    fn offsets_are_strictly_interior() {
        let offsets = frame_offsets(ms(1000.0), 4);
        assert_eq!(offsets, vec![ms(200.0), ms(400.0), ms(600.0), ms(800.0)]);
    }

    #[test]
    fn tiny_lengths_still_sample_interior_frames() {
        let start = Pose::from_euler(Vector3::zero(), Vector3::new(0.0, 0.0, 0.0));
        let end = Pose::from_euler(Vector3::zero(), Vector3::new(60.0, 0.0, 0.0));
        let length = AnimationTime::from_nanos(1);
        let axis = InterpolationAxis::new(start, end, RotationStrategy::Euler, length).unwrap();

        let frames = sample_frames(&axis, length, 5);
        assert_eq!(frames.len(), 5);
        let mut previous = 0.0;
        for frame in &frames {
            let heading = frame.rotation_euler().x;
            assert!(heading > previous && heading < 60.0, "{heading}");
            previous = heading;
        }
    }

    #[test]
    fn fewer_than_two_frames_is_empty() {
        assert!(frame_progress(1).is_empty());
        assert!(frame_offsets(ms(1000.0), 0).is_empty());
        assert!(frame_offsets(ms(1000.0), 1).is_empty());
        assert_eq!(frame_offsets(ms(1000.0), 2).len(), 2);
    }
}
