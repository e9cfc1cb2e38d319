//! Rotation interpolation strategies.
//!
//! Every function here takes a normalized progress `u = t / T` in `[0, 1]`.
//! Position is always blended linearly; orientation is blended either per
//! Euler component or through quaternions.

use serde::{Deserialize, Serialize};

use crate::math::{Vector3, Vector4};
use crate::pose::Pose;

/// `|dot(start, end)|` closer than this to 1 means "same rotation": the start
/// orientation is returned as is.
pub const QUAT_DOT_EPSILON: f64 = 1e-3;

/// Smallest arc (radians) Slerp will divide by.
pub const SLERP_ANGLE_EPSILON: f64 = 1e-6;

/// Quaternion blend flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuaternionInterpolation {
    /// Normalized linear blend. Cheaper, angular speed is not constant.
    Lerp,
    /// Spherical linear interpolation, constant angular speed.
    #[default]
    Slerp,
}

impl QuaternionInterpolation {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lerp => "lerp",
            Self::Slerp => "slerp",
        }
    }
}

/// How an axis interpolates its orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RotationStrategy {
    /// Per-component linear blend of the Euler triples, in raw degrees.
    Euler,
    /// Quaternion blend with shortest-arc sign correction.
    Quaternion { kind: QuaternionInterpolation },
}

impl Default for RotationStrategy {
    fn default() -> Self {
        Self::Quaternion {
            kind: QuaternionInterpolation::Slerp,
        }
    }
}

impl RotationStrategy {
    pub fn slerp() -> Self {
        Self::Quaternion {
            kind: QuaternionInterpolation::Slerp,
        }
    }

    pub fn lerp() -> Self {
        Self::Quaternion {
            kind: QuaternionInterpolation::Lerp,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::Quaternion { kind } => kind.name(),
        }
    }

    /// Pose at normalized progress `u`.
    ///
    /// `u <= 0` yields `start` and `u >= 1` yields `end`, both exactly.
    pub fn pose_at(&self, start: &Pose, end: &Pose, u: f64) -> Pose {
        if u.is_nan() || u <= 0.0 {
            return *start;
        }
        if u >= 1.0 {
            return *end;
        }
        let position = interpolate_position(start.position(), end.position(), u);
        match self {
            Self::Euler => Pose::from_euler(
                position,
                interpolate_euler(start.rotation_euler(), end.rotation_euler(), u),
            ),
            Self::Quaternion { kind } => Pose::from_quaternion(
                position,
                interpolate_quaternion(
                    start.rotation_quaternion(),
                    end.rotation_quaternion(),
                    u,
                    *kind,
                ),
            ),
        }
    }
}

#[inline]
fn blend3(start: Vector3, end: Vector3, u: f64) -> Vector3 {
    if u <= 0.0 {
        start
    } else if u >= 1.0 {
        end
    } else {
        start + (end - start) * u
    }
}

/// Linear position blend, exact at both ends.
#[inline]
pub fn interpolate_position(start: Vector3, end: Vector3, u: f64) -> Vector3 {
    blend3(start, end, u)
}

/// Per-component Euler blend on raw degrees.
///
/// There is no wraparound handling: going from 350 to 10 sweeps 340 degrees
/// backwards. Callers that want the short way must put both triples in the
/// same winding first.
#[inline]
pub fn interpolate_euler(start: Vector3, end: Vector3, u: f64) -> Vector3 {
    blend3(start, end, u)
}

/// Shared quaternion pre-step. Returns the sign-corrected end and the clamped
/// cosine of the half-angle between them, or `None` when both describe the
/// same rotation (identical or antipodal).
fn shortest_arc(start: &Vector4, end: &Vector4) -> Option<(Vector4, f64)> {
    let mut end = *end;
    let mut cos_theta = start.dot(&end);
    if (1.0 - cos_theta.abs()) < QUAT_DOT_EPSILON {
        return None;
    }
    if cos_theta < 0.0 {
        end = -end;
        cos_theta = -cos_theta;
    }
    Some((end, cos_theta.clamp(-1.0, 1.0)))
}

/// Normalized linear quaternion blend along the shorter arc.
pub fn lerp_quaternion(start: Vector4, end: Vector4, u: f64) -> Vector4 {
    let start = start.normalized();
    let Some((end, _)) = shortest_arc(&start, &end.normalized()) else {
        return start;
    };
    (start * (1.0 - u) + end * u).normalized()
}

/// Spherical linear quaternion interpolation along the shorter arc.
pub fn slerp_quaternion(start: Vector4, end: Vector4, u: f64) -> Vector4 {
    let start = start.normalized();
    let Some((end, cos_theta)) = shortest_arc(&start, &end.normalized()) else {
        return start;
    };
    let theta = cos_theta.acos();
    if theta < SLERP_ANGLE_EPSILON {
        return start;
    }
    let sin_theta = theta.sin();
    let a = ((1.0 - u) * theta).sin() / sin_theta;
    let b = (u * theta).sin() / sin_theta;
    (start * a + end * b).normalized()
}

pub fn interpolate_quaternion(
    start: Vector4,
    end: Vector4,
    u: f64,
    kind: QuaternionInterpolation,
) -> Vector4 {
    match kind {
        QuaternionInterpolation::Lerp => lerp_quaternion(start, end, u),
        QuaternionInterpolation::Slerp => slerp_quaternion(start, end, u),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::UnitQuaternion;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

    const Z90: Vector4 = Vector4::new(0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2);

    #[test]
    fn slerp_midpoint_about_z() {
        let q = slerp_quaternion(Vector4::IDENTITY, Z90, 0.5);
        let half = 22.5_f64.to_radians();
        let expected = Vector4::new(0.0, 0.0, half.sin(), half.cos());
        assert!((q - expected).length() < 1e-9, "{q:?}");
    }

    #[test]
    fn slerp_matches_nalgebra() {
        let a = Vector4::new(0.2, -0.4, 0.1, 0.9).normalized();
        let b = Vector4::new(-0.5, 0.3, 0.7, 0.2).normalized();
        for i in 0..=10 {
            let u = i as f64 / 10.0;
            let ours = slerp_quaternion(a, b, u);
            let theirs = Vector4::from(UnitQuaternion::from(a).slerp(&UnitQuaternion::from(b), u));
            assert!((ours - theirs).length() < 1e-9, "u={u}");
        }
    }

    #[test]
    fn slerp_takes_short_arc_for_negative_dot() {
        // -Z90 is the same rotation as Z90 but on the other hemisphere
        let q = slerp_quaternion(Vector4::IDENTITY, -Z90, 0.5);
        assert!((Vector4::IDENTITY.angle_to(&q) - FRAC_PI_2 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn antipodal_pair_does_not_rotate() {
        let start = Vector4::IDENTITY;
        let end = Vector4::new(0.0, 0.0, 0.0, -1.0);
        for u in [0.1, 0.5, 0.9] {
            assert_eq!(slerp_quaternion(start, end, u), start);
            assert_eq!(lerp_quaternion(start, end, u), start);
        }
    }

    #[test]
    fn nearly_identical_rotations_hold_start() {
        let start = Vector4::IDENTITY;
        let end = Vector4::new(0.0, 0.0, 0.01, 1.0).normalized();
        assert_eq!(slerp_quaternion(start, end, 0.5), start);
    }

    #[test]
    fn lerp_is_normalized_and_on_the_arc() {
        let q = lerp_quaternion(Vector4::IDENTITY, Z90, 0.5);
        assert!((q.length() - 1.0).abs() < 1e-12);
        // the symmetric midpoint of Lerp coincides with Slerp's
        let s = slerp_quaternion(Vector4::IDENTITY, Z90, 0.5);
        assert!((q - s).length() < 1e-12);
        // off-centre they differ
        let q = lerp_quaternion(Vector4::IDENTITY, Z90, 0.25);
        let s = slerp_quaternion(Vector4::IDENTITY, Z90, 0.25);
        assert!((q - s).length() > 1e-4);
    }

    #[test]
    fn euler_blend_has_no_wraparound() {
        let e = interpolate_euler(Vector3::new(350.0, 0.0, 0.0), Vector3::new(10.0, 0.0, 0.0), 0.5);
        assert_eq!(e, Vector3::new(180.0, 0.0, 0.0));
    }

    #[test]
    fn pose_at_returns_endpoints_exactly() {
        let start = Pose::from_euler(Vector3::new(-20.0, 0.0, 10.0), Vector3::new(10.0, 20.0, 30.0));
        let end = Pose::from_euler(Vector3::new(20.0, 0.0, -10.0), Vector3::new(-40.0, 5.0, 60.0));
        for strategy in [RotationStrategy::Euler, RotationStrategy::lerp(), RotationStrategy::slerp()] {
            assert_eq!(strategy.pose_at(&start, &end, 0.0), start);
            assert_eq!(strategy.pose_at(&start, &end, -3.0), start);
            assert_eq!(strategy.pose_at(&start, &end, 1.0), end);
            assert_eq!(strategy.pose_at(&start, &end, 2.0), end);
        }
    }

    #[test]
    fn euler_strategy_blends_degrees() {
        let start = Pose::from_euler(Vector3::zero(), Vector3::new(0.0, 0.0, 0.0));
        let end = Pose::from_euler(Vector3::zero(), Vector3::new(90.0, 40.0, -60.0));
        let mid = RotationStrategy::Euler.pose_at(&start, &end, 0.5);
        assert_eq!(mid.rotation_euler(), Vector3::new(45.0, 20.0, -30.0));
        assert!(mid.is_consistent(1e-12));
    }

    #[test]
    fn strategy_serde_shape() {
        let json = serde_json::to_string(&RotationStrategy::lerp()).unwrap();
        assert_eq!(json, r#"{"type":"quaternion","kind":"lerp"}"#);
        let back: RotationStrategy = serde_json::from_str(r#"{"type":"euler"}"#).unwrap();
        assert_eq!(back, RotationStrategy::Euler);
        assert_eq!(RotationStrategy::default().name(), "slerp");
    }
}
