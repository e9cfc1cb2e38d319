//! Euler angle <-> quaternion conversion.
//!
//! Euler triples are in degrees and laid out as `(heading, attitude, bank)`:
//! - `x`: heading, rotation about +Y
//! - `y`: attitude, rotation about +Z (the pitch-like axis, singular at +-90)
//! - `z`: bank, rotation about +X
//!
//! Composition applies bank first and heading last:
//! `q = q_heading * q_attitude * q_bank`.

use crate::math::{Matrix3, Vector3, Vector4};

/// Fraction of the squared norm above which the attitude is treated as a pole.
pub const POLE_THRESHOLD: f64 = 0.499;

/// Rotation matrix for an Euler triple in degrees.
pub fn rotation_matrix_from_euler(angles: Vector3) -> Matrix3 {
    Matrix3::rotation_y(angles.x.to_radians())
        * Matrix3::rotation_z(angles.y.to_radians())
        * Matrix3::rotation_x(angles.z.to_radians())
}

/// Unit quaternion for a rotation matrix.
///
/// Divides by the largest of `4w`, `4x`, `4y`, `4z`, so rotations close to
/// 180 degrees (where `w` vanishes) stay well conditioned. The result is
/// normalized with `w >= 0`.
pub fn quaternion_from_rotation_matrix(r: &Matrix3) -> Vector4 {
    let m = &r.m;
    let trace = r.trace();
    let q = if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0;
        Vector4::new(
            (m[2][1] - m[1][2]) / s,
            (m[0][2] - m[2][0]) / s,
            (m[1][0] - m[0][1]) / s,
            0.25 * s,
        )
    } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
        let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0;
        Vector4::new(
            0.25 * s,
            (m[0][1] + m[1][0]) / s,
            (m[0][2] + m[2][0]) / s,
            (m[2][1] - m[1][2]) / s,
        )
    } else if m[1][1] > m[2][2] {
        let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt() * 2.0;
        Vector4::new(
            (m[0][1] + m[1][0]) / s,
            0.25 * s,
            (m[1][2] + m[2][1]) / s,
            (m[0][2] - m[2][0]) / s,
        )
    } else {
        let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt() * 2.0;
        Vector4::new(
            (m[0][2] + m[2][0]) / s,
            (m[1][2] + m[2][1]) / s,
            0.25 * s,
            (m[1][0] - m[0][1]) / s,
        )
    };
    let q = q.normalized();
    if q.w < 0.0 {
        -q
    } else {
        q
    }
}

/// Unit quaternion for an Euler triple in degrees.
pub fn quaternion_from_euler(angles: Vector3) -> Vector4 {
    quaternion_from_rotation_matrix(&rotation_matrix_from_euler(angles))
}

/// Euler triple in degrees for a quaternion.
///
/// The quaternion does not need to be unit length. Near the poles
/// (attitude +-90) heading and bank are coupled, so bank is pinned to 0 and
/// the combined angle goes to heading.
pub fn euler_from_quaternion(q: Vector4) -> Vector3 {
    let (sqx, sqy, sqz, sqw) = (q.x * q.x, q.y * q.y, q.z * q.z, q.w * q.w);
    let unit = sqx + sqy + sqz + sqw;
    if unit <= 0.0 {
        return Vector3::zero();
    }
    let test = q.x * q.y + q.z * q.w;

    if test > POLE_THRESHOLD * unit {
        return Vector3::new((2.0 * q.x.atan2(q.w)).to_degrees(), 90.0, 0.0);
    }
    if test < -POLE_THRESHOLD * unit {
        return Vector3::new((-2.0 * q.x.atan2(q.w)).to_degrees(), -90.0, 0.0);
    }

    let heading = (2.0 * q.y * q.w - 2.0 * q.x * q.z).atan2(sqx - sqy - sqz + sqw);
    let attitude = (2.0 * test / unit).clamp(-1.0, 1.0).asin();
    let bank = (2.0 * q.x * q.w - 2.0 * q.y * q.z).atan2(-sqx + sqy - sqz + sqw);
    Vector3::new(heading.to_degrees(), attitude.to_degrees(), bank.to_degrees())
}

/// Wrap a single angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Wrap every component of an Euler triple into `[0, 360)`.
pub fn normalize_degrees(angles: Vector3) -> Vector3 {
    Vector3::new(
        wrap_degrees(angles.x),
        wrap_degrees(angles.y),
        wrap_degrees(angles.z),
    )
}
