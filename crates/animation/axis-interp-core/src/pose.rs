//! Pose: a position plus an orientation held in two synchronized forms.
//!
//! Editors may change either the Euler triple or the quaternion. Each setter
//! stores its value and calls [`Pose::sync`], which recomputes the other form
//! through the opposite setter. A one-shot `suppress_sync` flag keeps that
//! nested setter from syncing back.

use serde::{Deserialize, Serialize};

use crate::math::{Vector3, Vector4};
use crate::rotation::{euler_from_quaternion, quaternion_from_euler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncSource {
    Euler,
    Quaternion,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "PoseRepr", into = "PoseRepr")]
pub struct Pose {
    position: Vector3,
    /// Degrees, `(heading, attitude, bank)`.
    rotation_euler: Vector3,
    /// Unit quaternion `(x, y, z, w)`.
    rotation_quaternion: Vector4,
    suppress_sync: bool,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Pose {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.rotation_euler == other.rotation_euler
            && self.rotation_quaternion == other.rotation_quaternion
    }
}

impl Pose {
    /// Origin, no rotation.
    pub fn identity() -> Self {
        Self {
            position: Vector3::zero(),
            rotation_euler: Vector3::zero(),
            rotation_quaternion: Vector4::IDENTITY,
            suppress_sync: false,
        }
    }

    /// Pose from a position and Euler angles in degrees.
    pub fn from_euler(position: Vector3, angles: Vector3) -> Self {
        let mut pose = Self::identity();
        pose.position = position;
        pose.set_euler(angles);
        pose
    }

    /// Pose from a position and a quaternion (normalized on the way in).
    pub fn from_quaternion(position: Vector3, rotation: Vector4) -> Self {
        let mut pose = Self::identity();
        pose.position = position;
        pose.set_quaternion(rotation);
        pose
    }

    #[inline]
    pub fn position(&self) -> Vector3 {
        self.position
    }

    #[inline]
    pub fn rotation_euler(&self) -> Vector3 {
        self.rotation_euler
    }

    #[inline]
    pub fn rotation_quaternion(&self) -> Vector4 {
        self.rotation_quaternion
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    /// Store Euler angles (degrees) and recompute the quaternion.
    pub fn set_euler(&mut self, angles: Vector3) {
        self.rotation_euler = angles;
        self.sync(SyncSource::Euler);
    }

    /// Store a quaternion, normalized, and recompute the Euler angles.
    ///
    /// A zero quaternion carries no rotation and is stored as identity.
    pub fn set_quaternion(&mut self, rotation: Vector4) {
        self.rotation_quaternion = if rotation.length_squared() > 0.0 {
            rotation.normalized()
        } else {
            Vector4::IDENTITY
        };
        self.sync(SyncSource::Quaternion);
    }

    fn sync(&mut self, source: SyncSource) {
        if self.suppress_sync {
            return;
        }
        self.suppress_sync = true;
        match source {
            SyncSource::Euler => self.set_quaternion(quaternion_from_euler(self.rotation_euler)),
            SyncSource::Quaternion => self.set_euler(euler_from_quaternion(self.rotation_quaternion)),
        }
        self.suppress_sync = false;
    }

    /// Whether the two rotation forms describe the same rotation within `tolerance`
    /// (compared on the quaternion dot product, sign-insensitive).
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        let expected = quaternion_from_euler(self.rotation_euler);
        (expected.dot(&self.rotation_quaternion).abs() - 1.0).abs() <= tolerance
    }
}

/// Wire form: position plus either rotation form. The quaternion wins when
/// both are present, and the other form is recomputed.
#[derive(Serialize, Deserialize)]
struct PoseRepr {
    #[serde(default)]
    position: Vector3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotation_euler: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotation_quaternion: Option<Vector4>,
}

impl From<PoseRepr> for Pose {
    fn from(repr: PoseRepr) -> Self {
        match (repr.rotation_quaternion, repr.rotation_euler) {
            (Some(q), _) => Pose::from_quaternion(repr.position, q),
            (None, Some(e)) => Pose::from_euler(repr.position, e),
            (None, None) => Pose::from_euler(repr.position, Vector3::zero()),
        }
    }
}

impl From<Pose> for PoseRepr {
    fn from(pose: Pose) -> Self {
        Self {
            position: pose.position,
            rotation_euler: Some(pose.rotation_euler),
            rotation_quaternion: Some(pose.rotation_quaternion),
        }
    }
}
