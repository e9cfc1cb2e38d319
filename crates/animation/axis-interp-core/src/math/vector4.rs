use crate::math::vector3::Vector3;
use nalgebra::{Quaternion, UnitQuaternion, Vector4 as NVector4};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// 4D vector type. Doubles as a quaternion `(x, y, z, w)` with `w` the scalar part.
///
/// Nothing here enforces unit length: code that consumes a `Vector4` as a
/// rotation normalizes it first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Vector4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Vector4 {
    /// Identity rotation quaternion.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Unit-length copy. The zero vector is returned unchanged.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            *self / len
        } else {
            Self::zero()
        }
    }

    pub fn dot(&self, other: &Vector4) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Cross product of the xyz parts; `w` is set to 1.
    pub fn cross(&self, other: &Vector4) -> Vector4 {
        let c = self.xyz().cross(&other.xyz());
        Vector4::new(c.x, c.y, c.z, 1.0)
    }

    pub fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Hamilton product `self * rhs` (apply `rhs` first, then `self`).
    pub fn quat_mul(&self, rhs: &Vector4) -> Vector4 {
        let (a, b) = (self, rhs);
        Vector4::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }

    pub fn conjugate(&self) -> Vector4 {
        Vector4::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotation angle in radians between two rotations, in `[0, PI]`.
    ///
    /// Sign-insensitive: `q` and `-q` are at distance zero.
    pub fn angle_to(&self, other: &Vector4) -> f64 {
        let d = self.normalized().dot(&other.normalized()).abs().min(1.0);
        2.0 * d.acos()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f64; 4]> for Vector4 {
    fn from(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl From<NVector4<f64>> for Vector4 {
    fn from(v: NVector4<f64>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for NVector4<f64> {
    fn from(v: Vector4) -> Self {
        NVector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<UnitQuaternion<f64>> for Vector4 {
    fn from(q: UnitQuaternion<f64>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

impl From<Vector4> for UnitQuaternion<f64> {
    fn from(v: Vector4) -> Self {
        UnitQuaternion::new_normalize(Quaternion::new(v.w, v.x, v.y, v.z))
    }
}

impl Add for Vector4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Vector4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Neg for Vector4 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f64> for Vector4 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Vector4> for f64 {
    type Output = Vector4;
    fn mul(self, rhs: Vector4) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vector4> for Vector4 {
    type Output = f64;
    fn mul(self, rhs: Vector4) -> Self::Output {
        self.dot(&rhs)
    }
}

impl Div<f64> for Vector4 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}
