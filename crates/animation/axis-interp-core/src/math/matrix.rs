//! Small row-major matrices for applying rotations to vectors.
//!
//! Fixed-size storage makes a dimension mismatch impossible for typed callers.
//! `from_rows` accepts runtime-sized input and treats a wrong shape as a
//! programmer error (it panics).

use crate::math::vector3::Vector3;
use crate::math::vector4::Vector4;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// 3x3 matrix, `m[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

/// 4x4 matrix, `m[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    pub m: [[f64; 4]; 4],
}

fn copy_rows<const N: usize, R: AsRef<[f64]>>(rows: &[R]) -> [[f64; N]; N] {
    assert_eq!(
        rows.len(),
        N,
        "matrix dimensions should be {}x{}, got {} rows",
        N,
        N,
        rows.len()
    );
    let mut out = [[0.0; N]; N];
    for (dst, src) in out.iter_mut().zip(rows) {
        let src = src.as_ref();
        assert_eq!(
            src.len(),
            N,
            "matrix dimensions should be {}x{}, got a row of {}",
            N,
            N,
            src.len()
        );
        dst.copy_from_slice(src);
    }
    out
}

impl Matrix3 {
    pub const fn new(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Build from runtime-sized rows.
    ///
    /// # Panics
    /// If `rows` is not exactly 3 rows of 3 values.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        Self::new(copy_rows::<3, R>(rows))
    }

    /// Right-handed rotation about +X by `radians`.
    pub fn rotation_x(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Right-handed rotation about +Y by `radians`.
    pub fn rotation_y(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Right-handed rotation about +Z by `radians`.
    pub fn rotation_z(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn trace(&self) -> f64 {
        self.m[0][0] + self.m[1][1] + self.m[2][2]
    }

    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::new([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;
    fn mul(self, rhs: Matrix3) -> Self::Output {
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }
        Matrix3::new(out)
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;
    fn mul(self, v: Vector3) -> Self::Output {
        let m = &self.m;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

impl Matrix4 {
    pub const fn new(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self::new(m)
    }

    /// Build from runtime-sized rows.
    ///
    /// # Panics
    /// If `rows` is not exactly 4 rows of 4 values.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        Self::new(copy_rows::<4, R>(rows))
    }

    /// Homogeneous transform with `rotation` in the upper-left block and
    /// `translation` in the last column.
    pub fn from_rotation_translation(rotation: &Matrix3, translation: Vector3) -> Self {
        let r = &rotation.m;
        Self::new([
            [r[0][0], r[0][1], r[0][2], translation.x],
            [r[1][0], r[1][1], r[1][2], translation.y],
            [r[2][0], r[2][1], r[2][2], translation.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

/// Column-vector application `M * v`.
impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;
    fn mul(self, v: Vector4) -> Self::Output {
        let row = |r: [f64; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w;
        Vector4::new(row(self.m[0]), row(self.m[1]), row(self.m[2]), row(self.m[3]))
    }
}

/// Row-vector application `v * M`.
impl Mul<Matrix4> for Vector4 {
    type Output = Vector4;
    fn mul(self, m: Matrix4) -> Self::Output {
        let col = |c: usize| {
            self.x * m.m[0][c] + self.y * m.m[1][c] + self.z * m.m[2][c] + self.w * m.m[3][c]
        };
        Vector4::new(col(0), col(1), col(2), col(3))
    }
}
