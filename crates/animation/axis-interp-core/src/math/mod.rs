//! Vector and matrix value types used by the interpolation engine.

pub mod matrix;
pub mod vector3;
pub mod vector4;

pub use matrix::*;
pub use vector3::*;
pub use vector4::*;
