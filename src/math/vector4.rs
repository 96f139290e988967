use crate::error::{MathError, Result};

use super::Vector3;

/// A homogeneous 4-component vector.
///
/// Points carry `w = 1` and directions carry `w = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector4 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Lifts a 3D point into homogeneous coordinates (`w = 1`).
    #[must_use]
    pub const fn point(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    /// Lifts a 3D direction into homogeneous coordinates (`w = 0`).
    ///
    /// Directions are unaffected by the translation column of a matrix.
    #[must_use]
    pub const fn direction(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z, 0.0)
    }

    /// Drops `w` without dividing.
    #[must_use]
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Performs the perspective divide `(x/w, y/w, z/w)`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidOperation`] if `w` is zero, which is the
    /// case for directions and points at infinity.
    pub fn to_cartesian(&self) -> Result<Vector3> {
        if self.w == 0.0 {
            return Err(MathError::InvalidOperation(
                "cannot divide a homogeneous vector with w = 0".into(),
            )
            .into());
        }
        Ok(Vector3::new(self.x / self.w, self.y / self.w, self.z / self.w))
    }
}

impl From<nalgebra::Vector4<f64>> for Vector4 {
    fn from(v: nalgebra::Vector4<f64>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for nalgebra::Vector4<f64> {
    fn from(v: Vector4) -> Self {
        nalgebra::Vector4::new(v.x, v.y, v.z, v.w)
    }
}
