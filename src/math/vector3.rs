use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{MathError, Result};

/// A 3-component vector representing a point or direction in 3D space.
///
/// Mutating operations take `&mut self`, so the caller must hold the vector
/// exclusively while changing it. Most of them also have a value-returning
/// counterpart (`normalized`, `inverted`, `scaled`) for callers that prefer
/// to keep the source untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Returns the Euclidean length `sqrt(x² + y² + z²)`.
    ///
    /// Computed with `hypot`, so it neither underflows to zero for tiny
    /// non-zero vectors nor overflows for large finite ones.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Returns `x² + y² + z²`.
    #[must_use]
    pub fn squared_magnitude(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Scales this vector to unit length in place.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidOperation`] if the vector has zero
    /// magnitude or a non-finite component. The vector is left unchanged in
    /// that case.
    pub fn normalize(&mut self) -> Result<()> {
        let largest = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if largest == 0.0 {
            return Err(
                MathError::InvalidOperation("cannot normalize a zero-length vector".into()).into(),
            );
        }
        if !largest.is_finite() || self.x.is_nan() || self.y.is_nan() || self.z.is_nan() {
            return Err(MathError::InvalidOperation(
                "cannot normalize a vector with non-finite components".into(),
            )
            .into());
        }

        // Rescale by the largest component first so the length stays in [1, √3].
        let scaled = Self::new(self.x / largest, self.y / largest, self.z / largest);
        let length = scaled.magnitude();
        self.set_components(scaled.x / length, scaled.y / length, scaled.z / length);
        Ok(())
    }

    /// Returns a unit-length copy of this vector.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidOperation`] if the vector has zero magnitude.
    pub fn normalized(&self) -> Result<Self> {
        let mut v = *self;
        v.normalize()?;
        Ok(v)
    }

    /// Negates all components in place.
    pub fn invert(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
    }

    /// Returns a negated copy of this vector.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    /// Adds `v` component-wise.
    pub fn add_vector(&mut self, v: &Vector3) {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
    }

    /// Subtracts `v` component-wise.
    pub fn subtract_vector(&mut self, v: &Vector3) {
        self.x -= v.x;
        self.y -= v.y;
        self.z -= v.z;
    }

    /// Adds `v` scaled by `s`, without building the scaled vector.
    pub fn add_scaled_vector(&mut self, s: f64, v: &Vector3) {
        self.x += s * v.x;
        self.y += s * v.y;
        self.z += s * v.z;
    }

    /// Overwrites all three components.
    pub fn set_components(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Resets this vector to zero.
    pub fn clear(&mut self) {
        self.set_components(0.0, 0.0, 0.0);
    }

    /// Multiplies every component by `s` in place.
    pub fn multiply_scalar(&mut self, s: f64) {
        self.x *= s;
        self.y *= s;
        self.z *= s;
    }

    /// Returns a copy of this vector multiplied by `s`.
    #[must_use]
    pub fn scaled(&self, s: f64) -> Self {
        Self::scalar_product(s, self)
    }

    /// Component-wise (Hadamard) product.
    #[must_use]
    pub fn component_product(&self, v: &Vector3) -> Self {
        Self::new(self.x * v.x, self.y * v.y, self.z * v.z)
    }

    /// Replaces this vector with its component-wise product with `v`.
    pub fn component_product_update(&mut self, v: &Vector3) {
        self.x *= v.x;
        self.y *= v.y;
        self.z *= v.z;
    }

    #[must_use]
    pub fn dot_product(&self, v: &Vector3) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    /// Standard right-handed cross product `self × v`.
    #[must_use]
    pub fn cross(&self, v: &Vector3) -> Self {
        Self::cross_product(self, v)
    }

    /// Returns `(s·v.x, s·v.y, s·v.z)`.
    #[must_use]
    pub fn scalar_product(s: f64, v: &Vector3) -> Self {
        Self::new(s * v.x, s * v.y, s * v.z)
    }

    /// Standard right-handed cross product `v1 × v2`.
    #[must_use]
    pub fn cross_product(v1: &Vector3, v2: &Vector3) -> Self {
        Self::new(
            v1.y * v2.z - v1.z * v2.y,
            v1.z * v2.x - v1.x * v2.z,
            v1.x * v2.y - v1.y * v2.x,
        )
    }

    /// The cross-product formula used by the JavaScript rendering demo.
    ///
    /// Computes `(y1·z2 − y2·z1, x1·z2 − x2·z1, x1·y2 − x2·x1)`. The y
    /// component has the wrong sign and the z component multiplies `x2·x1`
    /// instead of `y1·x2`, so this is not a cross product in general. It
    /// exists so call sites ported from the demo can reproduce its output;
    /// new code should use [`Vector3::cross_product`].
    #[must_use]
    pub fn cross_product_legacy(v1: &Vector3, v2: &Vector3) -> Self {
        Self::new(
            v1.y * v2.z - v2.y * v1.z,
            v1.x * v2.z - v2.x * v1.z,
            v1.x * v2.y - v2.x * v1.x,
        )
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.add_vector(&rhs);
        self
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.add_vector(&rhs);
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self.subtract_vector(&rhs);
        self
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.subtract_vector(&rhs);
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        self.inverted()
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scaled(rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs.scaled(self)
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.multiply_scalar(rhs);
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Point3<f64>> for Vector3 {
    fn from(p: nalgebra::Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vector3> for nalgebra::Point3<f64> {
    fn from(v: Vector3) -> Self {
        nalgebra::Point3::new(v.x, v.y, v.z)
    }
}
