use std::ops::Mul;

use crate::error::{MathError, Result};

use super::linear_algebra::{
    matrix4_product, multiply_matrix4_and_vector3, multiply_matrix4_and_vector4,
};
use super::{Vector3, Vector4};

const DIM: usize = 4;
const LEN: usize = DIM * DIM;

/// A 4x4 matrix of `f64` coefficients in row-major order.
///
/// The element at row `i`, column `j` is stored at flat index `i * 4 + j`.
/// No method mutates the coefficients; composing transforms always produces
/// a new matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    elements: [f64; LEN],
}

impl Matrix4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_array([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Creates a matrix from 16 row-major coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ShapeMismatch`] if `elements` does not hold
    /// exactly 16 values.
    pub fn new(elements: &[f64]) -> Result<Self> {
        let elements: [f64; LEN] = elements.try_into().map_err(|_| MathError::ShapeMismatch {
            expected: LEN,
            actual: elements.len(),
        })?;
        Ok(Self { elements })
    }

    /// Creates a matrix from a fixed-size row-major array.
    #[must_use]
    pub const fn from_array(elements: [f64; LEN]) -> Self {
        Self { elements }
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the coefficient at row `i`, column `j` (both 0-indexed).
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfBounds`] if either index is outside
    /// `0..4`.
    pub fn get_element(&self, i: usize, j: usize) -> Result<f64> {
        check_index(i, j)?;
        Ok(self.elements[i * DIM + j])
    }

    /// Returns the flat row-major coefficients exactly as supplied.
    #[must_use]
    pub const fn get_elements(&self) -> &[f64; LEN] {
        &self.elements
    }

    /// Returns row `i`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfBounds`] if `i` is outside `0..4`.
    pub fn row(&self, i: usize) -> Result<[f64; DIM]> {
        check_index(i, 0)?;
        Ok(std::array::from_fn(|j| self.at(i, j)))
    }

    /// Returns column `j`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::IndexOutOfBounds`] if `j` is outside `0..4`.
    pub fn column(&self, j: usize) -> Result<[f64; DIM]> {
        check_index(0, j)?;
        Ok(std::array::from_fn(|i| self.at(i, j)))
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_array(std::array::from_fn(|k| self.at(k % DIM, k / DIM)))
    }

    /// Returns the coefficients flattened column by column, the layout
    /// WebGL's `uniformMatrix4fv` expects.
    #[must_use]
    pub fn to_column_major(&self) -> [f64; LEN] {
        self.transpose().elements
    }

    /// Unchecked access for indices already known to be in range.
    pub(crate) const fn at(&self, i: usize, j: usize) -> f64 {
        self.elements[i * DIM + j]
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn check_index(row: usize, column: usize) -> std::result::Result<(), MathError> {
    if row >= DIM || column >= DIM {
        return Err(MathError::IndexOutOfBounds { row, column });
    }
    Ok(())
}

impl TryFrom<&[f64]> for Matrix4 {
    type Error = crate::error::GfxError;

    fn try_from(elements: &[f64]) -> Result<Self> {
        Self::new(elements)
    }
}

impl TryFrom<Vec<f64>> for Matrix4 {
    type Error = crate::error::GfxError;

    fn try_from(elements: Vec<f64>) -> Result<Self> {
        Self::new(&elements)
    }
}

impl From<[f64; LEN]> for Matrix4 {
    fn from(elements: [f64; LEN]) -> Self {
        Self::from_array(elements)
    }
}

impl From<nalgebra::Matrix4<f64>> for Matrix4 {
    fn from(m: nalgebra::Matrix4<f64>) -> Self {
        Self::from_array(std::array::from_fn(|k| m[(k / DIM, k % DIM)]))
    }
}

impl From<Matrix4> for nalgebra::Matrix4<f64> {
    fn from(m: Matrix4) -> Self {
        nalgebra::Matrix4::from_row_slice(&m.elements)
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        matrix4_product(&self, &rhs)
    }
}

/// Affine point transform; see [`multiply_matrix4_and_vector3`].
impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        multiply_matrix4_and_vector3(&self, &rhs)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        multiply_matrix4_and_vector4(&self, &rhs)
    }
}
