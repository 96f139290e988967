//! Stateless matrix and vector algebra.
//!
//! Matrices are row-major and act on column vectors, so
//! `matrix4_product(a, b)` applied to a point performs `b` first, then `a`:
//! `(A·B)·v = A·(B·v)`.

use crate::error::{MathError, Result};

use super::{Matrix4, Vector3, Vector4};

/// Returns the matrix product `a · b`.
#[must_use]
pub fn matrix4_product(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    Matrix4::from_array(std::array::from_fn(|idx| {
        let (i, j) = (idx / 4, idx % 4);
        (0..4).map(|k| a.at(i, k) * b.at(k, j)).sum()
    }))
}

/// Returns `v1 + v2` as a new vector.
#[must_use]
pub fn vector3_sum(v1: &Vector3, v2: &Vector3) -> Vector3 {
    let mut result = *v1;
    result.add_vector(v2);
    result
}

/// Returns `v1 - v2` as a new vector.
#[must_use]
pub fn vector3_difference(v1: &Vector3, v2: &Vector3) -> Vector3 {
    let mut result = *v1;
    result.subtract_vector(v2);
    result
}

#[must_use]
pub fn vector3_dot_product(v1: &Vector3, v2: &Vector3) -> f64 {
    v1.x * v2.x + v1.y * v2.y + v1.z * v2.z
}

/// Returns `(s·v.x, s·v.y, s·v.z)`.
#[must_use]
pub fn multiply_scalar_and_vector3(s: f64, v: &Vector3) -> Vector3 {
    Vector3::new(s * v.x, s * v.y, s * v.z)
}

/// Transforms the point `v` by `m`, treating it as `(x, y, z, 1)`.
///
/// Only the first three rows of `m` are evaluated. The resulting `w` is
/// discarded and **no perspective divide is performed**, so the result is
/// only correct for affine matrices (translation, rotation, scale,
/// orthographic projection), whose bottom row is `[0, 0, 0, 1]`. For a
/// perspective matrix use [`multiply_matrix4_and_vector4`] followed by
/// [`Vector4::to_cartesian`].
#[must_use]
pub fn multiply_matrix4_and_vector3(m: &Matrix4, v: &Vector3) -> Vector3 {
    let row = |i: usize| m.at(i, 0) * v.x + m.at(i, 1) * v.y + m.at(i, 2) * v.z + m.at(i, 3);
    Vector3::new(row(0), row(1), row(2))
}

/// Full homogeneous product `m · v`.
#[must_use]
pub fn multiply_matrix4_and_vector4(m: &Matrix4, v: &Vector4) -> Vector4 {
    let row = |i: usize| m.at(i, 0) * v.x + m.at(i, 1) * v.y + m.at(i, 2) * v.z + m.at(i, 3) * v.w;
    Vector4::new(row(0), row(1), row(2), row(3))
}

/// Identity with `(tx, ty, tz)` in the last column.
#[must_use]
pub fn translation_matrix4(tx: f64, ty: f64, tz: f64) -> Matrix4 {
    Matrix4::from_array([
        1.0, 0.0, 0.0, tx,
        0.0, 1.0, 0.0, ty,
        0.0, 0.0, 1.0, tz,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Counter-clockwise rotation about the x axis, `angle` in radians.
#[must_use]
pub fn x_rotation_matrix4(angle: f64) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::from_array([
        1.0, 0.0, 0.0, 0.0,
        0.0, c,   -s,  0.0,
        0.0, s,   c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Counter-clockwise rotation about the y axis, `angle` in radians.
#[must_use]
pub fn y_rotation_matrix4(angle: f64) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::from_array([
        c,   0.0, s,   0.0,
        0.0, 1.0, 0.0, 0.0,
        -s,  0.0, c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Counter-clockwise rotation about the z axis, `angle` in radians.
#[must_use]
pub fn z_rotation_matrix4(angle: f64) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::from_array([
        c,   -s,  0.0, 0.0,
        s,   c,   0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Diagonal matrix `(sx, sy, sz, 1)`.
#[must_use]
pub fn scaling_matrix4(sx: f64, sy: f64, sz: f64) -> Matrix4 {
    Matrix4::from_array([
        sx,  0.0, 0.0, 0.0,
        0.0, sy,  0.0, 0.0,
        0.0, 0.0, sz,  0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Builds an orthographic projection from world space to clip space.
///
/// The box `[left, right] × [bottom, top] × [near, far]` is mapped onto the
/// cube `[-1, 1]³`. `near` and `far` are distances along the viewing
/// direction of a camera looking down `-z`, so `z = -near` maps to `-1` and
/// `z = -far` maps to `+1`. Passing `bottom > top` flips the y axis, which
/// puts the origin at the top of the viewport.
///
/// # Errors
///
/// Returns [`MathError::DegenerateVolume`] if any axis has a zero or
/// non-finite span, or if the bounds are so extreme that a coefficient would
/// overflow.
pub fn orthographic_projection_matrix4(
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    near: f64,
    far: f64,
) -> Result<Matrix4> {
    let (sx, tx) = axis_coefficients("x", left, right)?;
    let (sy, ty) = axis_coefficients("y", bottom, top)?;
    let (sz, tz) = axis_coefficients("z", near, far)?;

    Ok(Matrix4::from_array([
        sx,  0.0, 0.0, tx,
        0.0, sy,  0.0, ty,
        0.0, 0.0, -sz, tz,
        0.0, 0.0, 0.0, 1.0,
    ]))
}

/// Returns `(2 / span, -(max + min) / span)` for one axis of the clip box.
fn axis_coefficients(
    axis: &'static str,
    min: f64,
    max: f64,
) -> std::result::Result<(f64, f64), MathError> {
    let span = max - min;
    if span == 0.0 || !span.is_finite() {
        return Err(MathError::DegenerateVolume { axis });
    }
    let scale = 2.0 / span;
    let offset = -(max + min) / span;
    if !scale.is_finite() || !offset.is_finite() {
        return Err(MathError::DegenerateVolume { axis });
    }
    Ok((scale, offset))
}
