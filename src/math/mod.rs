pub mod linear_algebra;
pub mod matrix4;
pub mod vector3;
pub mod vector4;

pub use linear_algebra::{
    matrix4_product, multiply_matrix4_and_vector3, multiply_matrix4_and_vector4,
    multiply_scalar_and_vector3, orthographic_projection_matrix4, scaling_matrix4,
    translation_matrix4, vector3_difference, vector3_dot_product, vector3_sum,
    x_rotation_matrix4, y_rotation_matrix4, z_rotation_matrix4,
};
pub use matrix4::Matrix4;
pub use vector3::Vector3;
pub use vector4::Vector4;

/// Distance below which two points are treated as coincident.
///
/// Force generators use it to skip springs and drag with no usable
/// direction. Degeneracy checks in this module test for exact zero or
/// non-finite values instead, so tiny but valid inputs are accepted.
pub const TOLERANCE: f64 = 1e-10;
