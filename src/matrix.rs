//! Matrix helpers shared by the slice frame and the preset registry.

use nalgebra::Matrix3;
use nalgebra::Matrix4;
use nalgebra::Vector3;

/// Absolute tolerance used when deciding whether two matrices are the same.
pub const MATRIX_TOLERANCE: f64 = 1e-6;

/// Element-wise comparison of two 4x4 matrices within `tolerance`.
pub fn matrices_equal(a: &Matrix4<f64>, b: &Matrix4<f64>, tolerance: f64) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(lhs, rhs)| (lhs - rhs).abs() <= tolerance)
}

/// Compare the rotation block of `matrix` against an orientation matrix.
///
/// Each column of the rotation block is divided by its length first, so any
/// positive per-axis scale and the translation column are ignored. A
/// zero-length column never matches.
pub fn matches_orientation(
    matrix: &Matrix4<f64>,
    orientation: &Matrix3<f64>,
    tolerance: f64,
) -> bool {
    (0..3).all(|column| {
        let axis: Vector3<f64> = matrix.fixed_view::<3, 1>(0, column).into_owned();
        let norm = axis.norm();
        if norm == 0.0 {
            return false;
        }
        (0..3).all(|row| (axis[row] / norm - orientation[(row, column)]).abs() <= tolerance)
    })
}

/// Rotation (upper-left 3x3) block of an affine matrix.
pub fn rotation_block(matrix: &Matrix4<f64>) -> Matrix3<f64> {
    matrix.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Translation column of an affine matrix.
pub fn translation(matrix: &Matrix4<f64>) -> Vector3<f64> {
    matrix.fixed_view::<3, 1>(0, 3).into_owned()
}

/// Copy of `matrix` with its rotation block replaced, translation kept.
pub fn with_rotation(matrix: &Matrix4<f64>, rotation: &Matrix3<f64>) -> Matrix4<f64> {
    let mut result = *matrix;
    result.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
    result
}

/// Copy of `matrix` with its translation column replaced.
pub fn with_translation(matrix: &Matrix4<f64>, translation: &Vector3<f64>) -> Matrix4<f64> {
    let mut result = *matrix;
    result.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
    result
}

/// Axial: looking from the feet, patient left on screen right.
pub fn axial_matrix() -> Matrix3<f64> {
    Matrix3::new(
        -1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    )
}

pub fn sagittal_matrix() -> Matrix3<f64> {
    Matrix3::new(
        0.0, 0.0, 1.0, //
        -1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0,
    )
}

pub fn coronal_matrix() -> Matrix3<f64> {
    Matrix3::new(
        -1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, //
        0.0, 1.0, 0.0,
    )
}
