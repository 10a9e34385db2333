//! 3D rotation primitives.
//!
//! Single-axis rotation matrices used by the camera pipeline, built with
//! the right-handed convention shared by all world-frame code.

use nalgebra::{Matrix3, Vector3};

pub fn rotation_about_x(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c, -s,
        0.0, s, c,
    )
}

pub fn rotation_about_y(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, 0.0, s,
        0.0, 1.0, 0.0,
        -s, 0.0, c,
    )
}

pub fn rotate_about_x(p: Vector3<f64>, angle: f64) -> Vector3<f64> {
    rotation_about_x(angle) * p
}

pub fn rotate_about_y(p: Vector3<f64>, angle: f64) -> Vector3<f64> {
    rotation_about_y(angle) * p
}
