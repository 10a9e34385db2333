//! Camera state and the world-to-screen projection pipeline.
//!
//! World points go through the camera rotation (X axis first, then Y;
//! the order is load-bearing) and an orthographic projection with a
//! depth-dependent pseudo-perspective scale.

use crate::config::{
    DEFAULT_CAMERA_DISTANCE, DRAG_SENSITIVITY, FOV, MAX_CAMERA_DISTANCE, MIN_CAMERA_DISTANCE,
    PX_PER_KM,
};
use crate::math::{rotate_about_x, rotate_about_y};
use eframe::egui;
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;

/// Depths closer than this to the projection singularity are culled.
const MIN_DEPTH: f64 = 1e-3;

#[derive(Clone, Copy, Debug)]
pub struct CameraState {
    /// Tilt, clamped to [-π/2, π/2].
    pub rotation_x: f64,
    /// Yaw, unconstrained.
    pub rotation_y: f64,
    /// Distance from the world origin, in screen units.
    pub distance: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            rotation_x: -1.1,
            rotation_y: 0.4,
            distance: DEFAULT_CAMERA_DISTANCE,
        }
    }
}

impl CameraState {
    /// Apply a pointer drag, in pixels. Tilt stays clamped no matter how
    /// far the cumulative drag goes.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.rotation_y += dx * DRAG_SENSITIVITY;
        self.rotation_x = (self.rotation_x + dy * DRAG_SENSITIVITY).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Apply a scroll-wheel delta as a multiplicative zoom step.
    pub fn zoom(&mut self, scroll: f64) {
        let factor = 1.0 - scroll * 0.001;
        self.distance = (self.distance * factor).clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
    }

    /// World frame to camera frame: X rotation, then Y rotation.
    pub fn to_camera(&self, world: Vector3<f64>) -> Vector3<f64> {
        rotate_about_y(rotate_about_x(world, self.rotation_x), self.rotation_y)
    }

    /// Project a world-frame point (km) into the viewport. Points at or
    /// behind the projection singularity are culled rather than mapped to
    /// non-finite coordinates.
    pub fn project(&self, world_km: Vector3<f64>, viewport: egui::Rect) -> Option<egui::Pos2> {
        let cam = self.to_camera(world_km * PX_PER_KM);
        let depth = FOV + cam.z + self.distance;
        if depth < MIN_DEPTH {
            return None;
        }
        let scale = FOV / depth;
        let center = viewport.center();
        Some(egui::pos2(
            center.x + (cam.x * scale) as f32,
            center.y + (cam.y * scale) as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn viewport() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0))
    }

    #[test]
    fn tilt_clamped_under_cumulative_drag() {
        let mut cam = CameraState::default();
        for _ in 0..1000 {
            cam.drag(0.0, 40.0);
        }
        assert!(cam.rotation_x <= FRAC_PI_2);
        for _ in 0..5000 {
            cam.drag(0.0, -40.0);
        }
        assert!(cam.rotation_x >= -FRAC_PI_2);
    }

    #[test]
    fn zoom_clamped_to_range() {
        let mut cam = CameraState::default();
        cam.zoom(1e9);
        assert_relative_eq!(cam.distance, MIN_CAMERA_DISTANCE);
        cam.zoom(-1e9);
        assert_relative_eq!(cam.distance, MAX_CAMERA_DISTANCE);
    }

    #[test]
    fn origin_projects_to_viewport_center() {
        let cam = CameraState {
            rotation_x: 0.7,
            rotation_y: -1.3,
            distance: DEFAULT_CAMERA_DISTANCE,
        };
        let p = cam.project(Vector3::zeros(), viewport()).unwrap();
        assert_relative_eq!(p.x, 400.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 300.0, epsilon = 1e-6);
    }

    #[test]
    fn identity_camera_keeps_axes() {
        // With no rotation, world +x maps right of center and depth only
        // shrinks the offset.
        let cam = CameraState {
            rotation_x: 0.0,
            rotation_y: 0.0,
            distance: 1000.0,
        };
        let p = cam.project(Vector3::new(1000.0, 0.0, 0.0), viewport()).unwrap();
        let scale = FOV / (FOV + 1000.0);
        assert_relative_eq!(p.x as f64, 400.0 + 1000.0 * PX_PER_KM * scale, epsilon = 1e-4);
        assert_relative_eq!(p.y as f64, 300.0, epsilon = 1e-6);
    }

    #[test]
    fn point_behind_singularity_is_culled() {
        let cam = CameraState {
            rotation_x: 0.0,
            rotation_y: 0.0,
            distance: MIN_CAMERA_DISTANCE,
        };
        // Depth = FOV + z*PX_PER_KM + distance goes negative for a point
        // far enough toward the viewer.
        let world = Vector3::new(0.0, 0.0, -(FOV + MIN_CAMERA_DISTANCE + 1.0) / PX_PER_KM);
        assert!(cam.project(world, viewport()).is_none());
    }

    #[test]
    fn projection_is_always_finite() {
        let cam = CameraState {
            rotation_x: 0.3,
            rotation_y: 2.1,
            distance: MIN_CAMERA_DISTANCE,
        };
        for i in -50..50 {
            let world = Vector3::new(0.0, 0.0, i as f64 * 1000.0);
            if let Some(p) = cam.project(world, viewport()) {
                assert!(p.x.is_finite() && p.y.is_finite());
            }
        }
    }
}
