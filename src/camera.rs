//! Fixed perspective camera looking down onto the scene.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Stationary camera; only the aspect ratio changes at runtime
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: Vec3,
    target: Vec3,
    fov_degrees: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            eye: Vec3::from_array(config.eye),
            target: Vec3::from_array(config.target),
            fov_degrees: config.fov_degrees,
            near: config.near_plane,
            far: config.far_plane,
        }
    }

    /// Combined view-projection matrix for the given surface aspect ratio
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        // Y stays up; the camera never rolls
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn clip(camera: &Camera, p: Vec3) -> Vec3 {
        let c = camera.view_proj(1.0) * Vec4::new(p.x, p.y, p.z, 1.0);
        c.truncate() / c.w
    }

    #[test]
    fn test_target_projects_to_centre() {
        let camera = Camera::new(&RenderConfig::default());
        let ndc = clip(&camera, Vec3::ZERO);

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_far_walls_inside_depth_range() {
        let config = RenderConfig::default();
        let camera = Camera::new(&config);

        // Far end of the receding walls must not be clipped
        let ndc = clip(&camera, Vec3::new(0.0, 0.0, -500.0));
        assert!(ndc.z < 1.0);

        // Behind the camera falls outside the depth range
        let behind = camera.view_proj(1.0) * Vec4::new(0.0, 5.8, 20.0, 1.0);
        assert!(behind.w < 0.0);
    }

    #[test]
    fn test_wider_aspect_shrinks_x() {
        let camera = Camera::new(&RenderConfig::default());
        let p = Vec4::new(2.0, 0.0, 0.0, 1.0);

        let square = camera.view_proj(1.0) * p;
        let wide = camera.view_proj(2.0) * p;
        assert!((wide.x / wide.w) < (square.x / square.w));
    }
}
