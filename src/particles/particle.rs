//! Single particle state and rotation helpers.

use glam::Vec3;

/// One particle of the fountain
#[derive(Debug, Clone, Copy, Default)]
pub struct Particle {
    pub location: Vec3,
    pub velocity: Vec3,
    pub color: Vec3,

    /// Half-extent of the rendered quad
    pub scale: f32,

    /// Distance from the fountain axis while spiralling
    pub rot_radius: f32,

    /// Angle around the fountain axis while spiralling (radians)
    pub rot_angle: f32,

    /// Seconds this particle has been alive
    pub age: f32,

    /// Seconds this particle lives before respawning
    pub lifespan: f32,
}

impl Particle {
    /// Fraction of the lifespan already used, in `[0, 1]`
    pub fn life_fraction(&self) -> f32 {
        if self.lifespan <= 0.0 {
            return 1.0;
        }
        (self.age / self.lifespan).clamp(0.0, 1.0)
    }

    /// Location after tilting the fountain `tilt_degrees` around +X
    pub fn tilted_location(&self, tilt_degrees: f32) -> Vec3 {
        rotate(self.location, Vec3::X, tilt_degrees)
    }
}

/// Rotate `v` around `axis` by `degrees` (Rodrigues' formula)
///
/// Uses `v × axis`, so positive angles turn clockwise when looking
/// down the axis.
pub fn rotate(v: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    let axis = axis.normalize_or_zero();
    let (s, c) = degrees.to_radians().sin_cos();
    v * c + axis * axis.dot(v) * (1.0 - c) + v.cross(axis) * s
}
