//! Receding wall lines on both sides of the spectrum.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

use crate::color::random_color;
use crate::params::WallParams;

/// Line pairs anchored near the viewer whose far ends race into the distance
pub struct WallLines {
    params: WallParams,
    /// `(anchored, receding)` endpoints
    segments: Vec<(Vec3, Vec3)>,
    color: Vec3,
}

impl WallLines {
    /// Lay out `endpoint_count / 2` lines, the first half on the left wall
    pub fn new(params: WallParams, rng: &mut StdRng) -> Self {
        let pairs = params.endpoint_count / 2;
        let mut segments = Vec::with_capacity(pairs);
        let mut previous_y: Option<f32> = None;

        for k in 0..pairs {
            let x = if k < pairs / 2 { -params.wall_x } else { params.wall_x };
            if k == pairs / 2 {
                // Right wall starts a new zigzag
                previous_y = None;
            }

            let far_y = rng.gen_range(-params.y_range..=params.y_range);
            let near_y = previous_y.unwrap_or(far_y);
            previous_y = Some(far_y);

            segments.push((
                Vec3::new(x, near_y, params.near_z),
                Vec3::new(x, far_y, params.near_z),
            ));
        }

        Self {
            color: random_color(0.1, 0.9, rng),
            params,
            segments,
        }
    }

    /// Push every receding endpoint further away and maybe re-roll the colour
    ///
    /// `frequency_changed` forces a colour change.
    pub fn advance(&mut self, rng: &mut StdRng, frequency_changed: bool) {
        let p = &self.params;
        for (_, far) in &mut self.segments {
            far.z -= p.recede_speed * rng.gen_range(p.recede_min..p.recede_max);
            if far.z < p.far_z {
                far.z = p.reset_z;
            }
        }

        if frequency_changed || rng.gen_bool(p.color_change_chance.clamp(0.0, 1.0)) {
            self.color = random_color(0.1, 0.9, rng);
        }
    }

    pub fn segments(&self) -> &[(Vec3, Vec3)] {
        &self.segments
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_layout_splits_walls() {
        let mut rng = StdRng::seed_from_u64(3);
        let walls = WallLines::new(WallParams::default(), &mut rng);

        assert_eq!(walls.segments().len(), 100);
        assert!(walls.segments()[..50].iter().all(|(a, b)| a.x == -5.0 && b.x == -5.0));
        assert!(walls.segments()[50..].iter().all(|(a, b)| a.x == 5.0 && b.x == 5.0));

        // Each anchored end continues from the previous line's far end
        for k in 1..50 {
            assert_eq!(walls.segments()[k].0.y, walls.segments()[k - 1].1.y);
        }
    }

    #[test]
    fn test_far_ends_recede_and_wrap() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = WallParams::default();
        let mut walls = WallLines::new(params.clone(), &mut rng);

        walls.advance(&mut rng, false);
        for (near, far) in walls.segments() {
            assert_eq!(near.z, params.near_z);
            assert!(far.z < params.near_z);
            assert!(far.z >= params.near_z - params.recede_speed * params.recede_max);
        }

        // Enough frames to pass the far limit at least once
        for _ in 0..1000 {
            walls.advance(&mut rng, false);
            assert!(walls.segments().iter().all(|(_, far)| far.z >= params.far_z));
        }
    }

    #[test]
    fn test_frequency_change_rerolls_color() {
        let mut rng = StdRng::seed_from_u64(9);
        let params = WallParams {
            color_change_chance: 0.0,
            ..Default::default()
        };
        let mut walls = WallLines::new(params, &mut rng);
        let before = walls.color();

        walls.advance(&mut rng, false);
        assert_eq!(walls.color(), before);

        walls.advance(&mut rng, true);
        assert_ne!(walls.color(), before);
    }
}
