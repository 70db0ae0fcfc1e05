//! RGB colour helpers.
//!
//! Colours are linear RGB in `[0, 1]` stored as `glam::Vec3`.

use glam::Vec3;
use rand::Rng;

/// Colour of the spectrum before any frequency has been detected
pub const DEFAULT_BASE: Vec3 = Vec3::new(0.5, 0.5, 1.0);

/// Weight of the random component in `mixed_random_color`
const RANDOM_WEIGHT: f32 = 0.4;

/// Random colour pulled towards `base` (40% random, 60% base)
pub fn mixed_random_color<R: Rng + ?Sized>(base: Vec3, rng: &mut R) -> Vec3 {
    let random = Vec3::new(rng.gen(), rng.gen(), rng.gen());
    random * RANDOM_WEIGHT + base * (1.0 - RANDOM_WEIGHT)
}

/// Uniform random colour with every channel in `[lo, hi)`
pub fn random_color<R: Rng + ?Sized>(lo: f32, hi: f32, rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(lo..hi),
        rng.gen_range(lo..hi),
        rng.gen_range(lo..hi),
    )
}

/// RGBA array for vertex upload
pub fn with_alpha(color: Vec3, alpha: f32) -> [f32; 4] {
    [color.x, color.y, color.z, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mixed_color_stays_near_base() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = Vec3::new(1.0, 0.0, 0.5);

        for _ in 0..100 {
            let c = mixed_random_color(base, &mut rng);
            // 0.6 * base <= c <= 0.6 * base + 0.4
            assert!(c.cmpge(base * 0.6).all());
            assert!(c.cmple(base * 0.6 + Vec3::splat(0.4)).all());
        }
    }

    #[test]
    fn test_random_color_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let c = random_color(0.5, 1.0, &mut rng);
            assert!(c.cmpge(Vec3::splat(0.5)).all());
            assert!(c.cmplt(Vec3::ONE).all());
        }
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha(DEFAULT_BASE, 0.7), [0.5, 0.5, 1.0, 0.7]);
    }
}
