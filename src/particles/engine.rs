//! Fixed-step particle simulation driven by spectrum features.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

use super::particle::Particle;
use crate::color::{mixed_random_color, DEFAULT_BASE};
use crate::params::ParticleParams;

/// What the current spectrum tells the particles
#[derive(Debug, Clone, Copy)]
pub struct Stimulus {
    /// Colour new particles are born with
    pub base_color: Vec3,

    /// Scatter new particle colours around `base_color`
    pub colorful: bool,

    /// Peak of the latest spectrum; sets the spiral radius of new particles
    pub max_amplitude: f32,

    /// The peak jumped this frame; free-flying particles get a kick
    pub onset: bool,
}

impl Default for Stimulus {
    fn default() -> Self {
        Self {
            base_color: DEFAULT_BASE,
            colorful: false,
            max_amplitude: 0.0,
            onset: false,
        }
    }
}

/// Particle fountain with a preallocated pool and an active prefix
pub struct ParticleEngine {
    params: ParticleParams,
    particles: Vec<Particle>,
    count: usize,
    step_time: f32,
    particle_size: f32,
    /// Simulated time left before the next fixed step is due
    time_until_next_step: f32,
    spiral: bool,
    tornado: bool,
    rng: StdRng,
}

impl ParticleEngine {
    /// Spawn the whole pool and pre-warm for one simulated second
    pub fn new(params: ParticleParams, stimulus: &Stimulus, mut rng: StdRng) -> Self {
        let particle_size = params.particle_size;
        let particles = (0..params.capacity)
            .map(|_| {
                let mut p = Particle::default();
                spawn(&mut p, stimulus, particle_size, params.launch_speed, &mut rng);
                p
            })
            .collect();

        let mut engine = Self {
            count: params.count.min(params.capacity),
            step_time: params.step_time_s,
            particle_size,
            time_until_next_step: 0.0,
            spiral: false,
            tornado: false,
            particles,
            params,
            rng,
        };

        let warmup_steps = (1.0 / engine.step_time).round() as usize;
        for _ in 0..warmup_steps {
            engine.step(stimulus);
        }

        engine
    }

    /// Advance simulated time by `dt` seconds in fixed steps
    ///
    /// Time that does not fill a whole step carries over to the next call.
    /// Returns the number of steps taken.
    pub fn advance(&mut self, dt: f32, stimulus: &Stimulus) -> usize {
        let mut dt = dt.max(0.0);
        let mut steps = 0;

        while dt > 0.0 {
            if self.time_until_next_step < dt {
                dt -= self.time_until_next_step;
                self.step(stimulus);
                steps += 1;
                self.time_until_next_step = self.step_time;
            } else {
                self.time_until_next_step -= dt;
                dt = 0.0;
            }
        }

        steps
    }

    fn step(&mut self, stimulus: &Stimulus) {
        let dt = self.step_time;
        let boost = if stimulus.onset { self.params.onset_boost } else { 1.0 };
        let jitter = self.params.spiral_jitter_rate * dt;

        let Self {
            params,
            particles,
            count,
            particle_size,
            spiral,
            tornado,
            rng,
            ..
        } = self;

        for p in &mut particles[..*count] {
            if *spiral {
                p.rot_angle += dt;
                if *tornado {
                    p.rot_radius += params.tornado_growth_rate * dt;
                } else {
                    p.rot_radius += rng.gen_range(-jitter..=jitter);
                }
                p.location = Vec3::new(
                    p.rot_radius * p.rot_angle.cos(),
                    p.location.y + params.spiral_rise_rate * dt,
                    p.rot_radius * p.rot_angle.sin(),
                );
            } else {
                p.location += p.velocity * dt * boost;
            }

            p.age += dt;
            if p.age >= p.lifespan {
                spawn(p, stimulus, *particle_size, params.launch_speed, rng);
            }
        }
    }

    /// Active particles ordered back to front (ascending tilted height)
    pub fn depth_sorted(&self) -> Vec<&Particle> {
        let tilt = self.params.tilt_degrees;
        let mut keyed: Vec<(f32, &Particle)> = self
            .particles()
            .iter()
            .map(|p| (p.tilted_location(tilt).y, p))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        keyed.into_iter().map(|(_, p)| p).collect()
    }

    /// Active particles in pool order
    pub fn particles(&self) -> &[Particle] {
        &self.particles[..self.count]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn step_time(&self) -> f32 {
        self.step_time
    }

    pub fn particle_size(&self) -> f32 {
        self.particle_size
    }

    pub fn tilt_degrees(&self) -> f32 {
        self.params.tilt_degrees
    }

    pub fn is_spiral(&self) -> bool {
        self.spiral
    }

    pub fn is_tornado(&self) -> bool {
        self.tornado
    }

    /// Double the simulation step (particles move faster)
    pub fn faster(&mut self) {
        self.step_time = (self.step_time * 2.0).min(self.params.max_step_time_s);
    }

    /// Halve the simulation step (particles move slower)
    pub fn slower(&mut self) {
        self.step_time = (self.step_time / 2.0).max(self.params.min_step_time_s);
    }

    /// Double the active count while it is at or below the doubling limit
    pub fn more(&mut self) {
        if self.count <= self.params.max_doubling_count {
            self.count = (self.count * 2).min(self.params.capacity);
        }
    }

    /// Halve the active count, never dropping below one
    pub fn fewer(&mut self) {
        if self.count > 1 {
            self.count /= 2;
        }
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count.min(self.params.capacity);
    }

    /// Double the size of particles spawned from now on
    pub fn bigger(&mut self) {
        if self.particle_size < self.params.max_size {
            self.particle_size *= 2.0;
        }
    }

    /// Halve the size of particles spawned from now on
    pub fn smaller(&mut self) {
        if self.particle_size > self.params.min_size {
            self.particle_size /= 2.0;
        }
    }

    pub fn toggle_spiral(&mut self) {
        self.spiral = !self.spiral;
    }

    /// Toggle radius growth; tornado implies spiral
    pub fn toggle_tornado(&mut self) {
        self.spiral = true;
        self.tornado = !self.tornado;
    }
}

/// Reset a particle at the fountain origin
fn spawn(p: &mut Particle, stimulus: &Stimulus, size: f32, launch_speed: f32, rng: &mut StdRng) {
    let angle = rng.gen_range(0.0..TAU);
    let launch = Vec3::new(launch_speed * angle.cos(), launch_speed, launch_speed * angle.sin());
    let scatter = Vec3::new(
        rng.gen_range(-0.2..2.0),
        rng.gen_range(-0.2..2.0),
        rng.gen_range(-0.2..2.0),
    );

    p.location = Vec3::ZERO;
    p.velocity = launch + scatter;
    p.age = 0.0;
    p.lifespan = rng.gen_range(0.0..2.0) + 1.0;
    p.color = if stimulus.colorful {
        mixed_random_color(stimulus.base_color, rng)
    } else {
        stimulus.base_color
    };
    p.rot_radius = rng.gen_range(stimulus.max_amplitude - 1.0..stimulus.max_amplitude + 2.0);
    p.rot_angle = rng.gen_range(0.0..TAU);
    p.scale = size;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn small_params() -> ParticleParams {
        ParticleParams {
            capacity: 64,
            count: 16,
            max_doubling_count: 16,
            ..Default::default()
        }
    }

    fn engine() -> ParticleEngine {
        ParticleEngine::new(small_params(), &Stimulus::default(), StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_new_engine_is_prewarmed() {
        let e = engine();
        assert_eq!(e.count(), 16);
        assert_eq!(e.particles().len(), 16);
        for p in e.particles() {
            assert!(p.age < p.lifespan);
            assert!(p.lifespan >= 1.0 && p.lifespan < 3.0);
        }
        // One second of warm-up moves particles off the origin
        assert!(e.particles().iter().any(|p| p.location != Vec3::ZERO));
    }

    #[test]
    fn test_same_seed_same_simulation() {
        let mut a = engine();
        let mut b = engine();
        a.advance(0.5, &Stimulus::default());
        b.advance(0.5, &Stimulus::default());

        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.location, pb.location);
        }
    }

    #[test]
    fn test_advance_carries_remainder() {
        let mut e = engine();
        let s = Stimulus::default();

        assert_eq!(e.advance(0.025, &s), 3);
        assert_eq!(e.advance(0.004, &s), 0);
        assert_eq!(e.advance(0.002, &s), 1);
        assert_eq!(e.advance(0.0, &s), 0);
        assert_eq!(e.advance(-1.0, &s), 0);
    }

    #[test]
    fn test_free_flight_integrates_velocity() {
        let mut e = engine();
        let before: Vec<Particle> = e.particles().to_vec();

        assert_eq!(e.advance(0.01, &Stimulus::default()), 1);

        for (old, new) in before.iter().zip(e.particles()) {
            if old.age + 0.01 < old.lifespan {
                let expected = old.location + old.velocity * 0.01;
                assert!((new.location - expected).length() < 1e-5);
                assert!((new.age - (old.age + 0.01)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_onset_boosts_free_flight() {
        let mut e = engine();
        let before: Vec<Particle> = e.particles().to_vec();
        let onset = Stimulus {
            onset: true,
            ..Default::default()
        };

        e.advance(0.01, &onset);

        for (old, new) in before.iter().zip(e.particles()) {
            if old.age + 0.01 < old.lifespan {
                let expected = old.location + old.velocity * 0.03;
                assert!((new.location - expected).length() < 1e-5);
            }
        }
    }

    #[test]
    fn test_expired_particles_respawn_with_stimulus() {
        let mut e = engine();
        let red = Vec3::new(1.0, 0.0, 0.0);
        let stimulus = Stimulus {
            base_color: red,
            max_amplitude: 5.0,
            ..Default::default()
        };

        // Longer than any lifespan: every active particle is reborn at least once
        e.advance(3.5, &stimulus);

        for p in e.particles() {
            assert_eq!(p.color, red);
            assert!(p.age < p.lifespan);
        }
    }

    #[test]
    fn test_spiral_places_particles_on_circle() {
        let mut e = engine();
        e.toggle_spiral();
        assert!(e.is_spiral());

        e.advance(0.01, &Stimulus::default());

        for p in e.particles() {
            if p.age > 0.0 {
                let expected_x = p.rot_radius * p.rot_angle.cos();
                let expected_z = p.rot_radius * p.rot_angle.sin();
                assert!((p.location.x - expected_x).abs() < 1e-5);
                assert!((p.location.z - expected_z).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_tornado_grows_radius() {
        let mut e = engine();
        e.toggle_tornado();
        assert!(e.is_spiral() && e.is_tornado());

        let before: Vec<Particle> = e.particles().to_vec();
        e.advance(0.01, &Stimulus::default());

        for (old, new) in before.iter().zip(e.particles()) {
            if old.age + 0.01 < old.lifespan {
                assert!((new.rot_radius - (old.rot_radius + 0.05)).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_depth_sorted_is_back_to_front() {
        let e = engine();
        let sorted = e.depth_sorted();
        assert_eq!(sorted.len(), e.count());

        let heights: Vec<f32> = sorted
            .iter()
            .map(|p| p.tilted_location(e.tilt_degrees()).y)
            .collect();
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_count_controls() {
        let mut e = engine();

        e.more();
        assert_eq!(e.count(), 32);
        e.more(); // 32 > max_doubling_count
        assert_eq!(e.count(), 32);

        for _ in 0..10 {
            e.fewer();
        }
        assert_eq!(e.count(), 1);

        e.set_count(1000);
        assert_eq!(e.count(), 64);
    }

    #[test]
    fn test_size_and_speed_controls() {
        let mut e = engine();

        e.bigger();
        assert_eq!(e.particle_size(), 0.2);
        e.bigger(); // at the upper bound
        assert_eq!(e.particle_size(), 0.2);

        for _ in 0..5 {
            e.smaller();
        }
        assert!((e.particle_size() - 0.0125).abs() < 1e-6);

        e.faster();
        assert_eq!(e.step_time(), 0.02);
        for _ in 0..20 {
            e.slower();
        }
        assert_eq!(e.step_time(), 0.000625);
    }

    #[test]
    fn test_step_time_stays_within_bounds() {
        let mut e = engine();
        let params = small_params();

        for _ in 0..20 {
            e.faster();
        }
        assert_eq!(e.step_time(), params.max_step_time_s);

        for _ in 0..40 {
            e.slower();
        }
        assert_eq!(e.step_time(), params.min_step_time_s);

        // Still a usable fixed step at the bound
        assert!(e.advance(0.01, &Stimulus::default()) >= 1);
    }
}
