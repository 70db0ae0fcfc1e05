//! Particle engine parameters.

use crate::error::ConfigError;

/// Particle simulation parameters
#[derive(Debug, Clone)]
pub struct ParticleParams {
    /// Preallocated particle slots; the active count never exceeds this
    pub capacity: usize,

    /// Initially active particles
    pub count: usize,

    /// `more()` only doubles the count while it is at or below this value
    pub max_doubling_count: usize,

    /// Simulation step (seconds); halved/doubled by the speed controls
    pub step_time_s: f32,

    /// Speed controls keep the step inside these bounds (seconds)
    pub min_step_time_s: f32,
    pub max_step_time_s: f32,

    /// Half-extent of a particle quad (world units)
    pub particle_size: f32,

    /// `smaller()` stops once the size drops to this bound
    pub min_size: f32,

    /// `bigger()` stops once the size reaches this bound
    pub max_size: f32,

    /// Active count forced when both-mode is toggled
    pub both_mode_count: usize,

    /// Tilt of the particle fountain around +X (degrees)
    pub tilt_degrees: f32,

    /// Horizontal launch speed of a new particle (units/s)
    pub launch_speed: f32,

    /// Vertical rise while spiralling (units/s)
    pub spiral_rise_rate: f32,

    /// Radius growth while in tornado mode (units/s)
    pub tornado_growth_rate: f32,

    /// Maximum random radius change while spiralling (units/s)
    pub spiral_jitter_rate: f32,

    /// Velocity multiplier for free-flying particles on an amplitude onset
    pub onset_boost: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            capacity: 20000,
            count: 1000,
            max_doubling_count: 10000,
            step_time_s: 0.01,
            min_step_time_s: 0.000625,
            max_step_time_s: 0.16,
            particle_size: 0.1,
            min_size: 0.02,
            max_size: 0.2,
            both_mode_count: 100,
            tilt_degrees: -30.0,
            launch_speed: 2.0,
            spiral_rise_rate: 10.0,
            tornado_growth_rate: 5.0,
            spiral_jitter_rate: 10.0,
            onset_boost: 3.0,
        }
    }
}

impl ParticleParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count > self.capacity {
            return Err(ConfigError::TooManyParticles {
                count: self.count,
                capacity: self.capacity,
            });
        }
        if !(self.step_time_s.is_finite() && self.step_time_s > 0.0) {
            return Err(ConfigError::InvalidStepTime(self.step_time_s));
        }
        Ok(())
    }
}
