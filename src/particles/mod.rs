//! Audio-reactive particle fountain.

mod engine;
mod particle;

pub use engine::{ParticleEngine, Stimulus};
pub use particle::{rotate, Particle};
