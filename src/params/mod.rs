//! Parameter definitions with units and documented semantics.
//!
//! Every tunable number lives here with:
//! - Units (Hz, seconds, world units)
//! - Documented ranges and meanings
//! - A `validate()` where a bad value would break the pipeline

mod audio;
mod particles;
mod render;
mod spectrum;

// Re-export all types
pub use audio::AudioConfig;
pub use particles::ParticleParams;
pub use render::{RenderConfig, WallParams};
pub use spectrum::SpectrumParams;

use crate::error::ConfigError;

/// Complete configuration for one visualizer run
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub audio: AudioConfig,
    pub spectrum: SpectrumParams,
    pub particles: ParticleParams,
    pub render: RenderConfig,
    pub walls: WallParams,
}

impl Config {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.audio.validate()?;
        self.spectrum.validate()?;
        self.particles.validate()?;
        Ok(())
    }
}
