//! Per-frame pipeline: samples → spectrum → history → features → scene.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

use crate::audio::SpectrumAnalyzer;
use crate::color::{random_color, DEFAULT_BASE};
use crate::controls::Command;
use crate::error::ConfigError;
use crate::params::Config;
use crate::particles::{ParticleEngine, Stimulus};
use crate::scene::{Scene, SceneBuilder, WallLines, WaterfallStyle};
use crate::spectrum::{compress, SpectrumFeatures, SpectrumHistory};

/// Quad size multiplier for loud frames when emphasis is on
const LOUD_PARTICLE_GAIN: f32 = 2.0;

/// Colour of the time-domain waveform
const WAVEFORM_COLOR: Vec3 = Vec3::new(0.5, 0.5, 1.0);

/// What gets drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Scrolling 3D stack of recent spectra
    #[default]
    Waterfall,
    /// Waveform strip and receding walls over a single-colour waterfall
    Wobble,
    /// Particle fountain
    Particles,
}

impl FromStr for DisplayMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "waterfall" | "w" => Ok(Self::Waterfall),
            "wobble" | "v" => Ok(Self::Wobble),
            "particles" | "p" => Ok(Self::Particles),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Toggles that modify every mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Scatter colours around the frequency colour
    pub colorful: bool,

    /// Exaggerate geometry on loud frames
    pub amplitude_emphasis: bool,

    /// Draw particles and waterfall together
    pub both: bool,
}

/// Owns all simulation state and produces one `Scene` per frame
pub struct Visualizer {
    config: Config,
    analyzer: SpectrumAnalyzer,
    history: SpectrumHistory,
    features: SpectrumFeatures,
    engine: ParticleEngine,
    walls: WallLines,
    builder: SceneBuilder,
    mode: DisplayMode,
    flags: Flags,
    /// Colour of the current dominant frequency band
    base_color: Vec3,
    /// Single waterfall colour used in wobble mode
    wobble_color: Vec3,
    frame_index: u64,
    rng: StdRng,
    scene: Scene,
}

impl Visualizer {
    /// Build every subsystem from a validated config
    ///
    /// `seed` makes colours and particles reproducible.
    pub fn new(config: Config, mode: DisplayMode, flags: Flags, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let analyzer = SpectrumAnalyzer::new(config.audio.buffer_size);
        let history = SpectrumHistory::new(config.spectrum.history_size, analyzer.bins());
        let features = SpectrumFeatures::new(&config.spectrum);

        let stimulus = Stimulus {
            colorful: flags.colorful,
            ..Default::default()
        };
        let engine = ParticleEngine::new(
            config.particles.clone(),
            &stimulus,
            StdRng::seed_from_u64(rng.gen()),
        );
        let walls = WallLines::new(config.walls.clone(), &mut rng);
        let builder = SceneBuilder::new(config.render.clone());

        log::debug!(
            "Visualizer: {} bins x {} rows, {} particles, mode {:?}",
            analyzer.bins(),
            history.len(),
            engine.count(),
            mode
        );

        Self {
            wobble_color: random_color(0.5, 1.0, &mut rng),
            config,
            analyzer,
            history,
            features,
            engine,
            walls,
            builder,
            mode,
            flags,
            base_color: DEFAULT_BASE,
            frame_index: 0,
            rng,
            scene: Scene::default(),
        }
    }

    /// Analyse the latest samples, step the simulation and build geometry
    ///
    /// `dt` is wall-clock seconds since the previous frame.
    pub fn frame(&mut self, samples: &[f32], dt: f32) -> &Scene {
        let sp = &self.config.spectrum;
        let compressed: Vec<f32> = self
            .analyzer
            .analyze(samples)
            .into_iter()
            .map(|m| compress(m, sp.magnitude_scale, sp.compression_exponent))
            .collect();

        // The row is recorded with the colour of the previous frame's peak band
        self.history.push(&compressed, self.base_color);
        self.features.update(&compressed);
        self.base_color = self.features.frequency_color();

        let loud = self.flags.amplitude_emphasis && self.features.is_amplitude_high();
        let stimulus = Stimulus {
            base_color: self.base_color,
            colorful: self.flags.colorful,
            max_amplitude: self.features.max_amplitude,
            onset: self.features.is_amplitude_changed(),
        };

        if self.particles_visible() {
            self.engine.advance(dt, &stimulus);
        }

        self.scene.clear();

        let waterfall_style = WaterfallStyle {
            height_gain: if loud { sp.high_amplitude_gain } else { 1.0 },
            colorful: self.flags.colorful,
            uniform_color: None,
        };
        let particle_gain = if loud { LOUD_PARTICLE_GAIN } else { 1.0 };

        match self.mode {
            DisplayMode::Waterfall => {
                if self.flags.both {
                    self.builder
                        .particles(&mut self.scene, &self.engine, particle_gain);
                }
                self.builder.waterfall(
                    &mut self.scene,
                    &self.history,
                    waterfall_style,
                    &mut self.rng,
                );
            }
            DisplayMode::Particles => {
                self.builder
                    .particles(&mut self.scene, &self.engine, particle_gain);
                if self.flags.both {
                    self.builder.waterfall(
                        &mut self.scene,
                        &self.history,
                        waterfall_style,
                        &mut self.rng,
                    );
                }
            }
            DisplayMode::Wobble => {
                self.walls
                    .advance(&mut self.rng, self.features.is_frequency_changed());
                if self.frame_index % self.config.walls.palette_refresh_frames.max(1) == 0 {
                    self.wobble_color = random_color(0.5, 1.0, &mut self.rng);
                }

                self.builder
                    .waveform(&mut self.scene, samples, WAVEFORM_COLOR);
                self.builder.walls(&mut self.scene, &self.walls);
                self.builder.waterfall(
                    &mut self.scene,
                    &self.history,
                    WaterfallStyle {
                        uniform_color: Some(self.wobble_color),
                        ..waterfall_style
                    },
                    &mut self.rng,
                );
            }
        }

        self.frame_index += 1;
        &self.scene
    }

    /// Apply a visual command; window-level commands are ignored here
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::ShowWaterfall => self.mode = DisplayMode::Waterfall,
            Command::ShowParticles => self.mode = DisplayMode::Particles,
            Command::ShowWobble => self.mode = DisplayMode::Wobble,
            Command::ToggleColorful => self.flags.colorful = !self.flags.colorful,
            Command::ToggleAmplitudeEmphasis => {
                self.flags.amplitude_emphasis = !self.flags.amplitude_emphasis
            }
            Command::ToggleSpiral => {
                self.mode = DisplayMode::Particles;
                self.engine.toggle_spiral();
            }
            Command::ToggleTornado => {
                self.mode = DisplayMode::Particles;
                self.engine.toggle_tornado();
            }
            Command::ToggleBoth => {
                self.flags.both = !self.flags.both;
                self.engine.set_count(self.config.particles.both_mode_count);
            }
            Command::Bigger => self.engine.bigger(),
            Command::Smaller => self.engine.smaller(),
            Command::Faster => self.engine.faster(),
            Command::Slower => self.engine.slower(),
            Command::More => self.engine.more(),
            Command::Fewer => self.engine.fewer(),
            Command::Quit | Command::Help | Command::ToggleFullscreen => return,
        }

        log::debug!(
            "{:?}: mode {:?}, {:?}, {} particles, step {}s, size {}",
            command,
            self.mode,
            self.flags,
            self.engine.count(),
            self.engine.step_time(),
            self.engine.particle_size()
        );
    }

    fn particles_visible(&self) -> bool {
        self.mode == DisplayMode::Particles || self.flags.both
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn history(&self) -> &SpectrumHistory {
        &self.history
    }

    pub fn features(&self) -> &SpectrumFeatures {
        &self.features
    }

    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    pub fn base_color(&self) -> Vec3 {
        self.base_color
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Waterfall".parse::<DisplayMode>(), Ok(DisplayMode::Waterfall));
        assert_eq!("p".parse::<DisplayMode>(), Ok(DisplayMode::Particles));
        assert_eq!("wobble".parse::<DisplayMode>(), Ok(DisplayMode::Wobble));
        assert_eq!(
            "spiral".parse::<DisplayMode>(),
            Err(ConfigError::UnknownMode("spiral".to_string()))
        );
    }
}
