//! Command-line argument parsing.

use clap::Parser;

use crate::error::ConfigError;
use crate::params::Config;
use crate::visualizer::{DisplayMode, Flags};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Sundance")]
#[command(about = "Audio-reactive spectrum and particle visualizer", long_about = None)]
pub struct Args {
    /// Starting display: waterfall, wobble or particles
    #[arg(long, value_name = "MODE", default_value = "waterfall")]
    pub mode: String,

    /// Number of spectra kept in the waterfall
    #[arg(long, value_name = "ROWS", default_value = "150")]
    pub history: usize,

    /// Analysis window in samples (power of two)
    #[arg(long, value_name = "SAMPLES", default_value = "1024")]
    pub buffer_size: usize,

    /// Requested capture rate
    #[arg(long, value_name = "HZ", default_value = "44100")]
    pub sample_rate: u32,

    /// Active particle count
    #[arg(long, value_name = "COUNT", default_value = "1000")]
    pub particles: usize,

    /// Input device name (see --list-devices)
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Print input devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Start in colourful mode
    #[arg(long)]
    pub colorful: bool,

    /// Seed for reproducible colours and particles
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Starting display mode
    pub fn display_mode(&self) -> Result<DisplayMode, ConfigError> {
        self.mode.parse()
    }

    /// Starting toggles
    pub fn flags(&self) -> Flags {
        Flags {
            colorful: self.colorful,
            ..Default::default()
        }
    }

    /// Defaults overridden by the command line, validated
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::default();
        config.audio.buffer_size = self.buffer_size;
        config.audio.sample_rate_hz = self.sample_rate;
        config.audio.device_name = self.device.clone();
        config.spectrum.history_size = self.history;
        config.particles.count = self.particles;
        config.validate()?;
        Ok(config)
    }
}
