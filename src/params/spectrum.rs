//! Spectrum history and feature-detection parameters.

use crate::error::ConfigError;

/// Spectral history and detection thresholds
///
/// Thresholds apply to *compressed* bin values, i.e. after
/// `magnitude_scale * magnitude.powf(compression_exponent)`.
#[derive(Debug, Clone)]
pub struct SpectrumParams {
    /// Number of spectra kept for the waterfall (rows)
    pub history_size: usize,

    /// Display scale applied after compression
    pub magnitude_scale: f32,

    /// Power-law compression exponent (0.5 = square root)
    pub compression_exponent: f32,

    /// A bin above this value counts as "sounding" for pitch detection
    pub pitch_threshold: f32,

    /// Rise of the peak value between frames that counts as an onset
    pub amplitude_change_threshold: f32,

    /// Peak value above which the frame counts as loud
    pub amplitude_high_threshold: f32,

    /// Peak-bin jump (bins) that counts as a frequency change
    pub pitch_change_threshold: usize,

    /// Number of equal-width bands used to pick the frequency colour
    pub frequency_segments: usize,

    /// Waterfall height multiplier applied to loud frames when emphasis is on
    pub high_amplitude_gain: f32,
}

impl Default for SpectrumParams {
    fn default() -> Self {
        Self {
            history_size: 150,
            magnitude_scale: 30.0,
            compression_exponent: 0.5,
            pitch_threshold: 0.8,
            amplitude_change_threshold: 2.0,
            amplitude_high_threshold: 4.0,
            pitch_change_threshold: 5,
            frequency_segments: 14,
            high_amplitude_gain: 1.4,
        }
    }
}

impl SpectrumParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_size == 0 {
            return Err(ConfigError::EmptyHistory);
        }
        Ok(())
    }
}
