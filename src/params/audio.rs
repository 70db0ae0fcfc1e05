//! Audio capture and analysis configuration.

use crate::error::ConfigError;

/// Smallest analysis window that still yields a usable spectrum
const MIN_BUFFER_SIZE: usize = 16;

/// Microphone capture configuration
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Requested sample rate (Hz); the device default is used if unsupported
    pub sample_rate_hz: u32,

    /// Analysis window in mono frames (must be power of 2)
    /// 1024 frames ≈ 23ms @ 44.1kHz
    pub buffer_size: usize,

    /// Input device name; `None` picks the host default
    pub device_name: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            buffer_size: 1024,
            device_name: None,
        }
    }
}

impl AudioConfig {
    /// Number of spectrum bins produced per window (positive frequencies only)
    pub fn bins(&self) -> usize {
        self.buffer_size / 2
    }

    /// Convert frequency (Hz) to FFT bin index
    pub fn hz_to_bin(&self, hz: f32) -> usize {
        ((hz * self.buffer_size as f32) / self.sample_rate_hz as f32) as usize
    }

    /// Center frequency (Hz) of an FFT bin
    pub fn bin_to_hz(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate_hz as f32 / self.buffer_size as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.buffer_size.is_power_of_two() {
            return Err(ConfigError::BufferSizeNotPowerOfTwo(self.buffer_size));
        }
        if self.buffer_size < MIN_BUFFER_SIZE {
            return Err(ConfigError::BufferSizeTooSmall {
                got: self.buffer_size,
                min: MIN_BUFFER_SIZE,
            });
        }
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        Ok(())
    }
}
