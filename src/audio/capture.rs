//! Microphone input stream feeding a shared sample window.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::{Arc, Mutex, PoisonError};

use super::window::SampleWindow;
use crate::error::AudioError;
use crate::params::AudioConfig;

/// Live microphone capture
pub struct AudioCapture {
    /// Latest mono samples (written by the audio thread)
    window: Arc<Mutex<SampleWindow>>,

    /// Rate the device actually runs at
    sample_rate_hz: u32,

    /// Input stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioCapture {
    /// Open the configured input device and start streaming
    pub fn start(config: &AudioConfig) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = match &config.device_name {
            Some(name) => find_input_device(&host, name)?,
            None => host.default_input_device().ok_or(AudioError::NoInputDevice)?,
        };

        let supported = pick_stream_config(&device, config.sample_rate_hz)?;
        let sample_format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();

        log::info!(
            "Audio input: {} @ {}Hz, {} channel(s), {:?}",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            stream_config.sample_rate.0,
            stream_config.channels,
            sample_format
        );
        if stream_config.sample_rate.0 != config.sample_rate_hz {
            log::warn!(
                "Requested {}Hz is not supported, using {}Hz",
                config.sample_rate_hz,
                stream_config.sample_rate.0
            );
        }

        let window = Arc::new(Mutex::new(SampleWindow::new(config.buffer_size)));

        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &stream_config, Arc::clone(&window))?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &stream_config, Arc::clone(&window))?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &stream_config, Arc::clone(&window))?
            }
            other => return Err(AudioError::UnsupportedFormat(other)),
        };

        stream.play()?;

        Ok(Self {
            window,
            sample_rate_hz: stream_config.sample_rate.0,
            _stream: stream,
        })
    }

    /// Copy of the most recent mono samples, oldest first
    pub fn latest_samples(&self) -> Vec<f32> {
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }
}

/// Names of all input devices on the default host
pub fn list_input_devices() -> Result<Vec<String>, AudioError> {
    let host = cpal::default_host();
    Ok(host
        .input_devices()?
        .map(|d| d.name().unwrap_or_else(|_| "Unknown".to_string()))
        .collect())
}

fn find_input_device(host: &cpal::Host, name: &str) -> Result<cpal::Device, AudioError> {
    host.input_devices()?
        .find(|d| d.name().map(|n| n == name).unwrap_or(false))
        .ok_or_else(|| AudioError::DeviceNotFound(name.to_string()))
}

/// Sample formats `build_stream` is instantiated for
fn is_handled_format(format: cpal::SampleFormat) -> bool {
    matches!(
        format,
        cpal::SampleFormat::F32 | cpal::SampleFormat::I16 | cpal::SampleFormat::U16
    )
}

/// Pick a config at the requested rate the callback can read
///
/// Fewest channels wins, then F32 over the integer formats.
fn choose_input_config(
    ranges: impl IntoIterator<Item = cpal::SupportedStreamConfigRange>,
    sample_rate_hz: u32,
) -> Option<cpal::SupportedStreamConfig> {
    let rate = cpal::SampleRate(sample_rate_hz);
    ranges
        .into_iter()
        .filter(|c| is_handled_format(c.sample_format()))
        .filter(|c| c.min_sample_rate() <= rate && rate <= c.max_sample_rate())
        .min_by_key(|c| (c.channels(), c.sample_format() != cpal::SampleFormat::F32))
        .map(|range| range.with_sample_rate(rate))
}

/// Best matching config at the requested rate, else the device default
fn pick_stream_config(
    device: &cpal::Device,
    sample_rate_hz: u32,
) -> Result<cpal::SupportedStreamConfig, AudioError> {
    let matching = device
        .supported_input_configs()
        .ok()
        .and_then(|configs| choose_input_config(configs, sample_rate_hz));

    match matching {
        Some(config) => Ok(config),
        None => Ok(device.default_input_config()?),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    window: Arc<Mutex<SampleWindow>>,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = usize::from(config.channels).max(1);

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mut window = window.lock().unwrap_or_else(PoisonError::into_inner);
            for frame in data.chunks(channels) {
                let sum: f32 = frame.iter().map(|&s| s.to_sample::<f32>()).sum();
                window.push(sum / frame.len() as f32);
            }
        },
        |err| log::error!("Audio input stream error: {}", err),
        None,
    )?;

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpal::{SampleFormat, SampleRate, SupportedBufferSize, SupportedStreamConfigRange};

    fn range(channels: u16, min: u32, max: u32, format: SampleFormat) -> SupportedStreamConfigRange {
        SupportedStreamConfigRange::new(
            channels,
            SampleRate(min),
            SampleRate(max),
            SupportedBufferSize::Unknown,
            format,
        )
    }

    /// Format-major listing, as ALSA enumerates it
    fn alsa_like() -> Vec<SupportedStreamConfigRange> {
        let mut ranges = Vec::new();
        for format in [
            SampleFormat::U8,
            SampleFormat::I16,
            SampleFormat::I32,
            SampleFormat::F32,
        ] {
            for channels in 1..=2 {
                ranges.push(range(channels, 8000, 192000, format));
            }
        }
        ranges
    }

    #[test]
    fn test_unreadable_formats_are_skipped() {
        let config = choose_input_config(alsa_like(), 44100).unwrap();

        assert_eq!(config.sample_format(), SampleFormat::F32);
        assert_eq!(config.channels(), 1);
        assert_eq!(config.sample_rate(), SampleRate(44100));
    }

    #[test]
    fn test_fewer_channels_beat_float() {
        let ranges = vec![
            range(2, 44100, 48000, SampleFormat::F32),
            range(1, 44100, 48000, SampleFormat::I16),
        ];
        let config = choose_input_config(ranges, 48000).unwrap();

        assert_eq!(config.sample_format(), SampleFormat::I16);
        assert_eq!(config.channels(), 1);
    }

    #[test]
    fn test_no_usable_range() {
        let ranges = vec![
            range(1, 8000, 192000, SampleFormat::U8),
            range(1, 8000, 22050, SampleFormat::F32),
        ];
        assert!(choose_input_config(ranges, 44100).is_none());
        assert!(choose_input_config(Vec::new(), 44100).is_none());
    }
}
