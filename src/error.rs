//! Error types for configuration, audio capture and GPU setup.

use thiserror::Error;

/// Invalid parameter combinations caught before anything is started.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("buffer size must be a power of two, got {0}")]
    BufferSizeNotPowerOfTwo(usize),

    #[error("buffer size must be at least {min}, got {got}")]
    BufferSizeTooSmall { got: usize, min: usize },

    #[error("sample rate must be > 0")]
    ZeroSampleRate,

    #[error("history must hold at least one row")]
    EmptyHistory,

    #[error("particle count {count} exceeds capacity {capacity}")]
    TooManyParticles { count: usize, capacity: usize },

    #[error("step time must be positive and finite, got {0}")]
    InvalidStepTime(f32),

    #[error("unknown display mode '{0}' (expected waterfall, wobble or particles)")]
    UnknownMode(String),
}

/// Failures while opening or running the microphone stream.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("no audio input device found")]
    NoInputDevice,

    #[error("input device '{0}' not found")]
    DeviceNotFound(String),

    #[error("failed to enumerate audio devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[error("failed to query input config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unsupported sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),
}

/// Failures while bringing up the GPU surface and device.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find a suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
