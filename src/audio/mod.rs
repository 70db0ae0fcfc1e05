//! Microphone capture and spectrum analysis.
//!
//! The cpal input callback downmixes to mono into a shared `SampleWindow`;
//! the render loop snapshots the window once per frame and runs it
//! through a `SpectrumAnalyzer`.

mod capture;
mod fft;
mod window;

// Re-export public types
pub use capture::{list_input_devices, AudioCapture};
pub use fft::{hann_window, SpectrumAnalyzer};
pub use window::SampleWindow;
