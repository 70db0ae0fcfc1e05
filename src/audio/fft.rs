//! Windowed FFT producing a magnitude spectrum.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Forward FFT planned once for a fixed window size
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    size: usize,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    /// Plan a forward FFT of `size` points with a Hann window
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        Self {
            fft,
            size,
            window: (0..size).map(|i| hann_window(i, size)).collect(),
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch,
        }
    }

    /// Number of magnitudes returned by `analyze`
    pub fn bins(&self) -> usize {
        self.size / 2
    }

    /// Magnitude spectrum of the first `size` samples (zero-padded if short)
    ///
    /// Magnitudes are scaled by `2 / size`, so a full-scale sine lands
    /// near 0.5 after the Hann window's coherent gain.
    pub fn analyze(&mut self, samples: &[f32]) -> Vec<f32> {
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let norm = 2.0 / self.size as f32;
        self.buffer[..self.bins()]
            .iter()
            .map(|c| c.norm() * norm)
            .collect()
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    if size < 2 {
        return 1.0;
    }
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}
