//! Peak and pitch detection on the newest spectrum.

use glam::Vec3;

use crate::params::SpectrumParams;

/// Power-law compression used for display and thresholds
pub fn compress(magnitude: f32, scale: f32, exponent: f32) -> f32 {
    scale * magnitude.max(0.0).powf(exponent)
}

/// Colour for a frequency segment: grey for the lowest band, then white,
/// warming through yellow and orange to red for everything above
pub fn frequency_color(segment: usize) -> Vec3 {
    match segment {
        0 => Vec3::new(0.8, 0.8, 0.8),
        1 => Vec3::new(1.0, 1.0, 1.0),
        2 => Vec3::new(1.0, 0.9, 0.3),
        3 => Vec3::new(1.0, 0.8, 0.0),
        4 => Vec3::new(1.0, 0.6, 0.2),
        5 => Vec3::new(1.0, 0.4, 0.0),
        6 => Vec3::new(1.0, 0.2, 0.0),
        _ => Vec3::new(1.0, 0.0, 0.0),
    }
}

/// Features extracted from the latest compressed spectrum
#[derive(Debug, Clone)]
pub struct SpectrumFeatures {
    params: SpectrumParams,

    /// Largest value in the latest spectrum
    pub max_amplitude: f32,

    /// Bin holding `max_amplitude` (first one on ties)
    pub max_index: Option<usize>,

    pub previous_max_amplitude: f32,
    pub previous_max_index: Option<usize>,

    /// Highest bin above the pitch threshold
    pub highest_pitched_bin: Option<usize>,

    /// Width of the analysed spectrum
    pub bins: usize,
}

impl SpectrumFeatures {
    pub fn new(params: &SpectrumParams) -> Self {
        Self {
            params: params.clone(),
            max_amplitude: 0.0,
            max_index: None,
            previous_max_amplitude: 0.0,
            previous_max_index: None,
            highest_pitched_bin: None,
            bins: 0,
        }
    }

    /// Analyse a new spectrum, keeping the previous peak for change detection
    pub fn update(&mut self, row: &[f32]) {
        self.previous_max_amplitude = self.max_amplitude;
        self.previous_max_index = self.max_index;

        let mut max_amplitude = 0.0;
        let mut max_index = None;
        let mut highest_pitched_bin = None;

        for (i, &value) in row.iter().enumerate() {
            // A glitching device can hand us NaN or infinite samples
            if !value.is_finite() {
                continue;
            }
            if max_index.is_none() || value > max_amplitude {
                max_amplitude = value;
                max_index = Some(i);
            }
            if value > self.params.pitch_threshold {
                highest_pitched_bin = Some(i);
            }
        }

        self.max_amplitude = max_amplitude;
        self.max_index = max_index;
        self.highest_pitched_bin = highest_pitched_bin;
        self.bins = row.len();
    }

    /// Peak rose by more than the onset threshold since the last frame
    pub fn is_amplitude_changed(&self) -> bool {
        self.max_amplitude - self.previous_max_amplitude > self.params.amplitude_change_threshold
    }

    pub fn is_amplitude_high(&self) -> bool {
        self.max_amplitude > self.params.amplitude_high_threshold
    }

    /// Peak moved by more than the pitch-change threshold (in bins)
    pub fn is_frequency_changed(&self) -> bool {
        match (self.max_index, self.previous_max_index) {
            (Some(now), Some(before)) => now.abs_diff(before) > self.params.pitch_change_threshold,
            (None, None) => false,
            _ => true,
        }
    }

    /// Band (0-based) of the highest pitched bin; silence falls in band 0
    pub fn frequency_segment(&self) -> usize {
        match self.highest_pitched_bin {
            Some(bin) if self.bins > 0 => {
                (bin as f32 / self.bins as f32 * self.params.frequency_segments as f32) as usize
            }
            _ => 0,
        }
    }

    /// Colour of the current dominant frequency band
    pub fn frequency_color(&self) -> Vec3 {
        frequency_color(self.frequency_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> SpectrumFeatures {
        SpectrumFeatures::new(&SpectrumParams::default())
    }

    #[test]
    fn test_compress() {
        assert_eq!(compress(4.0, 30.0, 0.5), 60.0);
        assert_eq!(compress(0.0, 30.0, 0.5), 0.0);
        assert_eq!(compress(-1.0, 30.0, 0.5), 0.0);
    }

    #[test]
    fn test_peak_and_pitch_detection() {
        let mut f = features();
        f.update(&[0.1, 3.0, 0.5, 3.0, 0.9, 0.2]);

        assert_eq!(f.max_amplitude, 3.0);
        assert_eq!(f.max_index, Some(1)); // first on ties
        assert_eq!(f.highest_pitched_bin, Some(4)); // 0.9 > 0.8
        assert_eq!(f.bins, 6);
    }

    #[test]
    fn test_silence_has_no_pitch() {
        let mut f = features();
        f.update(&[0.0; 8]);

        assert_eq!(f.highest_pitched_bin, None);
        assert_eq!(f.frequency_segment(), 0);
        assert_eq!(f.frequency_color(), Vec3::new(0.8, 0.8, 0.8));
        assert!(!f.is_amplitude_high());
    }

    #[test]
    fn test_amplitude_change_uses_previous_peak() {
        let mut f = features();
        f.update(&[1.0, 0.0]);
        f.update(&[3.5, 0.0]);
        assert!(f.is_amplitude_changed()); // 3.5 - 1.0 > 2.0

        f.update(&[4.5, 0.0]);
        assert!(!f.is_amplitude_changed()); // 4.5 - 3.5 = 1.0
        assert!(f.is_amplitude_high());

        f.update(&[0.0, 0.0]);
        assert!(!f.is_amplitude_changed()); // falling never counts
    }

    #[test]
    fn test_non_finite_values_are_ignored() {
        let mut f = features();
        f.update(&[f32::NAN, 1.5, f32::INFINITY, 0.9, f32::NEG_INFINITY]);

        assert_eq!(f.max_amplitude, 1.5);
        assert_eq!(f.max_index, Some(1));
        assert_eq!(f.highest_pitched_bin, Some(3));

        f.update(&[f32::NAN; 4]);
        assert_eq!(f.max_amplitude, 0.0);
        assert_eq!(f.max_index, None);
        assert!(f.max_amplitude.is_finite());
    }

    #[test]
    fn test_frequency_change() {
        let mut f = features();
        let mut row = vec![0.0; 32];

        row[3] = 1.0;
        f.update(&row);
        row[3] = 0.0;
        row[6] = 1.0;
        f.update(&row);
        assert!(!f.is_frequency_changed()); // moved 3 bins

        row[6] = 0.0;
        row[20] = 1.0;
        f.update(&row);
        assert!(f.is_frequency_changed()); // moved 14 bins
    }

    #[test]
    fn test_frequency_segments() {
        let mut f = features();
        let mut row = vec![0.0; 140];

        // 14 segments over 140 bins = 10 bins per segment
        row[15] = 1.0;
        f.update(&row);
        assert_eq!(f.frequency_segment(), 1);
        assert_eq!(f.frequency_color(), Vec3::ONE);

        row[139] = 1.0;
        f.update(&row);
        assert_eq!(f.frequency_segment(), 13);
        assert_eq!(f.frequency_color(), Vec3::new(1.0, 0.0, 0.0));
    }
}
