//! Fixed-length window over the most recent mono samples.

/// Ring of the latest `len` samples, oldest first when read back
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: Vec<f32>,
    /// Slot the next sample is written to (also the oldest sample)
    write_pos: usize,
}

impl SampleWindow {
    /// Create a silent window holding `len` samples
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
            write_pos: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append one sample, discarding the oldest
    pub fn push(&mut self, sample: f32) {
        if self.samples.is_empty() {
            return;
        }
        self.samples[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.samples.len();
    }

    /// Copy of the window in chronological order
    pub fn snapshot(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.samples.len());
        out.extend_from_slice(&self.samples[self.write_pos..]);
        out.extend_from_slice(&self.samples[..self.write_pos]);
        out
    }
}
