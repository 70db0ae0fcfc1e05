//! Spectral history and per-frame spectrum features.

mod analysis;
mod history;

pub use analysis::{compress, frequency_color, SpectrumFeatures};
pub use history::SpectrumHistory;
