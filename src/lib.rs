//! Sundance library - audio-reactive spectrum and particle visualization

pub mod audio;
pub mod camera;
pub mod cli;
pub mod color;
pub mod controls;
pub mod error;
pub mod params;
pub mod particles;
pub mod rendering;
pub mod scene;
pub mod spectrum;
pub mod time;
pub mod visualizer;
