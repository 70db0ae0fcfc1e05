//! Builds line and quad geometry from spectra, samples and particles.

use glam::Vec3;
use rand::rngs::StdRng;

use super::walls::WallLines;
use super::{Scene, Vertex};
use crate::color::{mixed_random_color, with_alpha};
use crate::particles::ParticleEngine;
use crate::params::RenderConfig;
use crate::spectrum::SpectrumHistory;

/// Opacity of waterfall lines drawn in their row colour
const WATERFALL_ALPHA: f32 = 0.7;

/// Opacity of waterfall lines in colourful mode
const COLORFUL_ALPHA: f32 = 0.9;

/// Added to particle opacity so dying particles stay visible
const PARTICLE_ALPHA_FLOOR: f32 = 0.2;

/// How the waterfall should be coloured and scaled this frame
#[derive(Debug, Clone, Copy)]
pub struct WaterfallStyle {
    /// Multiplier on every line height
    pub height_gain: f32,

    /// Scatter each line's colour around its row colour
    pub colorful: bool,

    /// Paint every row with this colour instead of the recorded one
    pub uniform_color: Option<Vec3>,
}

impl Default for WaterfallStyle {
    fn default() -> Self {
        Self {
            height_gain: 1.0,
            colorful: false,
            uniform_color: None,
        }
    }
}

/// Appends geometry for each visual element to a `Scene`
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    layout: RenderConfig,
}

impl SceneBuilder {
    pub fn new(layout: RenderConfig) -> Self {
        Self { layout }
    }

    /// One vertical line per bin per history row, oldest row furthest back
    pub fn waterfall(
        &self,
        scene: &mut Scene,
        history: &SpectrumHistory,
        style: WaterfallStyle,
        rng: &mut StdRng,
    ) {
        let bins = history.bins();
        if bins == 0 {
            return;
        }
        let l = &self.layout;
        let x_step = 2.0 * l.half_width / bins as f32;

        // Oldest first so nearer rows are drawn over older ones
        for (age, (values, row_color)) in history.iter().enumerate().rev() {
            let z = l.waterfall_front_z - age as f32 * l.waterfall_row_spacing;
            let row_color = style.uniform_color.unwrap_or(row_color);
            let mut x = -l.half_width;

            for &value in values {
                x += x_step;
                let color = if style.colorful {
                    with_alpha(mixed_random_color(row_color, rng), COLORFUL_ALPHA)
                } else {
                    with_alpha(row_color, WATERFALL_ALPHA)
                };
                let top = l.waterfall_base_y + value * style.height_gain;
                push_line(
                    scene,
                    [x, l.waterfall_base_y, z],
                    [x, top, z],
                    color,
                );
            }
        }
    }

    /// Time-domain waveform as a connected strip above the spectrum
    pub fn waveform(&self, scene: &mut Scene, samples: &[f32], color: Vec3) {
        if samples.len() < 2 {
            return;
        }
        let l = &self.layout;
        let x_step = 2.0 * l.half_width / samples.len() as f32;
        let color = with_alpha(color, 1.0);
        let point = |i: usize| {
            [
                -l.half_width + i as f32 * x_step,
                l.waveform_y + l.waveform_gain * samples[i],
                0.0,
            ]
        };

        for i in 1..samples.len() {
            push_line(scene, point(i - 1), point(i), color);
        }
    }

    pub fn walls(&self, scene: &mut Scene, walls: &WallLines) {
        let color = with_alpha(walls.color(), 1.0);
        for (near, far) in walls.segments() {
            push_line(scene, near.to_array(), far.to_array(), color);
        }
    }

    /// One screen-aligned quad per particle, back to front
    ///
    /// `size_gain` scales every quad (used for loud-frame emphasis).
    pub fn particles(&self, scene: &mut Scene, engine: &ParticleEngine, size_gain: f32) {
        let tilt = engine.tilt_degrees();
        for p in engine.depth_sorted() {
            let pos = p.tilted_location(tilt);
            let alpha = ((1.0 - p.life_fraction()) + PARTICLE_ALPHA_FLOOR).min(1.0);
            let color = with_alpha(p.color, alpha);
            let size = p.scale * size_gain;

            let corner = |dx: f32, dy: f32| Vertex {
                position: [pos.x + dx * size, pos.y + dy * size, pos.z],
                color,
            };
            let bottom_left = corner(-1.0, -1.0);
            let top_left = corner(-1.0, 1.0);
            let top_right = corner(1.0, 1.0);
            let bottom_right = corner(1.0, -1.0);

            scene.triangles.extend_from_slice(&[
                bottom_left,
                bottom_right,
                top_right,
                bottom_left,
                top_right,
                top_left,
            ]);
        }
    }
}

fn push_line(scene: &mut Scene, from: [f32; 3], to: [f32; 3], color: [f32; 4]) {
    scene.lines.push(Vertex {
        position: from,
        color,
    });
    scene.lines.push(Vertex {
        position: to,
        color,
    });
}
