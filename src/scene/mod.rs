//! CPU-side geometry for each display mode.
//!
//! Everything here is plain data: the renderer only uploads the vertex
//! lists a `Scene` carries, so all layout logic is testable without a GPU.

mod builder;
mod walls;

pub use builder::{SceneBuilder, WaterfallStyle};
pub use walls::WallLines;

use bytemuck::{Pod, Zeroable};

/// Vertex data for lines and particle quads (position + RGBA)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Geometry for one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Line list (pairs of vertices)
    pub lines: Vec<Vertex>,

    /// Triangle list (triples of vertices), drawn in order
    pub triangles: Vec<Vertex>,
}

impl Scene {
    pub fn clear(&mut self) {
        self.lines.clear();
        self.triangles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }

    /// Number of line segments
    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }

    /// Number of quads (two triangles each)
    pub fn quad_count(&self) -> usize {
        self.triangles.len() / 6
    }
}
