//! Window, camera and scene layout configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    /// Must reach past the receding wall lines
    pub far_plane: f32,

    /// Camera position
    pub eye: [f32; 3],

    /// Camera look-at target
    pub target: [f32; 3],

    /// Spectrum and waveform span x ∈ [-half_width, half_width]
    pub half_width: f32,

    /// Baseline height of the waterfall
    pub waterfall_base_y: f32,

    /// Depth of the newest waterfall row
    pub waterfall_front_z: f32,

    /// Depth distance between consecutive waterfall rows
    pub waterfall_row_spacing: f32,

    /// Height of the waveform baseline
    pub waveform_y: f32,

    /// Sample → height multiplier for the waveform
    pub waveform_gain: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 720,
            fov_degrees: 45.0,
            near_plane: 1.0,
            far_plane: 600.0,
            eye: [0.0, 5.8, 10.0],
            target: [0.0, 0.0, 0.0],
            half_width: 5.0,
            waterfall_base_y: -2.0,
            waterfall_front_z: 5.0,
            waterfall_row_spacing: 0.4,
            waveform_y: 2.0,
            waveform_gain: 3.0,
        }
    }
}

/// Receding wall lines drawn in wobble mode
#[derive(Debug, Clone)]
pub struct WallParams {
    /// Total line endpoints across both walls (two per line)
    pub endpoint_count: usize,

    /// Walls stand at x = ±wall_x
    pub wall_x: f32,

    /// Endpoint heights are drawn from [-y_range, y_range]
    pub y_range: f32,

    /// Depth of the anchored (near) endpoints
    pub near_z: f32,

    /// Depth a receding endpoint is reset to
    pub reset_z: f32,

    /// Endpoints further than this are reset
    pub far_z: f32,

    /// Per-frame recede distance is `recede_speed * U(recede_min, recede_max)`
    pub recede_speed: f32,
    pub recede_min: f32,
    pub recede_max: f32,

    /// Probability per frame that the wall colour re-rolls
    pub color_change_chance: f64,

    /// Frames between waterfall colour re-rolls in wobble mode
    pub palette_refresh_frames: u64,
}

impl Default for WallParams {
    fn default() -> Self {
        Self {
            endpoint_count: 200,
            wall_x: 5.0,
            y_range: 10.0,
            near_z: 10.0,
            reset_z: 9.0,
            far_z: -500.0,
            recede_speed: 5.0,
            recede_min: 0.1,
            recede_max: 1.0,
            color_change_chance: 0.1,
            palette_refresh_frames: 100,
        }
    }
}
