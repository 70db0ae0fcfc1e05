//! Frame timing with clamped delta time.

use std::time::{Duration, Instant};

/// One clock tick
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped
    pub dt: f32,
}

/// Per-window frame clock
///
/// Delta time is clamped so a stalled or minimised window does not make the
/// particle integrator jump ahead.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_min: Duration,
    dt_max: Duration,
    fps_window_start: Instant,
    fps_window_frames: u32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            last: now,
            dt_min,
            dt_max,
            fps_window_start: now,
            fps_window_frames: 0,
        }
    }

    /// Restart timing, e.g. after the window was hidden
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advance the clock to `now`
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
        };

        self.fps_window_frames += 1;
        let window = now.saturating_duration_since(self.fps_window_start);
        if window >= Duration::from_secs(5) {
            log::debug!(
                "{:.1} fps",
                self.fps_window_frames as f32 / window.as_secs_f32()
            );
            self.fps_window_start = now;
            self.fps_window_frames = 0;
        }

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dt_is_clamped() {
        let mut clock = FrameClock::new();
        let start = clock.last;

        let ft = clock.tick_at(start);
        assert!((ft.dt - 0.0001).abs() < 1e-7);

        let ft = clock.tick_at(start + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);

        let ft = clock.tick_at(start + Duration::from_secs(10));
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_time_going_backwards_counts_as_minimum() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        clock.tick_at(start + Duration::from_millis(50));

        let ft = clock.tick_at(start);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
    }
}
