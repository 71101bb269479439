//! Frame timing.

use std::time::{Duration, Instant};

/// Frames-per-second counter, refreshed once per interval.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    /// Frame count since last update
    frame_count: u32,
    /// Time of last FPS calculation
    last_update: Instant,
    /// Update interval
    update_interval: Duration,
    /// Current FPS value
    current_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    /// Create a new FPS counter with a one second interval.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    /// Create a counter with a custom interval.
    #[must_use]
    pub fn with_interval(update_interval: Duration) -> Self {
        Self {
            frame_count: 0,
            last_update: Instant::now(),
            update_interval,
            current_fps: 0.0,
        }
    }

    /// Tick the counter. Returns the new FPS when it was recalculated.
    pub fn tick(&mut self) -> Option<f32> {
        self.frame_count += 1;

        let elapsed = self.last_update.elapsed();
        if elapsed < self.update_interval {
            return None;
        }

        self.current_fps = self.frame_count as f32 / elapsed.as_secs_f32();
        self.frame_count = 0;
        self.last_update = Instant::now();
        Some(self.current_fps)
    }

    /// Get current FPS.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.current_fps
    }
}
