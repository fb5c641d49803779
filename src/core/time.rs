//! Frame timing utilities

use std::time::{Duration, Instant};

/// Tracks frame-to-frame timing for hosts driving model updates
///
/// Call [`FrameTimer::tick`] once per frame and feed the returned delta
/// into `ModelController::update`.
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps_timer: now,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame; returns the delta since the previous tick in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Update FPS every second
        let fps_elapsed = now - self.fps_timer;
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
        }

        self.delta.as_secs_f32()
    }

    /// Delta of the most recent tick
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Frames per second, updated once per second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total number of ticks since creation
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
