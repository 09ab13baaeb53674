//! Frame timing

use std::time::{Duration, Instant};

/// Frame timer
///
/// Call [`Timer::update`] once per frame; it tracks the last frame's duration,
/// the accumulated time and the number of frames, and can tell when a periodic
/// statistics line is due.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    last_report_time: f32,
    last_report_frame: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            last_report_time: 0.0,
            last_report_frame: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(elapsed);
    }

    /// Account for one frame that took `elapsed`
    pub fn advance(&mut self, elapsed: Duration) {
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }

    /// Average FPS over the window since the previous report, if `interval` seconds have passed
    ///
    /// An interval of zero never reports.
    pub fn take_report(&mut self, interval: f32) -> Option<f32> {
        let window = self.total_time - self.last_report_time;
        if interval <= 0.0 || window < interval {
            return None;
        }

        let frames = self.frame_count - self.last_report_frame;
        self.last_report_time = self.total_time;
        self.last_report_frame = self.frame_count;
        Some(frames as f32 / window)
    }
}
