//! Frame timing utilities

use std::time::Instant;

/// Timing for a single frame, produced by [`FrameClock::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Frame number, starting at 1 for the first tick
    pub frame: u64,
    /// Seconds since the previous tick
    pub delta: f32,
    /// Seconds since the clock was created
    pub total: f64,
}

/// Frame clock driving the host loop
///
/// Everything in the UI layer is frame-driven; the clock only supplies frame
/// numbers and timestamps for logging and events.
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    frame: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock at frame 0
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame: 0,
        }
    }

    /// Advance to the next frame (call once per frame)
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frame += 1;

        FrameTime {
            frame: self.frame,
            delta,
            total: now.duration_since(self.start).as_secs_f64(),
        }
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Seconds since the clock was created
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f64 {
        let elapsed = self.elapsed_secs();
        if elapsed > 0.0 {
            self.frame as f64 / elapsed
        } else {
            0.0
        }
    }
}
