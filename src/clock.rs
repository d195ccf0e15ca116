use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Blocks until the next tick boundary.
    fn wait_next_tick(&mut self);
    /// Blocks for a fixed duration regardless of the tick schedule.
    fn pause(&mut self, duration: Duration);
}

/// Caps the loop at a fixed tick rate by sleeping out the rest of each frame.
#[derive(Debug)]
pub struct FixedRateClock {
    frame: Duration,
    frame_start: Instant,
}

impl FixedRateClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / ticks_per_second.max(1),
            frame_start: Instant::now(),
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }
}

impl Clock for FixedRateClock {
    fn wait_next_tick(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
        self.frame_start = Instant::now();
    }
}
