/// Fixed-rate frame pacing
use std::thread;
use std::time::{Duration, Instant};

/// Sleeps the calling thread so ticks happen at most `rate` times a second.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait out the rest of the current frame and start the next one.
    ///
    /// The first call returns immediately. A `rate` of 0 never sleeps.
    /// Returns the time elapsed since the previous tick.
    pub fn tick(&mut self, rate: u32) -> Duration {
        if let (Some(last), Some(interval)) = (self.last_tick, Self::interval(rate)) {
            let elapsed = last.elapsed();
            if elapsed < interval {
                thread::sleep(interval - elapsed);
            }
        }

        let now = Instant::now();
        let delta = self
            .last_tick
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);
        delta
    }

    /// Length of one frame at `rate` ticks per second.
    pub fn interval(rate: u32) -> Option<Duration> {
        if rate == 0 {
            return None;
        }
        Some(Duration::from_secs(1) / rate)
    }
}
