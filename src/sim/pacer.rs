use std::thread;
use std::time::{Duration, Instant};

/// Caps the frame loop at a target rate.
///
/// Sleeps only when a frame finished early; a slow frame just runs long and
/// the next delta absorbs it (no skipping, no catch-up).
pub struct FramePacer {
    frame: Duration,
    last: Instant,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_micros(1_000_000 / u64::from(fps.max(1))),
            last: Instant::now(),
        }
    }

    #[inline]
    pub fn frame_time(&self) -> Duration {
        self.frame
    }

    /// Wait out the rest of the frame budget, then return the seconds since
    /// the previous call.
    pub fn tick(&mut self) -> f32 {
        if let Some(wait) = time_to_wait(self.frame, self.last.elapsed()) {
            thread::sleep(wait);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Remaining budget, or `None` if the frame already used it up.
pub fn time_to_wait(frame: Duration, elapsed: Duration) -> Option<Duration> {
    frame.checked_sub(elapsed).filter(|d| !d.is_zero())
}
