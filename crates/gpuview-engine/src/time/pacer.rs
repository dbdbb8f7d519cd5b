use std::time::{Duration, Instant};

/// Schedules redraws at a preferred frame rate.
///
/// With `preferred_fps == 0` every pass through the event loop is a redraw and
/// pacing is left to the surface's present mode.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next: Option<Instant>,
}

impl FramePacer {
    pub fn new(preferred_fps: u32) -> Self {
        let interval = (preferred_fps > 0).then(|| Duration::from_secs(1) / preferred_fps);
        Self { interval, next: None }
    }

    /// Frame interval, if pacing is active.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Returns `true` if a redraw is due at `now`.
    ///
    /// A due frame schedules the next deadline one interval after `now`, so a
    /// late frame does not cause a burst of catch-up redraws.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };

        match self.next {
            Some(deadline) if now < deadline => false,
            _ => {
                self.next = Some(now + interval);
                true
            }
        }
    }

    /// Deadline for the next redraw, if one has been scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Forgets the schedule; the next `poll` is due immediately.
    pub fn reset(&mut self) {
        self.next = None;
    }
}
