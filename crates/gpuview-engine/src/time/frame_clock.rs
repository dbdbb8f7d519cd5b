use std::time::{Duration, Instant};

/// Frame timing snapshot handed to `ViewDelegate::update_logic`.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a debugger pause or a long stall does not hand the
/// delegate a huge step, and a tight loop never reports zero. The first tick
/// after creation or `reset` has no previous frame and reports the minimum.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    fresh: bool,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            fresh: true,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline; the runtime calls this once the view has loaded.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.fresh = true;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = if self.fresh {
            self.dt_min
        } else {
            now.saturating_duration_since(self.last)
                .clamp(self.dt_min, self.dt_max)
        };

        self.last = now;
        self.fresh = false;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
