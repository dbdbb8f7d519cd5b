//! Frame timing.
//!
//! - one `FrameClock` per view; `tick()` once per draw to obtain `FrameTime`
//! - one `FramePacer` per view; decides when the next redraw is due

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::FramePacer;
