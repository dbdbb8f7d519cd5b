//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the window, and drives the view
//! controller's resize and draw hooks from window events.

mod runtime;
mod settings;

pub use runtime::Runtime;
pub use settings::{RuntimeConfig, ViewSettings};
