//! gpuview engine crate.
//!
//! Wires a window to a GPU surface, compiles the fixed `basic` shader pair into
//! a pipeline state and relays per-frame update/render calls to a delegate.

pub mod config;
pub mod coords;
pub mod device;
pub mod logging;
pub mod pipeline;
pub mod texture;
pub mod time;
pub mod view;
pub mod window;
