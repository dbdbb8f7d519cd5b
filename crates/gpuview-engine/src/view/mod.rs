//! The view controller and its delegate contract.
//!
//! The runtime owns one `ViewController` per window. The controller owns the
//! device and pipeline state; the delegate is external and only weakly
//! referenced, so dropping it silently stops the relay.

mod controller;
mod ctx;
mod delegate;
mod slot;

pub use controller::ViewController;
pub use ctx::RenderCtx;
pub use delegate::{AppControl, ViewDelegate};
pub use slot::DelegateSlot;
