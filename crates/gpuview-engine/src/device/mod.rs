//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring drawables and presenting them

mod drawable;
mod error;
mod gpu;
mod init;
mod surface;

pub use drawable::Drawable;
pub use error::SurfaceErrorAction;
pub use gpu::Gpu;
pub use init::GpuInit;
