//! Drawable geometry and camera projection.
//!
//! Sizes are physical pixels of the drawable. Clip space follows wgpu:
//! right-handed view space, depth in `[0, 1]`.

mod projection;
mod viewport;

pub use projection::Perspective;
pub use viewport::Viewport;
