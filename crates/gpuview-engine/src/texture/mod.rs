//! Texture loading.
//!
//! Decodes image files into RGBA8 and uploads them as sampled 2D textures
//! compatible with the `basic` pipeline's group 1 layout.

mod loader;

pub use loader::{Texture, TextureData, TextureLoader, TextureOptions};
