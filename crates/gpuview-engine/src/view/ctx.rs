use glam::Mat4;

use crate::coords::Viewport;
use crate::pipeline::PipelineState;
use crate::texture::TextureLoader;

/// Delegate-facing view of the controller's GPU state.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub pipeline: &'a PipelineState,
    pub projection: Mat4,
    pub viewport: Viewport,
    pub clear_color: wgpu::Color,
}

impl<'a> RenderCtx<'a> {
    /// Texture loader bound to this view's device.
    pub fn texture_loader(&self) -> TextureLoader<'a> {
        TextureLoader::new(self.device, self.queue)
    }
}
