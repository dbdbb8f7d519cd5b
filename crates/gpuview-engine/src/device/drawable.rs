/// The surface texture acquired for one frame, plus an encoder to record into.
///
/// A drawable is short-lived: holding it blocks acquisition of the next one.
/// The view controller submits the encoder and presents the texture once the
/// delegate's `render_objects` returns.
pub struct Drawable {
    pub(crate) surface_texture: wgpu::SurfaceTexture,

    /// Color view of the surface texture, the render pass target.
    pub view: wgpu::TextureView,

    /// Encoder for this frame's commands.
    pub encoder: wgpu::CommandEncoder,
}
