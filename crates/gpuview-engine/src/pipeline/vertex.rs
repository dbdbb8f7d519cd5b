use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Vertex layout consumed by `basic_vertex`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4, // color
        2 => Float32x2  // tex_coord
    ];

    pub const fn new(position: [f32; 3], color: [f32; 4], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            color,
            tex_coord,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Uniform block bound at group 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub model_view: Mat4,
    pub projection: Mat4,
}

impl Uniforms {
    pub fn new(model_view: Mat4, projection: Mat4) -> Self {
        Self {
            model_view,
            projection,
        }
    }

    pub(crate) fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<Uniforms>() as u64)
            .expect("Uniforms has non-zero size by construction")
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_stride_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), (3 + 4 + 2) * 4);
        assert_eq!(Vertex::layout().array_stride, 36);
    }

    #[test]
    fn vertex_attribute_offsets() {
        let offsets: Vec<u64> = Vertex::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 28]);
    }

    #[test]
    fn uniforms_match_wgsl_block_size() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 128);
        assert_eq!(Uniforms::min_binding_size().get(), 128);
    }

    #[test]
    fn uniforms_cast_to_column_major_floats() {
        let u = Uniforms::new(Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0)), Mat4::IDENTITY);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&u));
        assert_eq!(&floats[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(floats[16], 1.0);
    }
}
