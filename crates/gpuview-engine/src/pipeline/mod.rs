//! The fixed render pipeline.
//!
//! One WGSL module with two entry points, `basic_vertex` and `basic_fragment`,
//! compiled once per view for the drawable's color format.
//!
//! Bind groups:
//! - group 0: `Uniforms` (model-view + projection), vertex stage
//! - group 1: texture + sampler, fragment stage
//!
//! There is no depth attachment. Closed meshes rely on back-face culling to
//! hide their far side, so front faces must wind counter-clockwise.

mod state;
mod vertex;

pub use state::PipelineState;
pub use vertex::{Uniforms, Vertex};

pub const VERTEX_ENTRY: &str = "basic_vertex";
pub const FRAGMENT_ENTRY: &str = "basic_fragment";

pub const FRONT_FACE: wgpu::FrontFace = wgpu::FrontFace::Ccw;
pub const CULL_MODE: Option<wgpu::Face> = Some(wgpu::Face::Back);
