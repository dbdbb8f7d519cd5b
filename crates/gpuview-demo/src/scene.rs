use std::path::PathBuf;

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use gpuview_engine::device::Drawable;
use gpuview_engine::pipeline::Uniforms;
use gpuview_engine::texture::{Texture, TextureOptions};
use gpuview_engine::time::FrameTime;
use gpuview_engine::view::{AppControl, RenderCtx, ViewDelegate};

use crate::cube;

/// Radians per second around the Y axis.
const SPIN_SPEED: f32 = 0.9;
const CAMERA_DISTANCE: f32 = 4.0;
const TEXTURE_SIZE: u32 = 64;

struct SceneGpu {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    uniforms_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
}

/// A textured cube spinning in front of the camera.
#[derive(Default)]
pub struct CubeScene {
    rotation: f32,
    frames_rendered: u64,
    /// Image file for the cube faces; a checkerboard when unset.
    texture_path: Option<PathBuf>,
    gpu: Option<SceneGpu>,
}

impl CubeScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texture(path: impl Into<PathBuf>) -> Self {
        Self {
            texture_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn model_view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE))
            * Mat4::from_rotation_y(self.rotation)
            * Mat4::from_rotation_x(self.rotation * 0.5)
    }

    fn create_texture(&self, ctx: &RenderCtx<'_>) -> anyhow::Result<Texture> {
        let loader = ctx.texture_loader();

        if let Some(path) = &self.texture_path {
            return loader.load_path(path, &TextureOptions::default());
        }

        let pixels = cube::checkerboard(TEXTURE_SIZE, 8);
        loader.load_rgba8(
            &pixels,
            TEXTURE_SIZE,
            TEXTURE_SIZE,
            "cube checkerboard",
            &TextureOptions {
                filter: wgpu::FilterMode::Nearest,
                ..TextureOptions::default()
            },
        )
    }

    fn create_gpu(&self, ctx: &RenderCtx<'_>) -> anyhow::Result<SceneGpu> {
        let vertices = cube::vertices();
        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube vbo"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = ctx.pipeline.create_uniform_buffer(ctx.device, "cube uniforms");
        let uniforms_bind_group = ctx.pipeline.uniforms_bind_group(ctx.device, &uniform_buffer);

        let texture = self.create_texture(ctx)?;
        let texture_bind_group = ctx.pipeline.texture_bind_group(ctx.device, &texture);

        Ok(SceneGpu {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            uniform_buffer,
            uniforms_bind_group,
            texture_bind_group,
        })
    }
}

impl ViewDelegate for CubeScene {
    fn view_did_load(&mut self, ctx: &RenderCtx<'_>) {
        match self.create_gpu(ctx) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => log::error!("failed to create cube resources: {e:#}"),
        }
    }

    fn update_logic(&mut self, time: FrameTime) {
        self.rotation = (self.rotation + time.dt * SPIN_SPEED) % std::f32::consts::TAU;
    }

    fn render_objects(&mut self, ctx: &RenderCtx<'_>, drawable: &mut Drawable) {
        let Some(gpu) = self.gpu.as_ref() else { return };

        let uniforms = Uniforms::new(self.model_view(), ctx.projection);
        ctx.queue.write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut rpass = drawable.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cube pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &drawable.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(ctx.pipeline.pipeline());
        rpass.set_bind_group(0, &gpu.uniforms_bind_group, &[]);
        rpass.set_bind_group(1, &gpu.texture_bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        rpass.draw(0..gpu.vertex_count, 0..1);

        self.frames_rendered += 1;
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn frame(dt: f32) -> FrameTime {
        FrameTime {
            dt,
            now: Instant::now(),
            frame_index: 0,
        }
    }

    #[test]
    fn update_advances_rotation() {
        let mut scene = CubeScene::new();
        scene.update_logic(frame(0.5));
        assert!((scene.rotation - 0.45).abs() < 1e-6);
    }

    #[test]
    fn rotation_wraps_at_full_turn() {
        let mut scene = CubeScene::new();
        scene.rotation = std::f32::consts::TAU - 0.01;
        scene.update_logic(frame(0.1));
        assert!(scene.rotation < 0.1);
    }

    #[test]
    fn default_scene_is_untextured_and_idle() {
        let scene = CubeScene::default();
        assert_eq!(scene.rotation, 0.0);
        assert_eq!(scene.frames_rendered(), 0);
        assert!(scene.texture_path.is_none());
        assert!(scene.gpu.is_none());
    }

    #[test]
    fn with_texture_keeps_path_and_defaults() {
        let scene = CubeScene::with_texture("assets/crate.png");
        assert_eq!(scene.texture_path, Some(PathBuf::from("assets/crate.png")));
        assert_eq!(scene.frames_rendered(), 0);
    }

    #[test]
    fn cube_sits_in_front_of_camera() {
        let scene = CubeScene::new();
        let center = scene.model_view().transform_point3(Vec3::ZERO);
        assert_eq!(center, Vec3::new(0.0, 0.0, -CAMERA_DISTANCE));
    }
}
