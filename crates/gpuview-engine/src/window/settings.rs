use winit::dpi::LogicalSize;

use crate::coords::Perspective;

/// Per-view presentation settings, applied when the view is wired up.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Target redraw rate. `0` redraws on every event-loop pass.
    pub preferred_frames_per_second: u32,

    pub clear_color: wgpu::Color,

    pub perspective: Perspective,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            preferred_frames_per_second: 60,
            clear_color: wgpu::Color::BLACK,
            perspective: Perspective::default(),
        }
    }
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub view: ViewSettings,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gpuview".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            view: ViewSettings::default(),
        }
    }
}
