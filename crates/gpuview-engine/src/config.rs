//! File-backed configuration.
//!
//! A TOML file with `[window]`, `[graphics]` and `[projection]` tables. Every
//! key is optional; a missing file means all defaults. The file layer is only
//! a source: it converts into `RuntimeConfig` and `GpuInit`, which is what the
//! runtime consumes.
//!
//! ```toml
//! [window]
//! title = "cube"
//! width = 1024
//! height = 768
//!
//! [graphics]
//! preferred_frames_per_second = 60
//! clear_color = [0.0, 0.0, 0.0, 1.0]
//! present_mode = "fifo"
//!
//! [projection]
//! fov_y_degrees = 85.0
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use winit::dpi::LogicalSize;

use crate::coords::Perspective;
use crate::device::GpuInit;
use crate::window::{RuntimeConfig, ViewSettings};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub window: WindowSection,
    pub graphics: GraphicsSection,
    pub projection: ProjectionSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSection {
    pub title: String,
    /// Logical pixels.
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "gpuview".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphicsSection {
    pub preferred_frames_per_second: u32,
    /// Linear RGBA in `[0, 1]`.
    pub clear_color: [f64; 4],
    pub present_mode: PresentModeSetting,
    pub power_preference: PowerPreferenceSetting,
    pub prefer_srgb: bool,
    pub max_frame_latency: u32,
}

impl Default for GraphicsSection {
    fn default() -> Self {
        Self {
            preferred_frames_per_second: 60,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            present_mode: PresentModeSetting::Fifo,
            power_preference: PowerPreferenceSetting::High,
            prefer_srgb: false,
            max_frame_latency: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionSection {
    pub fov_y_degrees: f32,
    pub near_z: f32,
    pub far_z: f32,
}

impl Default for ProjectionSection {
    fn default() -> Self {
        let p = Perspective::default();
        Self {
            fov_y_degrees: p.fov_y_degrees,
            near_z: p.near_z,
            far_z: p.far_z,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentModeSetting {
    Fifo,
    FifoRelaxed,
    Mailbox,
    Immediate,
    AutoVsync,
    AutoNoVsync,
}

impl From<PresentModeSetting> for wgpu::PresentMode {
    fn from(mode: PresentModeSetting) -> Self {
        match mode {
            PresentModeSetting::Fifo => wgpu::PresentMode::Fifo,
            PresentModeSetting::FifoRelaxed => wgpu::PresentMode::FifoRelaxed,
            PresentModeSetting::Mailbox => wgpu::PresentMode::Mailbox,
            PresentModeSetting::Immediate => wgpu::PresentMode::Immediate,
            PresentModeSetting::AutoVsync => wgpu::PresentMode::AutoVsync,
            PresentModeSetting::AutoNoVsync => wgpu::PresentMode::AutoNoVsync,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreferenceSetting {
    None,
    Low,
    High,
}

impl From<PowerPreferenceSetting> for wgpu::PowerPreference {
    fn from(pref: PowerPreferenceSetting) -> Self {
        match pref {
            PowerPreferenceSetting::None => wgpu::PowerPreference::None,
            PowerPreferenceSetting::Low => wgpu::PowerPreference::LowPower,
            PowerPreferenceSetting::High => wgpu::PowerPreference::HighPerformance,
        }
    }
}

impl ViewConfig {
    /// Loads a config file. A missing file yields the defaults.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let w = &self.window;
        anyhow::ensure!(
            w.width.is_finite() && w.height.is_finite() && w.width > 0.0 && w.height > 0.0,
            "window size must be positive and finite, got {}x{}",
            w.width,
            w.height
        );

        // NaN fails every comparison below, but infinities would not.
        let p = &self.projection;
        anyhow::ensure!(
            p.fov_y_degrees.is_finite() && p.near_z.is_finite() && p.far_z.is_finite(),
            "projection values must be finite, got fov_y_degrees={} near_z={} far_z={}",
            p.fov_y_degrees,
            p.near_z,
            p.far_z
        );
        anyhow::ensure!(
            p.fov_y_degrees > 0.0 && p.fov_y_degrees < 180.0,
            "fov_y_degrees must be in (0, 180), got {}",
            p.fov_y_degrees
        );
        anyhow::ensure!(p.near_z > 0.0, "near_z must be positive, got {}", p.near_z);
        anyhow::ensure!(
            p.far_z > p.near_z,
            "far_z ({}) must be greater than near_z ({})",
            p.far_z,
            p.near_z
        );

        Ok(())
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        let [r, g, b, a] = self.graphics.clear_color;
        RuntimeConfig {
            title: self.window.title.clone(),
            initial_size: LogicalSize::new(self.window.width, self.window.height),
            view: ViewSettings {
                preferred_frames_per_second: self.graphics.preferred_frames_per_second,
                clear_color: wgpu::Color { r, g, b, a },
                perspective: Perspective {
                    fov_y_degrees: self.projection.fov_y_degrees,
                    near_z: self.projection.near_z,
                    far_z: self.projection.far_z,
                },
            },
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            prefer_srgb: self.graphics.prefer_srgb,
            present_mode: self.graphics.present_mode.into(),
            power_preference: self.graphics.power_preference.into(),
            desired_maximum_frame_latency: self.graphics.max_frame_latency,
            ..GpuInit::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = ViewConfig::from_toml_str("").unwrap();
        assert_eq!(config, ViewConfig::default());
        assert_eq!(config.graphics.preferred_frames_per_second, 60);
        assert_eq!(config.projection.fov_y_degrees, 85.0);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = ViewConfig::from_toml_str(
            r#"
            [window]
            title = "cube"

            [graphics]
            present_mode = "mailbox"
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "cube");
        assert_eq!(config.window.width, 1280.0);
        assert_eq!(config.graphics.present_mode, PresentModeSetting::Mailbox);
        assert_eq!(config.graphics.preferred_frames_per_second, 60);
    }

    #[test]
    fn unknown_present_mode_is_rejected() {
        let err = ViewConfig::from_toml_str("[graphics]\npresent_mode = \"triple\"").unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse TOML"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(ViewConfig::from_toml_str("[window]\nfullscreen = true").is_err());
    }

    #[test]
    fn far_plane_must_exceed_near_plane() {
        let err = ViewConfig::from_toml_str("[projection]\nnear_z = 5.0\nfar_z = 1.0").unwrap_err();
        assert!(err.to_string().contains("far_z"));
    }

    #[test]
    fn zero_window_size_is_rejected() {
        assert!(ViewConfig::from_toml_str("[window]\nheight = 0.0").is_err());
    }

    #[test]
    fn infinite_window_size_is_rejected() {
        let err = ViewConfig::from_toml_str("[window]\nwidth = inf").unwrap_err();
        assert!(err.to_string().contains("finite"));
        assert!(ViewConfig::from_toml_str("[window]\nheight = nan").is_err());
    }

    #[test]
    fn infinite_far_plane_is_rejected() {
        let err = ViewConfig::from_toml_str("[projection]\nfar_z = inf").unwrap_err();
        assert!(err.to_string().contains("finite"));
        assert!(ViewConfig::from_toml_str("[projection]\nnear_z = nan").is_err());
        assert!(ViewConfig::from_toml_str("[projection]\nfov_y_degrees = -inf").is_err());
    }

    #[test]
    fn converts_into_runtime_config() {
        let config = ViewConfig::from_toml_str(
            r#"
            [window]
            width = 800.0
            height = 600.0

            [graphics]
            preferred_frames_per_second = 30
            clear_color = [0.1, 0.2, 0.3, 1.0]

            [projection]
            fov_y_degrees = 60.0
            "#,
        )
        .unwrap();

        let rc = config.runtime_config();
        assert_eq!(rc.initial_size, LogicalSize::new(800.0, 600.0));
        assert_eq!(rc.view.preferred_frames_per_second, 30);
        assert_eq!(rc.view.clear_color, wgpu::Color { r: 0.1, g: 0.2, b: 0.3, a: 1.0 });
        assert_eq!(rc.view.perspective.fov_y_degrees, 60.0);
        assert_eq!(rc.view.perspective.near_z, 0.01);
    }

    #[test]
    fn converts_into_gpu_init() {
        let config = ViewConfig::from_toml_str(
            "[graphics]\npresent_mode = \"immediate\"\npower_preference = \"low\"\nprefer_srgb = true",
        )
        .unwrap();

        let init = config.gpu_init();
        assert_eq!(init.present_mode, wgpu::PresentMode::Immediate);
        assert_eq!(init.power_preference, wgpu::PowerPreference::LowPower);
        assert!(init.prefer_srgb);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = ViewConfig::load_from_path("/nonexistent/gpuview.toml").unwrap();
        assert_eq!(config, ViewConfig::default());
    }
}
