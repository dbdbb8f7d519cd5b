use glam::Mat4;

use super::Viewport;

/// Perspective camera parameters.
///
/// The matrix is rebuilt whenever the drawable changes size; only the aspect
/// ratio varies between rebuilds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Perspective {
    /// Vertical field of view, in degrees.
    pub fov_y_degrees: f32,
    pub near_z: f32,
    pub far_z: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_y_degrees: 85.0,
            near_z: 0.01,
            far_z: 100.0,
        }
    }
}

impl Perspective {
    /// Right-handed projection with depth mapped to `[0, 1]`.
    pub fn matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            aspect_ratio,
            self.near_z,
            self.far_z,
        )
    }

    /// Projection for a drawable of the given size.
    ///
    /// Returns `None` for a zero-area viewport (minimized window); callers keep
    /// their previous matrix in that case.
    pub fn for_viewport(&self, viewport: Viewport) -> Option<Mat4> {
        viewport.aspect_ratio().map(|aspect| self.matrix(aspect))
    }
}
