use winit::dpi::PhysicalSize;

/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height, or `None` when the viewport has no area.
    pub fn aspect_ratio(self) -> Option<f32> {
        self.is_valid().then(|| self.width / self.height)
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_of_landscape_size() {
        let vp = Viewport::from(PhysicalSize::new(1920u32, 1080u32));
        let aspect = vp.aspect_ratio().unwrap();
        assert!((aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_has_no_aspect_ratio() {
        assert_eq!(Viewport::new(640.0, 0.0).aspect_ratio(), None);
        assert_eq!(Viewport::new(0.0, 480.0).aspect_ratio(), None);
    }

    #[test]
    fn non_finite_is_invalid() {
        assert!(!Viewport::new(f32::INFINITY, 10.0).is_valid());
        assert!(!Viewport::new(10.0, f32::NAN).is_valid());
    }
}
