use std::path::Path;

use anyhow::{Context, Result};

/// Options applied when creating a texture.
#[derive(Debug, Clone)]
pub struct TextureOptions {
    /// Interpret texel data as sRGB-encoded color.
    pub srgb: bool,

    pub filter: wgpu::FilterMode,

    pub address_mode: wgpu::AddressMode,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            srgb: true,
            filter: wgpu::FilterMode::Linear,
            address_mode: wgpu::AddressMode::ClampToEdge,
        }
    }
}

/// A sampled 2D texture with its default view and sampler.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

/// Decoded RGBA8 pixels, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    /// Decodes an encoded image (PNG or JPEG).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).context("failed to decode image")?;
        let rgba = decoded.into_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            pixels: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Reads and decodes an image file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read texture {}", path.display()))?;
        Self::decode(&bytes).with_context(|| format!("failed to load texture {}", path.display()))
    }
}

/// Creates textures on a device.
///
/// Borrowed from a `RenderCtx`; cheap to construct per use.
pub struct TextureLoader<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl<'a> TextureLoader<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Loads an encoded image (PNG or JPEG) from disk.
    pub fn load_path(&self, path: impl AsRef<Path>, options: &TextureOptions) -> Result<Texture> {
        let path = path.as_ref();
        let data = TextureData::from_path(path)?;
        self.upload(&data, &path.display().to_string(), options)
    }

    /// Uploads pixels decoded with `TextureData::decode`.
    pub fn upload(&self, data: &TextureData, label: &str, options: &TextureOptions) -> Result<Texture> {
        self.load_rgba8(&data.pixels, data.width, data.height, label, options)
    }

    /// Uploads tightly packed RGBA8 pixels.
    pub fn load_rgba8(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        label: &str,
        options: &TextureOptions,
    ) -> Result<Texture> {
        check_rgba8_len(pixels.len(), width, height)?;

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let format = if options.srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: options.address_mode,
            address_mode_v: options.address_mode,
            address_mode_w: options.address_mode,
            mag_filter: options.filter,
            min_filter: options.filter,
            ..Default::default()
        });

        log::debug!("texture '{label}' loaded: {width}x{height} {format:?}");

        Ok(Texture {
            texture,
            view,
            sampler,
            width,
            height,
        })
    }
}

fn check_rgba8_len(len: usize, width: u32, height: u32) -> Result<()> {
    anyhow::ensure!(width > 0 && height > 0, "texture has zero size ({width}x{height})");

    let expected = width as usize * height as usize * 4;
    anyhow::ensure!(
        len == expected,
        "RGBA8 data is {len} bytes, expected {expected} for {width}x{height}"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;
    use std::path::PathBuf;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([x as u8 * 10, y as u8 * 10, 200, 255])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gpuview-{}-{name}", std::process::id()))
    }

    #[test]
    fn decode_png_yields_rgba8_pixels() {
        let data = TextureData::decode(&encoded_png(3, 2)).unwrap();
        assert_eq!((data.width, data.height), (3, 2));
        assert_eq!(data.pixels.len(), 3 * 2 * 4);
        // Pixel (2, 1): one row of 3 texels, then 2 more.
        let i = (3 + 2) * 4;
        assert_eq!(&data.pixels[i..i + 4], &[20, 10, 200, 255]);
        assert!(check_rgba8_len(data.pixels.len(), data.width, data.height).is_ok());
    }

    #[test]
    fn decode_garbage_is_an_error() {
        let err = TextureData::decode(b"definitely not an image").unwrap_err();
        assert!(format!("{err:#}").contains("failed to decode image"));
    }

    // ── files ─────────────────────────────────────────────────────────────

    #[test]
    fn reads_image_file() {
        let path = temp_path("texture.png");
        std::fs::write(&path, encoded_png(4, 4)).unwrap();

        let data = TextureData::from_path(&path);
        std::fs::remove_file(&path).unwrap();

        let data = data.unwrap();
        assert_eq!((data.width, data.height), (4, 4));
        assert_eq!(data, TextureData::decode(&encoded_png(4, 4)).unwrap());
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let path = temp_path("missing.png");
        let err = TextureData::from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }

    #[test]
    fn corrupt_file_error_names_the_path() {
        let path = temp_path("corrupt.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = TextureData::from_path(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        let msg = format!("{err:#}");
        assert!(msg.contains("failed to load texture"));
        assert!(msg.contains("failed to decode image"));
    }

    #[test]
    fn rgba8_len_must_match_size() {
        assert!(check_rgba8_len(16, 2, 2).is_ok());
        assert!(check_rgba8_len(15, 2, 2).is_err());
    }

    #[test]
    fn zero_sized_texture_is_rejected() {
        let err = check_rgba8_len(0, 0, 4).unwrap_err();
        assert!(err.to_string().contains("zero size"));
    }

    #[test]
    fn default_options_are_srgb_linear_clamped() {
        let opts = TextureOptions::default();
        assert!(opts.srgb);
        assert_eq!(opts.filter, wgpu::FilterMode::Linear);
        assert_eq!(opts.address_mode, wgpu::AddressMode::ClampToEdge);
    }
}
