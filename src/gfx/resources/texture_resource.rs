//! Texture resource management for wgpu
//!
//! Creates depth buffers, image textures and the starfield cube map, and
//! loads the image files they are built from.

use std::path::Path;

use image::{imageops::FilterType, RgbaImage};

use crate::error::AssetError;

/// Largest texture side the loader uploads without downscaling
pub const MAX_TEXTURE_DIMENSION: u32 = 4096;

/// GPU texture resource containing texture, view, and sampler
#[derive(Clone)]
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Size that fits `(width, height)` inside `max_dimension`, keeping the aspect ratio
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let largest = width.max(height);
    if largest <= max_dimension {
        return (width, height);
    }
    let scale = max_dimension as f64 / largest as f64;
    (
        ((width as f64 * scale).round() as u32).clamp(1, max_dimension),
        ((height as f64 * scale).round() as u32).clamp(1, max_dimension),
    )
}

/// Decodes an image file to RGBA8, downscaling it to fit `max_dimension`
pub fn load_rgba(path: &Path, max_dimension: u32) -> Result<RgbaImage, AssetError> {
    let reader = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let image = reader
        .decode()
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    Ok(downscale_to_fit(image, max_dimension))
}

pub fn downscale_to_fit(image: RgbaImage, max_dimension: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (fit_width, fit_height) = fit_within(width, height, max_dimension);
    if (fit_width, fit_height) == (width, height) {
        return image;
    }
    log::debug!(
        "Downscaling {}x{} texture to {}x{}",
        width,
        height,
        fit_width,
        fit_height
    );
    image::imageops::resize(&image, fit_width, fit_height, FilterType::Triangle)
}

/// Resamples an image to a square cube face
pub fn square_face(image: &RgbaImage, max_dimension: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let side = width.min(height).clamp(1, max_dimension);
    if width == side && height == side {
        return image.clone();
    }
    image::imageops::resize(image, side, side, FilterType::Triangle)
}

impl TextureResource {
    /// Standard depth buffer format used throughout the engine
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Format of all colour textures; images are sRGB-encoded
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Creates a depth texture matching the surface configuration
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            lod_min_clamp: 0.0,
            lod_max_clamp: 100.0,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Creates a 2D texture from raw RGBA data
    ///
    /// U wraps so sphere seams sample continuously; V clamps at the poles.
    pub fn create_from_rgba_data(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let (width, height) = image.dimensions();
        Self::create_from_rgba_data(device, queue, image.as_raw(), width, height, label)
    }

    /// 1x1 grey texture substituted for assets that fail to load
    pub fn fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::create_from_rgba_data(device, queue, &[128, 128, 128, 255], 1, 1, "Fallback Texture")
    }

    /// Creates a cube map with the same square image on all six faces
    pub fn create_cube_from_face(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        face: &RgbaImage,
        label: &str,
    ) -> Self {
        let (side, _) = face.dimensions();
        let size = wgpu::Extent3d {
            width: side,
            height: side,
            depth_or_array_layers: 6,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for layer in 0..6 {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                face.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * side),
                    rows_per_image: Some(side),
                },
                wgpu::Extent3d {
                    width: side,
                    height: side,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(&format!("{} View", label)),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_keeps_small_images() {
        assert_eq!(fit_within(2048, 1024, 4096), (2048, 1024));
        assert_eq!(fit_within(4096, 4096, 4096), (4096, 4096));
    }

    #[test]
    fn test_fit_within_preserves_aspect() {
        assert_eq!(fit_within(8192, 4096, 4096), (4096, 2048));
        assert_eq!(fit_within(1000, 10000, 4096), (410, 4096));
        assert_eq!(fit_within(100_000, 1, 4096), (4096, 1));
    }

    #[test]
    fn test_square_face_uses_smaller_side() {
        let image = RgbaImage::new(64, 32);
        let face = square_face(&image, 4096);
        assert_eq!(face.dimensions(), (32, 32));

        let large = RgbaImage::new(64, 64);
        assert_eq!(square_face(&large, 16).dimensions(), (16, 16));
    }

    #[test]
    fn test_downscale_to_fit() {
        let image = RgbaImage::new(40, 20);
        assert_eq!(downscale_to_fit(image, 10).dimensions(), (10, 5));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_rgba(Path::new("definitely/not/here.png"), MAX_TEXTURE_DIMENSION);
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }
}
