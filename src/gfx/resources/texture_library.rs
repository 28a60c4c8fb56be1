//! Named surface textures and their bind groups (group 2)

use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;

use super::texture_resource::{load_rgba, square_face, TextureResource};
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
};

struct LoadedTexture {
    _texture: TextureResource,
    bind_group: wgpu::BindGroup,
}

pub struct TextureLibrary {
    layout: BindGroupLayoutWithDesc,
    textures: HashMap<&'static str, LoadedTexture>,
    fallback: LoadedTexture,
}

fn texture_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_fragment(binding_types::texture_2d())
        .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
        .create(device, "Surface Texture Bind Group Layout")
}

fn bind(
    device: &wgpu::Device,
    layout: &BindGroupLayoutWithDesc,
    resource: TextureResource,
    label: &str,
) -> LoadedTexture {
    let bind_group = BindGroupBuilder::new(layout)
        .texture(&resource.view)
        .sampler(&resource.sampler)
        .create(device, label);
    LoadedTexture {
        _texture: resource,
        bind_group,
    }
}

impl TextureLibrary {
    /// Loads every named image from `asset_dir`. Failures are logged and fall back to grey.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        asset_dir: &Path,
        names: &[&'static str],
        max_dimension: u32,
    ) -> Self {
        let layout = texture_layout(device);
        let fallback = bind(
            device,
            &layout,
            TextureResource::fallback(device, queue),
            "Fallback Texture Bind Group",
        );

        let mut textures = HashMap::new();
        let mut missing = 0;
        for &name in names {
            match load_rgba(&asset_dir.join(name), max_dimension) {
                Ok(image) => {
                    let resource = TextureResource::from_image(device, queue, &image, name);
                    let loaded = bind(device, &layout, resource, &format!("{} Bind Group", name));
                    textures.insert(name, loaded);
                }
                Err(e) => {
                    log::warn!("{} ({}); using fallback texture", e, name);
                    missing += 1;
                }
            }
        }

        log::info!(
            "Loaded {} textures from {} ({} missing)",
            textures.len(),
            asset_dir.display(),
            missing
        );

        Self {
            layout,
            textures,
            fallback,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout.layout
    }

    /// Bind group for `name`, or the fallback when it failed to load
    pub fn bind_group(&self, name: &str) -> &wgpu::BindGroup {
        self.textures
            .get(name)
            .map(|texture| &texture.bind_group)
            .unwrap_or(&self.fallback.bind_group)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Loads the starfield image as a cube map. A missing image yields a grey sky.
pub fn load_starfield(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
    max_dimension: u32,
) -> TextureResource {
    let face = match load_rgba(path, max_dimension) {
        Ok(image) => square_face(&image, max_dimension),
        Err(e) => {
            log::warn!("{}; using fallback starfield", e);
            RgbaImage::from_pixel(1, 1, image::Rgba([128, 128, 128, 255]))
        }
    };
    TextureResource::create_cube_from_face(device, queue, &face, "Starfield Cube Map")
}
