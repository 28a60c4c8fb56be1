//! Global uniform bindings for camera and scene data
//!
//! Manages the uniform buffer and bind group for per-frame state that is
//! shared across all draws: camera matrices, the sky matrix and the sun's
//! point light.

use cgmath::Matrix4;

use crate::{
    gfx::camera::OrbitCamera,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    pub view_proj: [[f32; 4]; 4],
    /// Maps clip space back to world-space view directions, ignoring translation
    pub sky_inv_view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    /// xyz position, w range
    pub light_position: [f32; 4],
    /// rgb colour, w intensity
    pub light_color: [f32; 4],
    pub ambient: [f32; 4],
}

/// Point light at the sun plus an ambient term
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    /// Distance at which the light falls off to zero
    pub range: f32,
    pub ambient: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            color: [1.0, 1.0, 1.0],
            intensity: 2.0,
            range: 300.0,
            ambient: hex_to_rgb(0x333333),
        }
    }
}

/// Converts a packed `0xRRGGBB` colour to floats in [0, 1]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

impl GlobalUBOContent {
    /// Packs the camera's cached uniform, so `update_view_proj` must have run
    pub fn new(camera: &OrbitCamera, light: &LightConfig) -> Self {
        let sky: Matrix4<f32> = camera.sky_inverse_view_projection();
        Self {
            view_proj: camera.uniform.view_proj,
            sky_inv_view_proj: sky.into(),
            view_position: camera.uniform.view_position,
            light_position: [
                light.position[0],
                light.position[1],
                light.position[2],
                light.range,
            ],
            light_color: [light.color[0], light.color[1], light.color[2], light.intensity],
            ambient: [light.ambient[0], light.ambient[1], light.ambient[2], 1.0],
        }
    }
}

/// Uploads camera and light state for this frame
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: &OrbitCamera,
    light: &LightConfig,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, light));
}

/// Bind group layout and bind group for the global uniforms (group 0)
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    #[test]
    fn test_globals_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 192);
        assert_eq!(std::mem::size_of::<GlobalUBOContent>() % 16, 0);
    }

    #[test]
    fn test_default_light_matches_scene() {
        let light = LightConfig::default();
        assert_eq!(light.intensity, 2.0);
        assert_eq!(light.range, 300.0);
        assert!((light.ambient[0] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_content_packs_light_and_eye() {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 50.0), Vector3::zero(), 1.0);
        let content = GlobalUBOContent::new(&camera, &LightConfig::default());
        assert_eq!(content.light_position[3], 300.0);
        assert_eq!(content.light_color[3], 2.0);
        assert!((content.view_position[2] - 50.0).abs() < 1e-4);
    }
}
