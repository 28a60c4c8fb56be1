//! WGPU-based rendering engine for the orrery
//!
//! Owns the surface, device and depth buffer, the three pipelines and every
//! GPU mirror of the scene graph. A frame is a single pass: starfield first,
//! then opaque surfaces, then blended rings, then the UI overlay on top.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::config::OrreryConfig;
use crate::error::RenderError;
use crate::gfx::{
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig},
        texture_library::{load_starfield, TextureLibrary},
        texture_resource::{TextureResource, MAX_TEXTURE_DIMENSION},
    },
    scene::{
        object::{object_bind_group_layout, DrawObject, ObjectKind},
        scene::Scene,
    },
};
use crate::simulation::{registry, FrameView, SceneGraph};
use crate::wgpu_utils::{binding_types, BindGroupBuilder, BindGroupLayoutBuilder};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const STARFIELD_PIPELINE: &str = "Starfield";
const SURFACE_PIPELINE: &str = "Surface";
const RING_PIPELINE: &str = "Ring";

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    light_config: LightConfig,
    textures: TextureLibrary,
    _starfield: TextureResource,
    starfield_bind_group: wgpu::BindGroup,
    scene: Scene,
}

/// Picks an sRGB format when the surface offers one
pub fn choose_surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

pub fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::Immediate
    }
}

impl RenderEngine {
    /// Creates a render engine for the given window and uploads the scene
    ///
    /// Textures are read from `settings.asset_dir`. A texture that fails to
    /// load is replaced by a grey fallback rather than failing startup.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        graph: &SceneGraph,
        settings: &OrreryConfig,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: MAX_TEXTURE_DIMENSION,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&surface_capabilities.formats)
            .ok_or(RenderError::NoSurfaceFormat)?;
        log::info!("Surface format {:?}, vsync {}", format, settings.vsync);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(settings.vsync),
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let light_config = settings.light;
        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let object_layout = object_bind_group_layout(&device);

        // Textures
        let max_dimension = device.limits().max_texture_dimension_2d;
        let surface_textures: Vec<&'static str> = registry::texture_names()
            .into_iter()
            .filter(|name| *name != registry::STARFIELD_TEXTURE)
            .collect();
        log::info!("Loading textures from {}", settings.asset_dir.display());
        let textures = TextureLibrary::load(
            &device,
            &queue,
            &settings.asset_dir,
            &surface_textures,
            max_dimension,
        );

        let starfield = load_starfield(
            &device,
            &queue,
            &settings.asset_dir.join(registry::STARFIELD_TEXTURE),
            max_dimension,
        );
        let starfield_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_cube())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(&device, "Starfield Bind Group Layout");
        let starfield_bind_group = BindGroupBuilder::new(&starfield_layout)
            .texture(&starfield.view)
            .sampler(&starfield.sampler)
            .create(&device, "Starfield Bind Group");

        // Scene
        let mut scene = Scene::from_graph(graph);
        scene.init_gpu_resources(&device, &object_layout);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("surface", include_str!("shaders/surface.wgsl"));
        pipeline_manager.load_shader("starfield", include_str!("shaders/starfield.wgsl"));

        // Sky behind everything: depth attachment is shared but never tested or written
        pipeline_manager.register_pipeline(
            STARFIELD_PIPELINE,
            PipelineConfig::default()
                .with_label("STARFIELD")
                .with_shader("starfield")
                .with_cull_mode(None)
                .with_depth_stencil(TextureResource::DEPTH_FORMAT)
                .with_depth_write(false)
                .with_depth_compare(wgpu::CompareFunction::Always)
                .with_color_target(format, None)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    starfield_layout.layout.clone(),
                ])
                .with_no_vertex_buffers(),
        );

        let scene_layouts = vec![
            global_bindings.bind_group_layout().clone(),
            object_layout.layout.clone(),
            textures.layout().clone(),
        ];

        pipeline_manager.register_pipeline(
            SURFACE_PIPELINE,
            PipelineConfig::default()
                .with_label("SURFACE")
                .with_shader("surface")
                .with_depth_stencil(TextureResource::DEPTH_FORMAT)
                .with_color_target(format, Some(wgpu::BlendState::REPLACE))
                .with_bind_group_layouts(scene_layouts.clone()),
        );

        // Rings are seen from both sides and blend over what is behind them
        pipeline_manager.register_pipeline(
            RING_PIPELINE,
            PipelineConfig::default()
                .with_label("RING")
                .with_shader("surface")
                .with_fragment_entry("fs_ring")
                .with_cull_mode(None)
                .with_depth_stencil(TextureResource::DEPTH_FORMAT)
                .with_depth_write(false)
                .with_color_target(format, Some(wgpu::BlendState::ALPHA_BLENDING))
                .with_bind_group_layouts(scene_layouts),
        );

        pipeline_manager.create_all_pipelines()?;
        let stats = pipeline_manager.get_stats();
        log::debug!(
            "{} pipelines from {} shaders",
            stats.total_pipelines,
            stats.loaded_shaders
        );

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            light_config,
            textures,
            _starfield: starfield,
            starfield_bind_group,
            scene,
        })
    }

    /// Uploads camera, light and every visible object's world matrix
    pub fn update(&mut self, frame: FrameView<'_>) {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            frame.camera,
            &self.light_config,
        );
        self.scene.update_all_transforms(frame.graph, &self.queue);
    }

    /// Renders a frame with an optional UI overlay
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped, as is
    /// a timed-out acquire. Only an out-of-memory surface is returned as an error.
    pub fn render_frame<F>(&mut self, ui_callback: Option<F>) -> Result<(), RenderError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface texture acquire timed out; skipping frame");
                return Ok(());
            }
            Err(e @ wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory");
                return Err(e.into());
            }
            Err(e) => {
                log::warn!("Surface error {}; skipping frame", e);
                return Ok(());
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.encode_scene(&mut encoder, &surface_texture_view);

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn encode_scene(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

        if let Some(pipeline) = self.pipeline_manager.pipeline(STARFIELD_PIPELINE) {
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(1, &self.starfield_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        for (pipeline_name, kind) in [
            (SURFACE_PIPELINE, ObjectKind::Surface),
            (RING_PIPELINE, ObjectKind::Ring),
        ] {
            let Some(pipeline) = self.pipeline_manager.pipeline(pipeline_name) else {
                continue;
            };
            render_pass.set_pipeline(pipeline);
            for object in self.scene.visible(kind) {
                render_pass.set_bind_group(2, self.textures.bind_group(object.texture), &[]);
                render_pass.draw_object(object);
            }
        }
    }

    /// Reconfigures the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (a minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn set_light(&mut self, light_config: LightConfig) {
        self.light_config = light_config;
    }

    pub fn get_light(&self) -> LightConfig {
        self.light_config
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    ///
    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn textures(&self) -> &TextureLibrary {
        &self.textures
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_srgb_surface_format() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn test_falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];
        assert_eq!(
            choose_surface_format(&formats),
            Some(TextureFormat::Rgba16Float)
        );
        assert_eq!(choose_surface_format(&[]), None);
    }

    #[test]
    fn test_present_mode_follows_vsync() {
        assert_eq!(present_mode(true), wgpu::PresentMode::Fifo);
        assert_eq!(present_mode(false), wgpu::PresentMode::Immediate);
    }
}
