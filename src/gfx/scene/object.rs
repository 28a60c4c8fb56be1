//! GPU-side drawable objects
//!
//! Each drawable scene-graph node becomes an [`Object`]: a mesh, the texture
//! it samples and a per-object uniform holding its world matrix.

use std::ops::Range;

use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use super::vertex::Vertex3D;
use crate::gfx::geometry::{generate_ring, generate_sphere, GeometryData};
use crate::simulation::scene_graph::{Drawable, NodeId, Shading};
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
    UniformBuffer,
};

/// Which pipeline draws the object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Opaque sphere, back-face culled
    Surface,
    /// Double-sided, alpha-blended ring
    Ring,
}

/// Per-object uniform (group 1)
///
/// MUST match the `ObjectUniform` struct in the shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// x: 1.0 when lit by the point light, 0.0 when unlit
    pub params: [f32; 4],
}

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        Self {
            vertices: geometry.to_vertices(),
            indices: geometry.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
            index_count: geometry.indices.len() as u32,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn is_uploaded(&self) -> bool {
        self.vertex_buffer.is_some() && self.index_buffer.is_some()
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, label: &str) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

struct ObjectGpuResources {
    uniform: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub node: NodeId,
    pub name: String,
    pub kind: ObjectKind,
    pub texture: &'static str,
    pub lit: bool,
    pub visible: bool,
    /// World matrix as of the last sync
    pub transform: Matrix4<f32>,
    mesh: Mesh,
    gpu_resources: Option<ObjectGpuResources>,
}

/// Layout of the per-object uniform bind group
pub fn object_bind_group_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_rendering(binding_types::uniform())
        .create(device, "Object Bind Group Layout")
}

impl Object {
    /// Tessellates the drawable into a CPU mesh; GPU buffers come later
    pub fn from_drawable(node: NodeId, name: impl Into<String>, drawable: &Drawable) -> Self {
        let (kind, geometry, lit) = match drawable {
            Drawable::Sphere {
                radius,
                width_segments,
                height_segments,
                shading,
                ..
            } => (
                ObjectKind::Surface,
                generate_sphere(*radius, *width_segments, *height_segments),
                *shading == Shading::Lit,
            ),
            Drawable::Ring {
                inner_radius,
                outer_radius,
                segments,
                ..
            } => (
                ObjectKind::Ring,
                generate_ring(*inner_radius, *outer_radius, *segments),
                true,
            ),
        };

        Self {
            node,
            name: name.into(),
            kind,
            texture: drawable.texture(),
            lit,
            visible: true,
            transform: Matrix4::identity(),
            mesh: Mesh::from_geometry(&geometry),
            gpu_resources: None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn uniform(&self) -> ObjectUniform {
        ObjectUniform {
            model: self.transform.into(),
            params: [if self.lit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) {
        self.mesh.init_gpu_resources(device, &self.name);

        let uniform = UniformBuffer::new_with_data(device, &self.uniform());
        let bind_group = BindGroupBuilder::new(layout)
            .resource(uniform.binding_resource())
            .create(device, &format!("{} Object Bind Group", self.name));
        self.gpu_resources = Some(ObjectGpuResources {
            uniform,
            bind_group,
        });
    }

    /// Uploads the current transform if GPU resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        let content = self.uniform();
        if let Some(gpu_resources) = &mut self.gpu_resources {
            gpu_resources.uniform.update_content(queue, content);
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|res| &res.bind_group)
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    /// Draws with the object's uniform at group 1. The caller binds groups 0 and 2.
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        let Some(bind_group) = object.bind_group() else {
            return;
        };
        self.set_bind_group(1, bind_group, &[]);
        self.draw_mesh(&object.mesh);
    }
}
