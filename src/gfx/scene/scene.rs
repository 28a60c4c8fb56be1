use crate::simulation::scene_graph::SceneGraph;
use crate::wgpu_utils::BindGroupLayoutWithDesc;

use super::object::{Object, ObjectKind};

/// GPU mirror of the scene graph's drawable nodes
pub struct Scene {
    pub objects: Vec<Object>,
}

impl Scene {
    /// Creates one object per drawable node, in graph order
    pub fn from_graph(graph: &SceneGraph) -> Self {
        let objects = graph
            .drawables()
            .map(|(id, drawable)| Object::from_drawable(id, graph.node(id).name.clone(), drawable))
            .collect();
        let mut scene = Self { objects };
        scene.sync_transforms(graph);
        scene
    }

    /// Initializes GPU resources for all objects
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, layout);
        }
    }

    /// Copies world matrices and visibility from the graph
    pub fn sync_transforms(&mut self, graph: &SceneGraph) {
        for object in self.objects.iter_mut() {
            object.visible = graph.is_visible(object.node);
            if object.visible {
                object.transform = graph.world_matrix(object.node);
            }
        }
    }

    /// Syncs from the graph and uploads every visible object's uniform
    pub fn update_all_transforms(&mut self, graph: &SceneGraph, queue: &wgpu::Queue) {
        self.sync_transforms(graph);
        for object in self.objects.iter_mut().filter(|object| object.visible) {
            object.update_transform(queue);
        }
    }

    pub fn visible(&self, kind: ObjectKind) -> impl Iterator<Item = &Object> {
        self.objects
            .iter()
            .filter(move |object| object.visible && object.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::builder::build_scene;
    use cgmath::{Matrix4, Vector4};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_scene_mirrors_graph_drawables() {
        let built = build_scene(&mut StdRng::seed_from_u64(1));
        let scene = Scene::from_graph(&built.graph);
        // Ten spheres, two rings and nine free objects
        assert_eq!(scene.objects.len(), 21);
        assert_eq!(scene.visible(ObjectKind::Ring).count(), 2);
        assert_eq!(scene.visible(ObjectKind::Surface).count(), 19);
    }

    #[test]
    fn test_sync_follows_graph_changes() {
        let mut built = build_scene(&mut StdRng::seed_from_u64(1));
        let mut scene = Scene::from_graph(&built.graph);
        let earth = built.bodies[3].clone();

        built.graph.node_mut(earth.mesh).scale = 3.0;
        built.graph.rotate_y(earth.pivot, std::f32::consts::PI);
        scene.sync_transforms(&built.graph);

        let object = scene
            .objects
            .iter()
            .find(|object| object.node == earth.mesh)
            .unwrap();
        let expected: Matrix4<f32> = built.graph.world_matrix(earth.mesh);
        assert_eq!(object.transform, expected);
        let origin = object.transform * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.x + 62.0).abs() < 1e-3);
    }

    #[test]
    fn test_hidden_nodes_are_skipped() {
        let mut built = build_scene(&mut StdRng::seed_from_u64(1));
        let mut scene = Scene::from_graph(&built.graph);
        let neo = built.free_objects[0].node;
        built.graph.node_mut(neo).visible = false;
        scene.sync_transforms(&built.graph);
        assert_eq!(scene.visible(ObjectKind::Surface).count(), 18);
    }
}
