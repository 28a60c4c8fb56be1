//! # Scene Graph
//!
//! CPU-side node hierarchy for the orrery. Nodes live in an arena and refer to
//! each other by [`NodeId`]. The renderer reads world matrices from here every
//! frame; nothing in this module touches the GPU.

use cgmath::{Matrix4, Rad, Vector3, Vector4, Zero};
use std::f32::consts::TAU;

/// Handle to a node inside a [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a sphere responds to the point light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Lit,
    Unlit,
}

/// Geometry attached to a node
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        texture: &'static str,
        shading: Shading,
    },
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        segments: u32,
        texture: &'static str,
    },
}

impl Drawable {
    pub fn texture(&self) -> &'static str {
        match self {
            Drawable::Sphere { texture, .. } | Drawable::Ring { texture, .. } => texture,
        }
    }

    /// Radius of the smallest origin-centred sphere enclosing the geometry
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Drawable::Sphere { radius, .. } => *radius,
            Drawable::Ring { outer_radius, .. } => *outer_radius,
        }
    }
}

/// A single node. Local transform is `T · Ry · Rx · S`.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub translation: Vector3<f32>,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub scale: f32,
    pub visible: bool,
    pub drawable: Option<Drawable>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            translation: Vector3::zero(),
            rotation_x: 0.0,
            rotation_y: 0.0,
            scale: 1.0,
            visible: true,
            drawable: None,
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn local_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_angle_y(Rad(self.rotation_y))
            * Matrix4::from_angle_x(Rad(self.rotation_x))
            * Matrix4::from_scale(self.scale)
    }
}

/// Wraps an angle into `[0, 2π)`
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name, None));
        id
    }

    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Nodes carrying geometry, in insertion order
    pub fn drawables(&self) -> impl Iterator<Item = (NodeId, &Drawable)> {
        self.iter()
            .filter_map(|(id, node)| node.drawable.as_ref().map(|drawable| (id, drawable)))
    }

    /// Adds `delta` to the node's y rotation, keeping it in `[0, 2π)`
    pub fn rotate_y(&mut self, id: NodeId, delta: f32) {
        let node = self.node_mut(id);
        node.rotation_y = wrap_angle(node.rotation_y + delta);
    }

    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let mut matrix = self.node(id).local_matrix();
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            let node = self.node(parent);
            matrix = node.local_matrix() * matrix;
            current = node.parent;
        }
        matrix
    }

    pub fn world_position(&self, id: NodeId) -> Vector3<f32> {
        (self.world_matrix(id) * Vector4::new(0.0, 0.0, 0.0, 1.0)).truncate()
    }

    /// Product of the uniform scales from the root down to `id`
    pub fn world_scale(&self, id: NodeId) -> f32 {
        let mut scale = self.node(id).scale;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            let node = self.node(parent);
            scale *= node.scale;
            current = node.parent;
        }
        scale
    }

    /// A node is drawn only when it and all its ancestors are visible
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if !node.visible {
                return false;
            }
            current = node.parent;
        }
        true
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// World matrices of every visible drawable node
    pub fn visible_world_matrices(&self) -> Vec<(NodeId, Matrix4<f32>)> {
        self.drawables()
            .filter(|(id, _)| self.is_visible(*id))
            .map(|(id, _)| (id, self.world_matrix(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_child_follows_parent_rotation() {
        let mut graph = SceneGraph::new();
        let pivot = graph.add_root("pivot");
        let mesh = graph.add_child(pivot, "mesh");
        graph.node_mut(mesh).translation = Vector3::new(10.0, 0.0, 0.0);

        graph.rotate_y(pivot, FRAC_PI_2);
        let position = graph.world_position(mesh);
        // Rotating +x by 90 degrees about y lands on -z
        assert!((position - Vector3::new(0.0, 0.0, -10.0)).magnitude() < 1e-4);
        assert_eq!(graph.node(pivot).children(), &[mesh]);
        assert_eq!(graph.node(mesh).parent(), Some(pivot));
    }

    #[test]
    fn test_own_rotation_does_not_move_origin() {
        let mut graph = SceneGraph::new();
        let pivot = graph.add_root("pivot");
        let mesh = graph.add_child(pivot, "mesh");
        graph.node_mut(mesh).translation = Vector3::new(10.0, 0.0, 0.0);

        graph.rotate_y(mesh, 1.3);
        let position = graph.world_position(mesh);
        assert!((position - Vector3::new(10.0, 0.0, 0.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_rotation_wraps_into_range() {
        let mut graph = SceneGraph::new();
        let node = graph.add_root("node");
        graph.rotate_y(node, TAU + 0.5);
        assert!((graph.node(node).rotation_y - 0.5).abs() < 1e-5);
        graph.rotate_y(node, -1.0);
        let angle = graph.node(node).rotation_y;
        assert!((0.0..TAU).contains(&angle));
        assert!((angle - (TAU - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_world_scale_and_visibility_inherit() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_root("parent");
        let child = graph.add_child(parent, "child");
        graph.node_mut(parent).scale = 2.0;
        graph.node_mut(child).scale = 3.0;
        assert_eq!(graph.world_scale(child), 6.0);

        graph.node_mut(parent).visible = false;
        assert!(!graph.is_visible(child));
    }

    #[test]
    fn test_drawables_in_insertion_order() {
        let mut graph = SceneGraph::new();
        let a = graph.add_root("a");
        let _empty = graph.add_root("empty");
        let b = graph.add_root("b");
        for id in [a, b] {
            graph.node_mut(id).drawable = Some(Drawable::Ring {
                inner_radius: 1.0,
                outer_radius: 2.0,
                segments: 8,
                texture: "ring.png",
            });
        }
        let ids: Vec<NodeId> = graph.drawables().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(graph.find("b"), Some(b));
    }
}
