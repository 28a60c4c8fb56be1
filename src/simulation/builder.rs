//! Builds the scene graph and entity lists from the registry tables.
//!
//! Each body gets a pivot node at the origin. The sphere mesh hangs off the
//! pivot at `(orbit_radius, 0, 0)` and the optional ring sits beside it,
//! rotated flat into the orbital plane.

use cgmath::Vector3;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

use super::entities::{Body, FreeMovingObject};
use super::registry::{
    self, BodyDescriptor, BodyKind, FreeObjectDescriptor, BODY_SEGMENTS, FREE_OBJECT_SEGMENTS,
    RING_SEGMENTS,
};
use super::scene_graph::{Drawable, SceneGraph, Shading};

/// Everything instantiated at startup
#[derive(Debug, Clone)]
pub struct SolarSystemScene {
    pub graph: SceneGraph,
    pub bodies: Vec<Body>,
    pub free_objects: Vec<FreeMovingObject>,
}

pub fn build_scene(rng: &mut impl Rng) -> SolarSystemScene {
    let mut graph = SceneGraph::new();
    let bodies = registry::bodies()
        .map(|descriptor| add_body(&mut graph, descriptor))
        .collect();
    let free_objects = registry::FREE_OBJECTS
        .iter()
        .map(|descriptor| add_free_object(&mut graph, descriptor, rng))
        .collect();

    SolarSystemScene {
        graph,
        bodies,
        free_objects,
    }
}

fn add_body(graph: &mut SceneGraph, descriptor: &BodyDescriptor) -> Body {
    let pivot = graph.add_root(format!("{} pivot", descriptor.name));

    let mesh = graph.add_child(pivot, descriptor.name);
    let node = graph.node_mut(mesh);
    node.translation = Vector3::new(descriptor.orbit_radius, 0.0, 0.0);
    node.drawable = Some(Drawable::Sphere {
        radius: descriptor.radius,
        width_segments: BODY_SEGMENTS.0,
        height_segments: BODY_SEGMENTS.1,
        texture: descriptor.texture,
        shading: match descriptor.kind {
            BodyKind::Star => Shading::Unlit,
            BodyKind::Planet => Shading::Lit,
        },
    });

    let ring = descriptor.ring.map(|ring| {
        let id = graph.add_child(pivot, format!("{} ring", descriptor.name));
        let node = graph.node_mut(id);
        node.translation = Vector3::new(descriptor.orbit_radius, 0.0, 0.0);
        node.rotation_x = -FRAC_PI_2;
        node.drawable = Some(Drawable::Ring {
            inner_radius: ring.inner_radius,
            outer_radius: ring.outer_radius,
            segments: RING_SEGMENTS,
            texture: ring.texture,
        });
        id
    });

    Body {
        name: descriptor.name,
        kind: descriptor.kind,
        mesh,
        pivot,
        ring,
        spin_rate: descriptor.spin_rate,
        revolve_rate: descriptor.revolve_rate,
        description: descriptor.description,
        base_radius: descriptor.radius,
    }
}

fn add_free_object(
    graph: &mut SceneGraph,
    descriptor: &FreeObjectDescriptor,
    rng: &mut impl Rng,
) -> FreeMovingObject {
    let id = graph.add_root(descriptor.name);
    let position = Vector3::from(descriptor.position);
    let node = graph.node_mut(id);
    node.translation = position;
    node.drawable = Some(Drawable::Sphere {
        radius: descriptor.radius,
        width_segments: FREE_OBJECT_SEGMENTS.0,
        height_segments: FREE_OBJECT_SEGMENTS.1,
        texture: descriptor.texture,
        shading: Shading::Lit,
    });

    let speed = descriptor.speed.sample(rng);
    FreeMovingObject {
        name: descriptor.name,
        node: id,
        position,
        speed,
        resume_speed: speed,
        speed_range: descriptor.speed,
        visible: true,
        description: descriptor.description,
    }
}
