//! # Simulation Entities
//!
//! Runtime state for the bodies, the free-moving objects and the pointer
//! interaction. Transforms live in the [`SceneGraph`](super::scene_graph::SceneGraph);
//! entities refer to their nodes by id.

use cgmath::Vector3;

use super::registry::{BodyKind, SpeedRange};
use super::scene_graph::NodeId;

/// Text shown when a hovered body has no description
pub const FALLBACK_DESCRIPTION: &str = "No description available.";

/// A sun or planet with fixed spin and revolve rates
#[derive(Debug, Clone)]
pub struct Body {
    pub name: &'static str,
    pub kind: BodyKind,
    /// Sphere mesh, child of `pivot`, offset along x by the orbital radius
    pub mesh: NodeId,
    /// Invisible node at the origin; its y rotation is the orbital angle
    pub pivot: NodeId,
    pub ring: Option<NodeId>,
    /// Radians added to the mesh's y rotation per frame
    pub spin_rate: f32,
    /// Radians added to the pivot's y rotation per frame
    pub revolve_rate: f32,
    pub description: Option<&'static str>,
    /// Unscaled sphere radius
    pub base_radius: f32,
}

impl Body {
    pub fn is_hoverable(&self) -> bool {
        self.kind == BodyKind::Planet
    }

    pub fn description_text(&self) -> &'static str {
        self.description.unwrap_or(FALLBACK_DESCRIPTION)
    }
}

/// A near-earth object drifting along -x
#[derive(Debug, Clone)]
pub struct FreeMovingObject {
    pub name: &'static str,
    pub node: NodeId,
    pub position: Vector3<f32>,
    /// Units per frame; 0 means frozen
    pub speed: f32,
    /// Speed recorded when the object was last frozen
    pub resume_speed: f32,
    /// Range the initial speed was drawn from
    pub speed_range: SpeedRange,
    pub visible: bool,
    pub description: &'static str,
}

impl FreeMovingObject {
    pub fn is_frozen(&self) -> bool {
        self.speed <= 0.0
    }

    /// Stops the object and forces it visible. Refreezing keeps the stored speed.
    pub fn freeze(&mut self) {
        if self.speed > 0.0 {
            self.resume_speed = self.speed;
        }
        self.speed = 0.0;
        self.visible = true;
    }
}

/// The body under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTarget {
    /// Index into the context's body list
    pub body: usize,
    /// World-space point where the pointer ray meets the body
    pub point: Vector3<f32>,
    /// Distance along the ray to `point`
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InteractionState {
    pub hovered: Option<HoverTarget>,
}

impl InteractionState {
    /// Orbital animation is suspended exactly while something is hovered
    pub fn is_suspended(&self) -> bool {
        self.hovered.is_some()
    }

    pub fn hovered_body(&self) -> Option<usize> {
        self.hovered.map(|target| target.body)
    }
}

/// Description panel contents and placement, in physical pixels
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionOverlay {
    pub body_name: &'static str,
    pub text: &'static str,
    pub position: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::scene_graph::SceneGraph;
    use cgmath::Zero;

    fn object(speed: f32) -> FreeMovingObject {
        FreeMovingObject {
            name: "NEO 1",
            node: SceneGraph::new().add_root("neo"),
            position: Vector3::zero(),
            speed,
            resume_speed: speed,
            speed_range: SpeedRange::new(1.0, 2.0),
            visible: false,
            description: "NEO 1",
        }
    }

    #[test]
    fn test_freeze_records_speed_once() {
        let mut neo = object(2.5);
        neo.freeze();
        assert!(neo.is_frozen());
        assert!(neo.visible);
        assert_eq!(neo.resume_speed, 2.5);

        neo.freeze();
        assert_eq!(neo.resume_speed, 2.5);
    }

    #[test]
    fn test_suspension_follows_hover() {
        let mut state = InteractionState::default();
        assert!(!state.is_suspended());
        state.hovered = Some(HoverTarget {
            body: 3,
            point: Vector3::zero(),
            distance: 1.0,
        });
        assert!(state.is_suspended());
        assert_eq!(state.hovered_body(), Some(3));
    }
}
