//! Pointer hit testing and hover scaling

use cgmath::{Vector3, Zero};

use super::entities::{Body, HoverTarget};
use super::scene_graph::SceneGraph;
use crate::gfx::picking::{BoundingSphere, ObjectPicker, Ray, AABB};

/// What a pointer move did to the hover state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing hovered before or after
    Idle,
    Entered(usize),
    Switched { from: usize, to: usize },
    /// Still over the same body
    Stayed(usize),
    Left(usize),
}

impl PointerOutcome {
    pub fn classify(previous: Option<usize>, current: Option<usize>) -> Self {
        match (previous, current) {
            (None, None) => PointerOutcome::Idle,
            (None, Some(body)) => PointerOutcome::Entered(body),
            (Some(from), Some(to)) if from != to => PointerOutcome::Switched { from, to },
            (Some(_), Some(body)) => PointerOutcome::Stayed(body),
            (Some(body), None) => PointerOutcome::Left(body),
        }
    }
}

/// Diagonal of the unscaled bounding box of a sphere
pub fn base_diagonal(radius: f32) -> f32 {
    AABB::around(Vector3::zero(), radius).diagonal()
}

/// Uniform scale that brings a sphere's bounding-box diagonal to `target_size`
///
/// Computed from the unscaled radius, so reapplying it never compounds.
pub fn hover_scale(radius: f32, target_size: f32) -> f32 {
    let diagonal = base_diagonal(radius);
    if diagonal > 0.0 {
        target_size / diagonal
    } else {
        1.0
    }
}

/// Current world-space bounds of a body's mesh
pub fn body_bounds(graph: &SceneGraph, body: &Body) -> BoundingSphere {
    BoundingSphere::new(
        graph.world_position(body.mesh),
        body.base_radius * graph.world_scale(body.mesh),
    )
}

/// Closest hoverable body hit by `ray`
pub fn pick_body(graph: &SceneGraph, bodies: &[Body], ray: &Ray) -> Option<HoverTarget> {
    let candidates = bodies
        .iter()
        .enumerate()
        .filter(|(_, body)| body.is_hoverable())
        .map(|(index, body)| (index, body_bounds(graph, body)));

    ObjectPicker::new()
        .pick(ray, candidates)
        .map(|hit| HoverTarget {
            body: hit.object_index,
            point: hit.intersection_point,
            distance: hit.distance,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::registry::BodyKind;

    fn body_at(graph: &mut SceneGraph, name: &'static str, kind: BodyKind, x: f32, radius: f32) -> Body {
        let pivot = graph.add_root(format!("{name} pivot"));
        let mesh = graph.add_child(pivot, name);
        graph.node_mut(mesh).translation = Vector3::new(x, 0.0, 0.0);
        Body {
            name,
            kind,
            mesh,
            pivot,
            ring: None,
            spin_rate: 0.0,
            revolve_rate: 0.0,
            description: None,
            base_radius: radius,
        }
    }

    #[test]
    fn test_hover_scale_hits_target_for_any_radius() {
        for radius in [2.8, 6.0, 12.0, 16.0] {
            let scale = hover_scale(radius, 200.0);
            assert!((base_diagonal(radius) * scale - 200.0).abs() < 1e-3);
        }
        assert_eq!(hover_scale(0.0, 200.0), 1.0);
    }

    #[test]
    fn test_classify_transitions() {
        assert_eq!(PointerOutcome::classify(None, None), PointerOutcome::Idle);
        assert_eq!(PointerOutcome::classify(None, Some(2)), PointerOutcome::Entered(2));
        assert_eq!(PointerOutcome::classify(Some(2), Some(2)), PointerOutcome::Stayed(2));
        assert_eq!(
            PointerOutcome::classify(Some(2), Some(4)),
            PointerOutcome::Switched { from: 2, to: 4 }
        );
        assert_eq!(PointerOutcome::classify(Some(4), None), PointerOutcome::Left(4));
    }

    #[test]
    fn test_pick_prefers_nearest_and_skips_stars() {
        let mut graph = SceneGraph::new();
        let bodies = vec![
            body_at(&mut graph, "Sun", BodyKind::Star, 0.0, 16.0),
            body_at(&mut graph, "Far", BodyKind::Planet, 0.0, 3.0),
            body_at(&mut graph, "Near", BodyKind::Planet, 0.0, 3.0),
        ];
        graph.node_mut(bodies[1].mesh).translation = Vector3::new(0.0, 0.0, -50.0);
        graph.node_mut(bodies[2].mesh).translation = Vector3::new(0.0, 0.0, 20.0);

        let ray = Ray::new(Vector3::new(0.0, 0.0, 100.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = pick_body(&graph, &bodies, &ray).unwrap();
        assert_eq!(hit.body, 2);
        assert!((hit.distance - 77.0).abs() < 1e-4);
    }

    #[test]
    fn test_pick_tie_keeps_registry_order() {
        let mut graph = SceneGraph::new();
        let bodies = vec![
            body_at(&mut graph, "First", BodyKind::Planet, 10.0, 4.0),
            body_at(&mut graph, "Second", BodyKind::Planet, 10.0, 4.0),
        ];
        let ray = Ray::new(Vector3::new(10.0, 0.0, 100.0), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(pick_body(&graph, &bodies, &ray).map(|hit| hit.body), Some(0));
    }

    #[test]
    fn test_pick_uses_scaled_bounds() {
        let mut graph = SceneGraph::new();
        let bodies = vec![body_at(&mut graph, "Earth", BodyKind::Planet, 0.0, 6.0)];
        let ray = Ray::new(Vector3::new(10.0, 0.0, 100.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(pick_body(&graph, &bodies, &ray).is_none());

        graph.node_mut(bodies[0].mesh).scale = 2.0;
        assert!(pick_body(&graph, &bodies, &ray).is_some());
    }
}
