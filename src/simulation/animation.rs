//! Per-frame motion: body spin and revolution, free-object drift and respawn.
//!
//! Rates are per-call constants, so motion speed follows the display refresh rate.

use cgmath::Vector3;
use rand::Rng;

use super::entities::{Body, FreeMovingObject};
use super::scene_graph::SceneGraph;
use crate::config::FreeMotionConfig;

/// Advances every body's spin and revolution by one step, in slice order
pub fn advance_bodies(graph: &mut SceneGraph, bodies: &[Body]) {
    for body in bodies {
        graph.rotate_y(body.mesh, body.spin_rate);
        graph.rotate_y(body.pivot, body.revolve_rate);
    }
}

/// Vertical wobble added to each moving object this tick
pub fn oscillation(now_ms: f64, config: &FreeMotionConfig) -> f32 {
    (now_ms * config.oscillation_frequency).sin() as f32 * config.oscillation_amplitude
}

/// Moves one object by its speed. Returns true when it was respawned.
///
/// Frozen objects (speed 0) are left untouched.
pub fn advance_free_object(
    object: &mut FreeMovingObject,
    now_ms: f64,
    config: &FreeMotionConfig,
    rng: &mut impl Rng,
) -> bool {
    if object.speed <= 0.0 {
        return false;
    }

    object.position.x -= object.speed;
    object.position.y += oscillation(now_ms, config);

    if object.position.x < config.despawn_x {
        object.position = Vector3::new(
            rng.random_range(config.respawn_x.clone()),
            rng.random_range(config.respawn_y.clone()),
            rng.random_range(config.respawn_z.clone()),
        );
        return true;
    }
    false
}

/// Advances every free object. Returns how many respawned.
pub fn advance_free_objects(
    objects: &mut [FreeMovingObject],
    now_ms: f64,
    config: &FreeMotionConfig,
    rng: &mut impl Rng,
) -> usize {
    let mut respawned = 0;
    for object in objects.iter_mut() {
        if advance_free_object(object, now_ms, config, rng) {
            log::debug!(
                "{} respawned at ({:.1}, {:.1}, {:.1})",
                object.name,
                object.position.x,
                object.position.y,
                object.position.z
            );
            respawned += 1;
        }
    }
    respawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::registry::{BodyKind, SpeedRange};
    use rand::{rngs::StdRng, SeedableRng};
    use std::f32::consts::TAU;

    fn neo(x: f32, speed: f32) -> FreeMovingObject {
        FreeMovingObject {
            name: "NEO 1",
            node: SceneGraph::new().add_root("neo"),
            position: Vector3::new(x, 10.0, 0.0),
            speed,
            resume_speed: speed,
            speed_range: SpeedRange::new(1.0, 2.0),
            visible: true,
            description: "NEO 1",
        }
    }

    #[test]
    fn test_bodies_accumulate_rates() {
        let mut graph = SceneGraph::new();
        let pivot = graph.add_root("pivot");
        let mesh = graph.add_child(pivot, "mesh");
        let bodies = vec![Body {
            name: "Earth",
            kind: BodyKind::Planet,
            mesh,
            pivot,
            ring: None,
            spin_rate: 0.02,
            revolve_rate: 0.01,
            description: None,
            base_radius: 6.0,
        }];

        for _ in 0..100 {
            advance_bodies(&mut graph, &bodies);
        }
        assert!((graph.node(mesh).rotation_y - 2.0).abs() < 1e-4);
        assert!((graph.node(pivot).rotation_y - 1.0).abs() < 1e-4);

        for _ in 0..300 {
            advance_bodies(&mut graph, &bodies);
        }
        let expected = (400.0 * 0.02_f32).rem_euclid(TAU);
        assert!((graph.node(mesh).rotation_y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_object_moves_by_speed() {
        let config = FreeMotionConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut object = neo(50.0, 2.0);

        // sin(0) = 0, so y is unchanged at t = 0
        assert!(!advance_free_object(&mut object, 0.0, &config, &mut rng));
        assert_eq!(object.position.x, 48.0);
        assert_eq!(object.position.y, 10.0);
    }

    #[test]
    fn test_oscillation_follows_wall_clock() {
        let config = FreeMotionConfig::default();
        let quarter_period_ms = std::f64::consts::FRAC_PI_2 * 1000.0;
        assert!((oscillation(quarter_period_ms, &config) - 0.01).abs() < 1e-6);
        assert!(oscillation(0.0, &config).abs() < 1e-9);
    }

    #[test]
    fn test_frozen_object_stays_put() {
        let config = FreeMotionConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut object = neo(-150.0, 0.0);
        assert!(!advance_free_object(&mut object, 1234.0, &config, &mut rng));
        assert_eq!(object.position, Vector3::new(-150.0, 10.0, 0.0));
    }

    #[test]
    fn test_respawn_lands_in_bounds() {
        let config = FreeMotionConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for start_x in [-99.5, -99.9, -150.0] {
            let mut object = neo(start_x, 1.0);
            assert!(advance_free_object(&mut object, 500.0, &config, &mut rng));
            assert!(config.respawn_x.contains(&object.position.x));
            assert!(config.respawn_y.contains(&object.position.y));
            assert!(config.respawn_z.contains(&object.position.z));
        }
    }

    #[test]
    fn test_exact_threshold_is_not_despawned() {
        let config = FreeMotionConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut object = neo(-99.0, 1.0);
        assert!(!advance_free_object(&mut object, 0.0, &config, &mut rng));
        assert_eq!(object.position.x, -100.0);
    }

    #[test]
    fn test_advance_all_counts_respawns() {
        let config = FreeMotionConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut objects = vec![neo(-99.5, 1.0), neo(0.0, 1.0), neo(-99.8, 0.5)];
        assert_eq!(advance_free_objects(&mut objects, 0.0, &config, &mut rng), 2);
        assert_eq!(objects[1].position.x, -1.0);
    }
}
