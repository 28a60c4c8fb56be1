//! # Solar System Context
//!
//! [`SolarSystem`] owns all simulation state: the scene graph, bodies, free
//! objects, hover state, viewport, camera, RNG and clock. The application
//! drives it through the [`Simulation`] callbacks.

use cgmath::{Deg, Vector3};
use rand::{rngs::StdRng, SeedableRng};

use super::animation::{advance_bodies, advance_free_objects};
use super::builder::build_scene;
use super::clock::{Clock, SystemClock};
use super::entities::{Body, DescriptionOverlay, FreeMovingObject, HoverTarget, InteractionState};
use super::interaction::{hover_scale, pick_body, PointerOutcome};
use super::scene_graph::SceneGraph;
use super::traits::{FrameTarget, FrameView, Simulation};
use super::viewport::Viewport;
use crate::config::{CameraSetup, FreeMotionConfig, OrreryConfig, ResumePolicy};
use crate::gfx::camera::OrbitCamera;

pub struct SolarSystem {
    graph: SceneGraph,
    bodies: Vec<Body>,
    free_objects: Vec<FreeMovingObject>,
    interaction: InteractionState,
    description: Option<DescriptionOverlay>,
    viewport: Viewport,
    camera: OrbitCamera,
    free_motion: FreeMotionConfig,
    resume_policy: ResumePolicy,
    rng: StdRng,
    clock: Box<dyn Clock>,
    frame_count: u64,
}

impl SolarSystem {
    pub fn new(config: &OrreryConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: &OrreryConfig, clock: Box<dyn Clock>) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let scene = build_scene(&mut rng);
        let (width, height) = config.window_size;
        let viewport = Viewport::new(width, height, config.hover_fraction);
        let camera = camera_from_setup(&config.camera, viewport.aspect());

        log::debug!(
            "Built scene: {} nodes, {} bodies, {} free objects",
            scene.graph.len(),
            scene.bodies.len(),
            scene.free_objects.len()
        );

        Self {
            graph: scene.graph,
            bodies: scene.bodies,
            free_objects: scene.free_objects,
            interaction: InteractionState::default(),
            description: None,
            viewport,
            camera,
            free_motion: config.free_motion.clone(),
            resume_policy: config.resume_policy,
            rng,
            clock,
            frame_count: 0,
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|body| body.name == name)
    }

    pub fn free_objects(&self) -> &[FreeMovingObject] {
        &self.free_objects
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn hovered_body(&self) -> Option<&Body> {
        self.interaction
            .hovered_body()
            .map(|index| &self.bodies[index])
    }

    pub fn description(&self) -> Option<&DescriptionOverlay> {
        self.description.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            graph: &self.graph,
            camera: &self.camera,
            description: self.description.as_ref(),
        }
    }

    /// One animation step without presenting
    pub fn advance(&mut self) {
        if !self.interaction.is_suspended() {
            advance_bodies(&mut self.graph, &self.bodies);
        }

        let now_ms = self.clock.now_ms();
        advance_free_objects(
            &mut self.free_objects,
            now_ms,
            &self.free_motion,
            &mut self.rng,
        );
        self.sync_free_object_nodes();
        self.frame_count += 1;
    }

    /// Resolves the pointer to a body and applies the hover side effects
    pub fn handle_pointer(&mut self, x: f32, y: f32) -> PointerOutcome {
        let ray = self.viewport.ray_through(x, y, &self.camera);
        let hit = pick_body(&self.graph, &self.bodies, &ray);
        let outcome =
            PointerOutcome::classify(self.interaction.hovered_body(), hit.map(|target| target.body));

        match outcome {
            PointerOutcome::Idle | PointerOutcome::Stayed(_) => {}
            PointerOutcome::Entered(body) => {
                log::debug!("Hover entered {}", self.bodies[body].name);
            }
            PointerOutcome::Switched { from, to } => {
                self.reset_scale(from);
                log::debug!(
                    "Hover moved from {} to {}",
                    self.bodies[from].name,
                    self.bodies[to].name
                );
            }
            PointerOutcome::Left(body) => {
                self.reset_scale(body);
                self.resume_free_objects();
                log::debug!("Hover left {}", self.bodies[body].name);
            }
        }

        self.interaction.hovered = hit;
        match hit {
            Some(target) => {
                self.apply_hover_scale(target.body);
                self.freeze_free_objects();
                self.description = Some(self.overlay_for(target));
            }
            None => self.description = None,
        }
        self.sync_free_object_nodes();
        outcome
    }

    /// Applies a window resize. Returns false when the size was ignored.
    pub fn handle_resize(&mut self, width: u32, height: u32) -> bool {
        if !self.viewport.resize(width, height) {
            return false;
        }
        self.camera.resize_projection(width, height);
        if let Some(target) = self.interaction.hovered {
            self.apply_hover_scale(target.body);
            self.description = Some(self.overlay_for(target));
        }
        true
    }

    fn apply_hover_scale(&mut self, body: usize) {
        let body = &self.bodies[body];
        let scale = hover_scale(body.base_radius, self.viewport.target_size());
        self.graph.node_mut(body.mesh).scale = scale;
    }

    fn reset_scale(&mut self, body: usize) {
        self.graph.node_mut(self.bodies[body].mesh).scale = 1.0;
    }

    fn freeze_free_objects(&mut self) {
        for object in self.free_objects.iter_mut() {
            object.freeze();
        }
    }

    fn resume_free_objects(&mut self) {
        for object in self.free_objects.iter_mut() {
            object.speed = match self.resume_policy {
                ResumePolicy::Reroll(range) => range.sample(&mut self.rng),
                ResumePolicy::Resume if object.resume_speed > 0.0 => object.resume_speed,
                ResumePolicy::Resume => object.speed_range.sample(&mut self.rng),
            };
        }
    }

    fn overlay_for(&self, target: HoverTarget) -> DescriptionOverlay {
        let body = &self.bodies[target.body];
        DescriptionOverlay {
            body_name: body.name,
            text: body.description_text(),
            position: self.viewport.description_anchor(target.point, &self.camera),
        }
    }

    fn sync_free_object_nodes(&mut self) {
        for object in &self.free_objects {
            let node = self.graph.node_mut(object.node);
            node.translation = object.position;
            node.visible = object.visible;
        }
    }
}

impl Simulation for SolarSystem {
    fn on_frame(&mut self, target: &mut dyn FrameTarget) {
        self.advance();
        self.camera.update_view_proj();
        log::trace!("Frame {}", self.frame_count);
        target.present(self.frame_view());
    }

    fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.handle_pointer(x, y);
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.handle_resize(width, height);
    }

    fn name(&self) -> &str {
        "Solar System"
    }
}

pub fn camera_from_setup(setup: &CameraSetup, aspect: f32) -> OrbitCamera {
    OrbitCamera::looking_at(Vector3::from(setup.eye), Vector3::from(setup.target), aspect)
        .with_lens(Deg(setup.fov_degrees), setup.znear, setup.zfar)
        .with_distance_bounds(setup.min_distance, setup.max_distance)
}
