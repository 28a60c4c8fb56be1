//! Core simulation traits
//!
//! The application drives a [`Simulation`] through three callbacks and hands
//! it a [`FrameTarget`] to present into. Everything is synchronous; no
//! callback blocks or suspends.

use super::entities::DescriptionOverlay;
use super::scene_graph::SceneGraph;
use crate::gfx::camera::OrbitCamera;

/// Read-only snapshot of what should be on screen this frame
#[derive(Clone, Copy)]
pub struct FrameView<'a> {
    pub graph: &'a SceneGraph,
    pub camera: &'a OrbitCamera,
    pub description: Option<&'a DescriptionOverlay>,
}

/// Receives exactly one frame per [`Simulation::on_frame`] call
pub trait FrameTarget {
    fn present(&mut self, frame: FrameView<'_>);
}

/// Event-driven simulation interface
pub trait Simulation {
    /// Invoked once per display refresh. Advances the animation and presents one frame.
    fn on_frame(&mut self, target: &mut dyn FrameTarget);

    /// Invoked on every pointer move, in physical pixels
    fn on_pointer_move(&mut self, x: f32, y: f32);

    /// Invoked when the window is resized, in physical pixels
    fn on_resize(&mut self, width: u32, height: u32);

    /// Get simulation name for UI display
    fn name(&self) -> &str;
}
