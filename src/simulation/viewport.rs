//! Window size bookkeeping and pixel/world conversions

use cgmath::Vector3;

use crate::gfx::camera::OrbitCamera;
use crate::gfx::picking::{screen_to_ndc, screen_to_ray, world_to_screen, Ray};

/// Horizontal offset of the description panel from the hit point, in pixels
pub const DESCRIPTION_OFFSET_X: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    hover_fraction: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, hover_fraction: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            hover_fraction,
        }
    }

    /// Applies a new size. Zero-sized requests (minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Bounding-box diagonal a hovered body is scaled to
    pub fn target_size(&self) -> f32 {
        self.width.min(self.height) as f32 * self.hover_fraction
    }

    pub fn to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        screen_to_ndc((x, y), self.size())
    }

    pub fn ray_through(&self, x: f32, y: f32, camera: &OrbitCamera) -> Ray {
        screen_to_ray((x, y), self.size(), camera)
    }

    pub fn project(&self, point: Vector3<f32>, camera: &OrbitCamera) -> Option<[f32; 2]> {
        world_to_screen(point, self.size(), camera).map(|(x, y)| [x, y])
    }

    /// Top-left corner of the description panel for a hit at `point`
    pub fn description_anchor(&self, point: Vector3<f32>, camera: &OrbitCamera) -> [f32; 2] {
        let [x, y] = self.project(point, camera).unwrap_or([0.0, 0.0]);
        let (width, height) = self.size();
        [
            (x - DESCRIPTION_OFFSET_X).clamp(0.0, width),
            y.clamp(0.0, height),
        ]
    }
}
