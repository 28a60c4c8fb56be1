//! Orrery
//!
//! An interactive 3D solar system viewer built on wgpu and winit. Planets
//! revolve and spin around the sun, near-earth objects drift across the
//! scene, and hovering a planet pauses the system, enlarges the planet and
//! shows its description.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod simulation;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::OrreryApp;
pub use config::OrreryConfig;
pub use error::{AppError, AssetError, ConfigError, RenderError};
