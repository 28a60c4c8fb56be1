//! # User Interface Module
//!
//! Dear ImGui overlay drawn on top of the 3D scene. The [`UiManager`] owns
//! the ImGui context and its winit/wgpu integration; [`description_panel`]
//! shows the text of the hovered body next to it.
//!
//! ## Input Handling
//!
//! Events ImGui wants to capture are not forwarded to the camera or to the
//! pointer interaction.

pub mod description_panel;
pub mod manager;

// Re-export main types
pub use description_panel::description_panel;
pub use manager::UiManager;
