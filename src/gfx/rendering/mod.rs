//! Core rendering functionality
//!
//! Render pipelines, the per-frame render pass and the WGSL shaders they use.

pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
pub use render_engine::RenderEngine;
