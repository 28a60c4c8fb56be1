//! Error types for the orrery crate
//!
//! The simulation core is infallible. Everything that can fail lives at the
//! edges: asset loading, GPU setup and environment overrides.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a single image asset
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// GPU and surface failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create rendering surface")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open graphics device")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("failed to acquire surface texture")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("pipeline {pipeline} references unknown shader {shader}")]
    UnknownShader { pipeline: String, shader: String },
}

/// An environment override that could not be applied
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level error returned by [`crate::app::OrreryApp::run`]
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop error")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message_names_key() {
        let error = ConfigError::InvalidValue {
            key: "ORRERY_SEED",
            value: "abc".to_string(),
            reason: "expected an unsigned integer".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ORRERY_SEED"));
        assert!(message.contains("\"abc\""));
    }

    #[test]
    fn test_asset_error_keeps_source() {
        let error = AssetError::Io {
            path: PathBuf::from("assets/img/sun.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("sun.jpg"));
    }
}
