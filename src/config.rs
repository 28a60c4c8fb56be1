//! Runtime configuration
//!
//! [`OrreryConfig`] gathers every tunable the application reads at startup.
//! Defaults reproduce the classic viewer; `with_*` methods and
//! [`OrreryConfig::from_env`] adjust it.

use std::ops::Range;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::gfx::resources::global_bindings::LightConfig;
use crate::simulation::registry::SpeedRange;

/// How frozen free-moving objects get their speed back when the hover ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResumePolicy {
    /// Draw a fresh speed from the range
    Reroll(SpeedRange),
    /// Restore the speed each object had before it was frozen
    Resume,
}

impl Default for ResumePolicy {
    fn default() -> Self {
        ResumePolicy::Reroll(SpeedRange::new(1.0, 2.0))
    }
}

/// Linear drift and respawn parameters for free-moving objects
#[derive(Debug, Clone, PartialEq)]
pub struct FreeMotionConfig {
    /// Objects whose x drops below this are respawned
    pub despawn_x: f32,
    pub respawn_x: Range<f32>,
    pub respawn_y: Range<f32>,
    pub respawn_z: Range<f32>,
    /// Peak y displacement per tick
    pub oscillation_amplitude: f32,
    /// Radians per millisecond of wall-clock time
    pub oscillation_frequency: f64,
}

impl Default for FreeMotionConfig {
    fn default() -> Self {
        Self {
            despawn_x: -100.0,
            respawn_x: 100.0..300.0,
            respawn_y: -10.0..10.0,
            respawn_z: -10.0..10.0,
            oscillation_amplitude: 0.01,
            oscillation_frequency: 0.001,
        }
    }
}

/// Initial camera placement and lens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSetup {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            eye: [-90.0, 140.0, 140.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            min_distance: 20.0,
            max_distance: 800.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrreryConfig {
    /// Directory holding the image assets
    pub asset_dir: PathBuf,
    pub window_size: (u32, u32),
    pub title: String,
    pub vsync: bool,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Hover target diagonal as a fraction of the smaller window side
    pub hover_fraction: f32,
    pub free_motion: FreeMotionConfig,
    pub resume_policy: ResumePolicy,
    pub camera: CameraSetup,
    pub light: LightConfig,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets/img"),
            window_size: (1200, 800),
            title: "Orrery".to_string(),
            vsync: true,
            seed: None,
            hover_fraction: 0.25,
            free_motion: FreeMotionConfig::default(),
            resume_policy: ResumePolicy::default(),
            camera: CameraSetup::default(),
            light: LightConfig::default(),
        }
    }
}

impl OrreryConfig {
    pub fn with_asset_dir(mut self, asset_dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = asset_dir.into();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_hover_fraction(mut self, fraction: f32) -> Self {
        self.hover_fraction = fraction;
        self
    }

    pub fn with_free_motion(mut self, free_motion: FreeMotionConfig) -> Self {
        self.free_motion = free_motion;
        self
    }

    pub fn with_resume_policy(mut self, policy: ResumePolicy) -> Self {
        self.resume_policy = policy;
        self
    }

    pub fn with_camera(mut self, camera: CameraSetup) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_light(mut self, light: LightConfig) -> Self {
        self.light = light;
        self
    }

    /// Defaults with `ORRERY_*` environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = lookup("ORRERY_ASSET_DIR") {
            self.asset_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup("ORRERY_SEED") {
            let seed = value.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                key: "ORRERY_SEED",
                value: value.clone(),
                reason: e.to_string(),
            })?;
            self.seed = Some(seed);
        }
        if let Some(value) = lookup("ORRERY_VSYNC") {
            self.vsync = parse_flag("ORRERY_VSYNC", &value)?;
        }
        if let Some(value) = lookup("ORRERY_HOVER_FRACTION") {
            self.hover_fraction = parse_fraction("ORRERY_HOVER_FRACTION", &value)?;
        }
        Ok(self)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_fraction(key: &'static str, value: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    };
    let fraction = value
        .trim()
        .parse::<f32>()
        .map_err(|e| invalid(e.to_string()))?;
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(invalid("must be in (0, 1]".to_string()));
    }
    Ok(fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_classic_viewer() {
        let config = OrreryConfig::default();
        assert_eq!(config.window_size, (1200, 800));
        assert_eq!(config.hover_fraction, 0.25);
        assert_eq!(config.camera.eye, [-90.0, 140.0, 140.0]);
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.free_motion.despawn_x, -100.0);
        assert_eq!(config.free_motion.respawn_x, 100.0..300.0);
        assert_eq!(
            config.resume_policy,
            ResumePolicy::Reroll(SpeedRange::new(1.0, 2.0))
        );
        assert_eq!(config.light.range, 300.0);
        assert_eq!(config.light.intensity, 2.0);
    }

    #[test]
    fn test_overrides_apply() {
        let config = OrreryConfig::default()
            .apply_overrides(lookup_from(&[
                ("ORRERY_ASSET_DIR", "/tmp/textures"),
                ("ORRERY_SEED", "42"),
                ("ORRERY_VSYNC", "off"),
                ("ORRERY_HOVER_FRACTION", "0.5"),
            ]))
            .unwrap();
        assert_eq!(config.asset_dir, PathBuf::from("/tmp/textures"));
        assert_eq!(config.seed, Some(42));
        assert!(!config.vsync);
        assert_eq!(config.hover_fraction, 0.5);
    }

    #[test]
    fn test_missing_overrides_keep_defaults() {
        let config = OrreryConfig::default()
            .apply_overrides(lookup_from(&[]))
            .unwrap();
        assert_eq!(config.asset_dir, PathBuf::from("assets/img"));
        assert_eq!(config.seed, None);
        assert!(config.vsync);
    }

    #[test]
    fn test_bad_overrides_fail() {
        let seed = OrreryConfig::default().apply_overrides(lookup_from(&[("ORRERY_SEED", "-1")]));
        assert!(matches!(
            seed,
            Err(ConfigError::InvalidValue { key: "ORRERY_SEED", .. })
        ));

        let vsync = OrreryConfig::default().apply_overrides(lookup_from(&[("ORRERY_VSYNC", "maybe")]));
        assert!(vsync.is_err());

        let fraction =
            OrreryConfig::default().apply_overrides(lookup_from(&[("ORRERY_HOVER_FRACTION", "2")]));
        assert!(fraction.is_err());
    }

    #[test]
    fn test_builders_chain() {
        let config = OrreryConfig::default()
            .with_seed(7)
            .with_window_size(640, 480)
            .with_resume_policy(ResumePolicy::Resume);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.window_size, (640, 480));
        assert_eq!(config.resume_policy, ResumePolicy::Resume);
    }
}
