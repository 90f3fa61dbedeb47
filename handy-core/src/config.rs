//! # Engine Configuration
//!
//! Settings handed to a [SketchyEngine](crate::engine::SketchyEngine) when a
//! sketchy surface is set up.
//!
//! Configuration can be built programmatically, loaded from a TOML file, or
//! taken from the environment:
//!
//! ```toml
//! [engine]
//! hachure_angle = -41.0
//! hachure_perturbation_angle = 5.0
//! is_handy = true
//! roughness = 1.0
//! seed = 1234
//! ```
//!
//! ## Environment Variables
//!
//! - `HANDY_CONFIG`: Path to an engine configuration file
//! - `HANDY_ROUGHNESS`: Overrides the roughness
//! - `HANDY_SEED`: Overrides the random seed
//! - `HANDY_DISABLED`: When set to a true value, turns sketchy rendering off

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{HandyError, HandyResult};

/// Settings consumed by sketchy engines.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Angle of hachure fill lines, in degrees. Read by engines that hachure.
    pub hachure_angle: f32,
    /// Maximum random deviation of the hachure angle, in degrees. Read by
    /// engines that hachure.
    pub hachure_perturbation_angle: f32,
    /// Whether primitives are perturbed at all.
    pub is_handy: bool,
    /// Scale of the random perturbation. `0.0` draws exact geometry.
    pub roughness: f32,
    /// Fixed random seed, for reproducible output.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hachure_angle: -41.0,
            hachure_perturbation_angle: 5.0,
            is_handy: true,
            roughness: 1.0,
            seed: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineConfig,
}

impl EngineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hachure angle in degrees.
    pub fn with_hachure_angle(mut self, degrees: f32) -> Self {
        self.hachure_angle = degrees;
        self
    }

    /// Set the hachure perturbation angle in degrees.
    pub fn with_hachure_perturbation_angle(mut self, degrees: f32) -> Self {
        self.hachure_perturbation_angle = degrees;
        self
    }

    /// Turn perturbation on or off.
    pub fn with_handy(mut self, is_handy: bool) -> Self {
        self.is_handy = is_handy;
        self
    }

    /// Set the roughness.
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a configuration from TOML text with an `[engine]` table.
    pub fn from_toml(content: &str) -> HandyResult<Self> {
        toml::from_str::<ConfigFile>(content)
            .map(|file| file.engine)
            .map_err(|e| HandyError::config_parse(None, e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> HandyResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        toml::from_str::<ConfigFile>(&content)
            .map(|file| file.engine)
            .map_err(|e| HandyError::config_parse(Some(path.to_path_buf()), e.to_string()))
    }

    /// Build a configuration from `HANDY_CONFIG` and the override variables,
    /// falling back to the defaults when nothing is set or loading fails.
    pub fn from_env_or_default() -> Self {
        let mut config = match env::var("HANDY_CONFIG") {
            Ok(path) => Self::from_file(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring engine config {}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// Apply `HANDY_*` overrides taken from `lookup`.
    ///
    /// Values that fail to parse are logged and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("HANDY_ROUGHNESS") {
            match value.trim().parse::<f32>() {
                Ok(roughness) => self.roughness = roughness,
                Err(_) => log::warn!("HANDY_ROUGHNESS={} is not a number", value),
            }
        }
        if let Some(value) = lookup("HANDY_SEED") {
            match value.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("HANDY_SEED={} is not an unsigned integer", value),
            }
        }
        if let Some(value) = lookup("HANDY_DISABLED") {
            let disabled = matches!(
                value.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
            if disabled {
                log::debug!("HANDY_DISABLED={} - sketchy rendering turned off", value);
                self.is_handy = false;
            }
        }
    }
}
