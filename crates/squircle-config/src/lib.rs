//! Resquircle configuration.
//!
//! Settings live in `resquircle.toml`; any of them can be overridden through
//! `RESQUIRCLE_*` environment variables without touching the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "resquircle.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SquircleConfig {
    pub geometry: GeometryConfig,
    pub shadow: ShadowConfig,
    pub display: DisplayConfig,
}

/// Path construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Smoothing used when a view does not set one, in `[0, 1]`
    pub corner_smoothing: f32,
    /// Memoize the last path per view role
    pub path_cache: bool,
    /// Flattening tolerance for tessellation, in pixels
    pub lyon_tolerance: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShadowConfig {
    /// Diagnostics categories, e.g. `shadow` or `all`
    pub diagnostics: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Device pixels per density-independent pixel
    pub dp_scale: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            corner_smoothing: 0.6,
            path_cache: true,
            lyon_tolerance: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { dp_scale: 1.0 }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl SquircleConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `resquircle.toml` in the current directory, or defaults when it is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Environment variables take precedence over file values. Unparseable
    /// numbers are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("RESQUIRCLE_CORNER_SMOOTHING") {
            if let Ok(s) = val.parse::<f32>() {
                self.geometry.corner_smoothing = s;
            }
        }
        if let Ok(val) = std::env::var("RESQUIRCLE_PATH_CACHE") {
            self.geometry.path_cache = env_flag(&val);
        }
        if let Ok(val) = std::env::var("RESQUIRCLE_LYON_TOLERANCE") {
            if let Ok(tol) = val.parse::<f32>() {
                self.geometry.lyon_tolerance = Some(tol);
            }
        }
        if let Ok(val) = std::env::var("RESQUIRCLE_DP_SCALE") {
            if let Ok(scale) = val.parse::<f32>() {
                self.display.dp_scale = scale;
            }
        }
        if let Ok(diagnostics) = std::env::var("RESQUIRCLE_DIAGNOSTICS") {
            self.shadow.diagnostics = Some(diagnostics);
        }
    }

    /// File (or defaults) first, then environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// Configured smoothing clamped to `[0, 1]`; NaN falls back to the default.
    pub fn corner_smoothing(&self) -> f32 {
        let s = self.geometry.corner_smoothing;
        if s.is_nan() {
            GeometryConfig::default().corner_smoothing
        } else {
            s.clamp(0.0, 1.0)
        }
    }

    /// Configured scale, or 1 when it is not a positive finite number.
    pub fn dp_scale(&self) -> f32 {
        let scale = self.display.dp_scale;
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}
