use crate::config::{ColorMode, PathsConfig, Range};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Contents of `config.toml`; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathSettings {
    pub start: Option<u64>,
    pub stop: Option<u64>,
    pub count: Option<u64>,
    pub max_iterations: Option<i64>,
    pub stop_at_one: Option<bool>,
    pub odd_only: Option<bool>,
    pub n_spacing: Option<f32>,
    pub k_spacing: Option<f32>,
    pub y_delta: Option<f32>,
    pub animate: Option<bool>,
    pub frame_ms: Option<u64>,
    pub colors: Option<ColorMode>,
    pub tree: Option<bool>,
    pub tree_origin: Option<f32>,
    pub seed: Option<u64>,
}

impl Settings {
    /// Load from the user config dir. Problems are logged and defaults used.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::read(&path) {
            Ok(settings) => {
                log::debug!("loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("collatz-paths")
            .join("config.toml")
    }
}

impl PathSettings {
    /// Overwrite the fields of `config` that are set here
    pub fn apply(&self, config: &mut PathsConfig) {
        if let Some(start) = self.start {
            config.start = start;
        }
        // count wins if both are given
        if let Some(stop) = self.stop {
            config.range = Range::Stop(stop);
        }
        if let Some(count) = self.count {
            config.range = Range::Count(count);
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(stop_at_one) = self.stop_at_one {
            config.stop_at_one = stop_at_one;
        }
        if let Some(odd_only) = self.odd_only {
            config.odd_only = odd_only;
        }
        if let Some(n_spacing) = self.n_spacing {
            config.spacing.n_spacing = n_spacing;
        }
        if let Some(k_spacing) = self.k_spacing {
            config.spacing.k_spacing = k_spacing;
        }
        if let Some(y_delta) = self.y_delta {
            config.spacing.y_delta = y_delta;
        }
        if let Some(animate) = self.animate {
            config.animate = animate;
        }
        if let Some(frame_ms) = self.frame_ms {
            config.frame_time = Duration::from_millis(frame_ms);
        }
        if let Some(colors) = self.colors {
            config.color_mode = colors;
        }
        if let Some(tree) = self.tree {
            config.tree = tree;
        }
        if let Some(tree_origin) = self.tree_origin {
            config.tree_origin = tree_origin;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}
