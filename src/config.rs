//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bintree/bintree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `BINTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::builder::{DEFAULT_NULL_TOKEN, DEFAULT_SEPARATOR};
use crate::domain::{TraversalOrder, TreeBuilder};

pub const ENV_PREFIX: &str = "BINTREE";

/// Errors while loading or rendering settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("environment: {0}")]
    Environment(#[from] config::ConfigError),

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("render settings: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Effective settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal order used when a command does not name one
    pub order: TraversalOrder,
    /// Token separating slots in a level-order description
    pub separator: String,
    /// Token marking an absent slot
    pub null_token: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            order: TraversalOrder::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
            null_token: DEFAULT_NULL_TOKEN.to_string(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub order: Option<TraversalOrder>,
    pub separator: Option<String>,
    pub null_token: Option<String>,
}

/// Get the XDG config directory for bintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bintree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        let global = global_config_path().filter(|path| path.exists());
        Self::load_layers(global.as_deref(), config_file, None)
    }

    /// Load from explicit layers.
    ///
    /// `env` replaces the process environment when given, keys carry the
    /// `BINTREE_` prefix.
    #[instrument(level = "debug")]
    pub fn load_layers(
        global: Option<&Path>,
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        for path in [global, config_file].into_iter().flatten() {
            let raw = load_raw_settings(path)?;
            debug!(path = %path.display(), "config layer applied");
            current = current.merge_with(&raw);
        }

        current.apply_env_overrides(env)
    }

    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            order: overlay.order.unwrap_or(self.order),
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            null_token: overlay
                .null_token
                .clone()
                .unwrap_or_else(|| self.null_token.clone()),
        }
    }

    /// Apply BINTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut self, env: Option<Map<String, String>>) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?;

        if let Ok(val) = config.get_string("order") {
            self.order = val.parse().map_err(|e: crate::domain::TreeError| {
                SettingsError::InvalidValue {
                    key: "order".to_string(),
                    message: e.to_string(),
                }
            })?;
        }
        if let Ok(val) = config.get_string("separator") {
            self.separator = val;
        }
        if let Ok(val) = config.get_string("null_token") {
            self.null_token = val;
        }

        if self.separator.is_empty() {
            return Err(SettingsError::InvalidValue {
                key: "separator".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(self)
    }

    /// Tree builder honouring separator and null token.
    pub fn builder(&self) -> TreeBuilder {
        TreeBuilder::new()
            .with_separator(self.separator.as_str())
            .with_null_token(self.null_token.as_str())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
