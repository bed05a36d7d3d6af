//! Slider configuration
//!
//! Loaded from `<config_dir>/slider/config.toml` when present, or from an
//! explicit `--config` path. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Shortest accepted quiescence window
pub const MIN_DEBOUNCE_MS: u64 = 1;

/// Longest accepted quiescence window (10 minutes)
pub const MAX_DEBOUNCE_MS: u64 = 600_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
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

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SliderConfig {
    pub emitter: EmitterConfig,
    pub control: ControlConfig,
}

/// `[emitter]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Selector used to resolve the observed control
    pub selector: String,

    /// Quiescence window in milliseconds
    pub debounce_ms: u64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            selector: "input#slider".to_string(),
            debounce_ms: 2000,
        }
    }
}

/// `[control]` section: the element hosted by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub tag: String,
    pub id: String,
    pub initial_value: String,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            tag: "input".to_string(),
            id: "slider".to_string(),
            initial_value: "50".to_string(),
        }
    }
}

impl SliderConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&self.emitter.debounce_ms) {
            return Err(ConfigError::Invalid(format!(
                "emitter.debounce_ms must be between {} and {} (got {})",
                MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS, self.emitter.debounce_ms
            )));
        }
        if self.emitter.selector.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "emitter.selector must not be empty".to_string(),
            ));
        }
        if self.control.id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "control.id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> String {
        // Plain structs of strings and integers always serialize
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Default config file location
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("slider").join("config.toml"))
}

/// Load configuration
///
/// An explicit path must exist. Without one, the default location is used
/// if present, otherwise built-in defaults apply.
pub fn load(explicit: Option<&Path>) -> Result<SliderConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_file_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(SliderConfig::default()),
        },
    };

    let config = load_from(&path)?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn load_from(path: &Path) -> Result<SliderConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: SliderConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    config.validate()?;
    Ok(config)
}

/// Example configuration file
pub fn example_config() -> &'static str {
    r#"# Slider configuration

[emitter]
# Control to observe
selector = "input#slider"
# Quiet period before a value settles (1-600000 ms)
debounce_ms = 2000

[control]
# Element hosted by the CLI; each stdin line becomes a new value
tag = "input"
id = "slider"
initial_value = "50"
"#
}
