use std::fmt;
use std::path::{Path, PathBuf};

use pinewood_debug_drawer::DebugDrawConfig;
use pinewood_graphics::DEFAULT_POOL_SIZE;
use pinewood_input::InputConfig;
use serde::Deserialize;

/// Demo configuration loaded from a TOML file.
///
/// Every table is optional:
///
/// ```toml
/// pool_bytes = 65536
///
/// [debug_draw]
/// max_boxes = 64
///
/// [input.recording]
/// path = "demos/assets/cont.m64"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Size of the per-frame graphics pool.
    pub pool_bytes: usize,
    pub debug_draw: DebugDrawConfig,
    pub input: InputConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pool_bytes: DEFAULT_POOL_SIZE,
            debug_draw: DebugDrawConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Errors from loading a [`DemoConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}
