//! # Host Configuration
//!
//! Settings come from three layers, later ones winning:
//! built-in defaults, an optional JSON config file, command-line flags.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "mode": "sim",
//!   "script": "session.fkeys",
//!   "max_steps": 200,
//!   "scroll_delay_ms": 10,
//!   "viewport_rows": 24,
//!   "format": "plain",
//!   "banner": ["Welcome"]
//! }
//! ```
//!
//! Every field except `version` is optional. A relative `script` path is
//! resolved against the config file's directory.

use crate::runtime::{HostMode, HostRuntimeConfig};
use console_transcript::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Config file version this build understands
pub const CONFIG_VERSION: u32 = 1;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported config version: {found} (expected {})", CONFIG_VERSION)]
    UnsupportedVersion { found: u32 },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// On-disk configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<HostMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Vec<String>>,
}

impl ConfigFile {
    /// Parses and version-checks a config document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(text)?;
        if file.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: file.version,
            });
        }
        Ok(file)
    }

    /// Loads a config file, resolving its script path against the file's directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = read_file(path)?;
        let mut file = Self::from_json(&text)?;

        if let (Some(script), Some(dir)) = (&file.script, path.parent()) {
            if Path::new(script).is_relative() {
                file.script = Some(dir.join(script).to_string_lossy().into_owned());
            }
        }
        Ok(file)
    }

    /// Applies the fields that are set.
    ///
    /// `script` is a path and is left to `CliOverrides::resolve`, which reads
    /// whichever layer's path wins.
    pub fn apply(&self, config: &mut HostRuntimeConfig) -> Result<(), ConfigError> {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(ms) = self.scroll_delay_ms {
            config.scroll_delay = Duration::from_millis(ms);
        }
        if let Some(rows) = self.viewport_rows {
            config.viewport_rows = check_viewport_rows(rows)?;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(banner) = &self.banner {
            config.banner = Some(banner.clone());
        }
        Ok(())
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub config: Option<String>,
    pub mode: Option<HostMode>,
    pub script: Option<String>,
    pub max_steps: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl CliOverrides {
    /// Applies the flags that were given, except `script`
    pub fn apply(&self, config: &mut HostRuntimeConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
    }

    /// Builds the final configuration: defaults, then file, then flags.
    ///
    /// The script path is chosen across layers first; only the winner is read.
    pub fn resolve(&self) -> Result<HostRuntimeConfig, ConfigError> {
        let mut config = HostRuntimeConfig::default();
        let mut file_script = None;

        if let Some(path) = &self.config {
            let file = ConfigFile::load(Path::new(path))?;
            file.apply(&mut config)?;
            file_script = file.script;
        }
        self.apply(&mut config);

        if let Some(script) = self.script.as_ref().or(file_script.as_ref()) {
            config.script = Some(read_file(Path::new(script))?);
        }
        Ok(config)
    }
}

/// Parses a `--mode` value
pub fn parse_mode(value: &str) -> Result<HostMode, ConfigError> {
    match value.to_lowercase().as_str() {
        "sim" => Ok(HostMode::Sim),
        "interactive" | "tty" => Ok(HostMode::Interactive),
        _ => Err(ConfigError::InvalidValue {
            field: "mode",
            value: value.to_string(),
        }),
    }
}

/// Parses a `--format` value
pub fn parse_format(value: &str) -> Result<OutputFormat, ConfigError> {
    match value.to_lowercase().as_str() {
        "plain" | "text" => Ok(OutputFormat::Plain),
        "html" => Ok(OutputFormat::Html),
        _ => Err(ConfigError::InvalidValue {
            field: "format",
            value: value.to_string(),
        }),
    }
}

fn check_viewport_rows(rows: usize) -> Result<usize, ConfigError> {
    if rows == 0 {
        return Err(ConfigError::InvalidValue {
            field: "viewport_rows",
            value: rows.to_string(),
        });
    }
    Ok(rows)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })
}
