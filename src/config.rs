//! Configuration loading.
//!
//! ```toml
//! [output]
//! target = "pgsql"
//! line_ending = "lf"
//! indent = 2
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ShiftError, ShiftResult};
use crate::transpiler::{Dialect, EmitOptions, LineEnding};

pub const CONFIG_FILE: &str = "schemashift.toml";

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[output]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default target dialect when none is given on the command line.
    pub target: Option<String>,
    #[serde(default)]
    pub line_ending: LineEnding,
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    4
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            target: None,
            line_ending: LineEnding::default(),
            indent: default_indent(),
        }
    }
}

impl Config {
    /// Parse configuration text.
    pub fn from_toml(text: &str) -> ShiftResult<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| ShiftError::Config(e.to_string()))?;
        // Surface a bad dialect name at load time
        config.target()?;
        Ok(config)
    }

    /// Load from `path`, else the first existing default location, else defaults.
    pub fn load(path: Option<&Path>) -> ShiftResult<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::search_paths().into_iter().find(|p| p.is_file()),
        };
        match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                let text = std::fs::read_to_string(&path)?;
                Self::from_toml(&text)
            }
            None => Ok(Self::default()),
        }
    }

    /// `./schemashift.toml`, then `<config dir>/schemashift/config.toml`.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("schemashift").join("config.toml"));
        }
        paths
    }

    /// Configured target dialect, if any.
    pub fn target(&self) -> ShiftResult<Option<Dialect>> {
        self.output.target.as_deref().map(str::parse::<Dialect>).transpose()
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            line_ending: self.output.line_ending,
            indent: self.output.indent,
        }
    }
}
