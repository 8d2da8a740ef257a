//! Preview loop configuration stored in `meshloop.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::io::builder::default_build_command;
use crate::io::target::default_target_command;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "meshloop.toml";

/// Preview loop configuration (TOML).
///
/// Missing fields default to the platform build and target commands.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct MeshloopConfig {
    /// Stop after this many target runs. Unset means run until the target
    /// stops reporting settings.
    pub max_iterations: Option<u32>,

    pub build: BuildConfig,

    pub target: TargetConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildConfig {
    /// Command that rebuilds the target (e.g. `["make"]`).
    pub command: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: default_build_command(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TargetConfig {
    /// Target program followed by any fixed leading arguments.
    pub command: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            command: default_target_command(),
        }
    }
}

impl MeshloopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == Some(0) {
            return Err(anyhow!("max_iterations must be > 0"));
        }
        if self.build.command.is_empty() || self.build.command[0].trim().is_empty() {
            return Err(anyhow!("build.command must be a non-empty array"));
        }
        if self.target.command.is_empty() || self.target.command[0].trim().is_empty() {
            return Err(anyhow!("target.command must be a non-empty array"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `MeshloopConfig::default()`.
pub fn load_config(path: &Path) -> Result<MeshloopConfig> {
    if !path.exists() {
        let cfg = MeshloopConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MeshloopConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
