//! Application configuration for sourcelens.
//!
//! User config lives at `~/.sourcelens/sourcelens.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SourceLensError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "sourcelens.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".sourcelens";

// ---------------------------------------------------------------------------
// Config structs (matching sourcelens.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input/output locations.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Source list CSV (one row per requested article pair).
    #[serde(default = "default_sources_file")]
    pub sources_file: String,

    /// Domain → bias/factuality table CSV.
    #[serde(default = "default_bias_table_file")]
    pub bias_table_file: String,

    /// Directory holding previously downloaded raw article pages
    /// (`wikipedia_raw_<index>.html`, `grokipedia_raw_<index>.html`).
    #[serde(default = "default_raw_dir")]
    pub raw_dir: String,

    /// Directory artifacts are written to.
    #[serde(default = "default_outputs_dir")]
    pub outputs_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources_file: default_sources_file(),
            bias_table_file: default_bias_table_file(),
            raw_dir: default_raw_dir(),
            outputs_dir: default_outputs_dir(),
        }
    }
}

fn default_sources_file() -> String {
    "data/sources.csv".into()
}
fn default_bias_table_file() -> String {
    "data/mbfc.csv".into()
}
fn default_raw_dir() -> String {
    "data/raw".into()
}
fn default_outputs_dir() -> String {
    "data/outputs".into()
}

// ---------------------------------------------------------------------------
// Runtime paths (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Resolved input/output locations for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunPaths {
    /// Source list CSV.
    pub sources_file: PathBuf,
    /// Bias table CSV.
    pub bias_table_file: PathBuf,
    /// Raw article page directory.
    pub raw_dir: PathBuf,
    /// Artifact output directory.
    pub outputs_dir: PathBuf,
}

impl From<&AppConfig> for RunPaths {
    fn from(config: &AppConfig) -> Self {
        Self {
            sources_file: PathBuf::from(&config.paths.sources_file),
            bias_table_file: PathBuf::from(&config.paths.bias_table_file),
            raw_dir: PathBuf::from(&config.paths.raw_dir),
            outputs_dir: PathBuf::from(&config.paths.outputs_dir),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.sourcelens/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SourceLensError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.sourcelens/sourcelens.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SourceLensError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        SourceLensError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SourceLensError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SourceLensError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SourceLensError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
