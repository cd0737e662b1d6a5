//! Locating and reading the CLI's TOML configuration.
//!
//! A file given with `--config` must exist. Without one, the first existing
//! file among [`discovered_paths`] is used, and defaults apply when there is
//! none.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use esparx_graph::{EsparxError, config::AppConfig};

/// Config file looked up relative to the working directory.
const LOCAL_CONFIG: &str = "esparx/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for EsparxError {
    fn from(err: ConfigError) -> Self {
        EsparxError::Config(err.to_string())
    }
}

/// Loads the configuration for a run.
///
/// # Errors
///
/// Returns [`EsparxError::Config`] if `explicit_path` does not exist or if
/// the selected file is not a valid configuration, and [`EsparxError::Io`]
/// if it cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, EsparxError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Using configuration given on the command line");
        return load_config_file(path);
    }

    match discovered_paths().into_iter().find(|path| path.exists()) {
        Some(path) => {
            info!(path:% = path.display(); "Using discovered configuration");
            load_config_file(&path)
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Candidate locations, in priority order: [`LOCAL_CONFIG`], then
/// `config.toml` in the platform's config directory for e-SparX.
fn discovered_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("org", "esparx", "esparx") {
        Some(dirs) => paths.push(dirs.config_dir().join("config.toml")),
        None => debug!("No platform config directory available"),
    }
    paths
}

fn load_config_file(path: &Path) -> Result<AppConfig, EsparxError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    debug!(config:?; "Configuration loaded");

    Ok(config)
}
