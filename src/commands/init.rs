//! Init command implementation

use crate::config::{Config, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::info;

/// Where `init` writes its config
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Directory relative paths resolve against (working directory if `None`)
    pub base_dir: Option<PathBuf>,
    /// Config file to write (`<base_dir>/appatlas.toml` if `None`)
    pub config_path: Option<PathBuf>,
    pub force: bool,
}

impl InitOptions {
    /// Options for an explicit `--config` path; its directory becomes the base
    pub fn for_config_path(config_path: PathBuf, force: bool) -> Self {
        let base_dir = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from);
        Self {
            base_dir,
            config_path: Some(config_path),
            force,
        }
    }
}

/// Write a default config file and return its path
pub fn cmd_init(options: InitOptions) -> Result<PathBuf> {
    let InitOptions {
        base_dir,
        config_path,
        force,
    } = options;

    let base = base_dir.unwrap_or_else(Config::default_base_dir);
    let config_path = config_path.unwrap_or_else(|| base.join(CONFIG_FILE_NAME));

    if config_path.exists() && !force {
        return Err(Error::AlreadyInitialized(config_path.display().to_string()));
    }

    let mut config = Config::default();
    config.paths.base_dir = base;
    config.paths.config_file = config_path.clone();
    config.save()?;

    info!("Initialized appatlas at {}", config_path.display());
    Ok(config_path)
}
