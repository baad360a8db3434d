//! Configuration management for appatlas
//!
//! Handles loading, saving, and validating configuration from TOML files.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file name inside the base directory
pub const CONFIG_FILE_NAME: &str = "appatlas.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog scraping configuration
    #[serde(default)]
    pub scrape: ScrapeConfig,

    /// Dataset analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// Catalog scraping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Catalog page URL
    #[serde(default = "default_scrape_url")]
    pub url: String,

    /// Browser user agent string
    #[serde(default = "default_scrape_user_agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(default = "default_scrape_accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "default_scrape_timeout")]
    pub timeout_secs: u64,

    /// Where the raw response body is written (relative to the base dir)
    #[serde(default = "default_scrape_raw_output")]
    pub raw_output: String,

    /// Number of candidates shown in the scrape summary
    #[serde(default = "default_scrape_candidate_sample")]
    pub candidate_sample: usize,
}

/// Dataset analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// CSV dataset to analyze (relative to the base dir)
    #[serde(default = "default_analysis_input")]
    pub input: String,

    /// Directory for JSON results (relative to the base dir)
    #[serde(default = "default_analysis_output_dir")]
    pub output_dir: String,

    /// Minimum complexity score counted as "high complexity"
    #[serde(default = "default_high_complexity_threshold")]
    pub high_complexity_threshold: f64,

    /// Example names printed per taxonomy bucket
    #[serde(default = "default_taxonomy_examples")]
    pub taxonomy_examples: usize,
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Directory relative paths are resolved against
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: default_scrape_url(),
            user_agent: default_scrape_user_agent(),
            accept_language: default_scrape_accept_language(),
            timeout_secs: default_scrape_timeout(),
            raw_output: default_scrape_raw_output(),
            candidate_sample: default_scrape_candidate_sample(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: default_analysis_input(),
            output_dir: default_analysis_output_dir(),
            high_complexity_threshold: default_high_complexity_threshold(),
            taxonomy_examples: default_taxonomy_examples(),
        }
    }
}

impl Config {
    /// Default base directory (the working directory)
    pub fn default_base_dir() -> PathBuf {
        PathBuf::from(".")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join(CONFIG_FILE_NAME)
    }

    /// Initialize paths configuration
    fn init_paths(&mut self, base_dir: Option<PathBuf>) {
        let base = base_dir.unwrap_or_else(Self::default_base_dir);
        self.paths = PathsConfig {
            config_file: base.join(CONFIG_FILE_NAME),
            base_dir: base,
        };
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        let base = config_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        config.paths = PathsConfig {
            config_file: config_path.to_path_buf(),
            base_dir: base,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a base directory, falling back to defaults
    pub fn load_from(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        config.init_paths(base_dir);

        if config.paths.config_file.exists() {
            debug!("Loading config from {:?}", config.paths.config_file);
            let content = std::fs::read_to_string(&config.paths.config_file)?;
            let mut loaded: Config = toml::from_str(&content)?;
            loaded.paths = config.paths;
            config = loaded;
        } else {
            debug!("No config file found, using defaults");
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Resolve a configured path against the base directory
    pub fn resolve(&self, relative: &str) -> PathBuf {
        let path = Path::new(relative);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.paths.base_dir.join(path)
        }
    }

    /// Path of the raw page side file
    pub fn raw_output_path(&self) -> PathBuf {
        self.resolve(&self.scrape.raw_output)
    }

    /// Path of the dataset CSV
    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.analysis.input)
    }

    /// Directory for JSON results
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.analysis.output_dir)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scrape.url.trim().is_empty() {
            return Err(Error::Config("scrape.url must not be empty".to_string()));
        }

        if self.scrape.timeout_secs == 0 {
            return Err(Error::Config(
                "scrape.timeout_secs must be positive".to_string(),
            ));
        }

        let threshold = self.analysis.high_complexity_threshold;
        if !(0.0..=10.0).contains(&threshold) {
            return Err(Error::Config(
                "analysis.high_complexity_threshold must be between 0.0 and 10.0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scrape.timeout_secs, 10);
        assert_eq!(config.analysis.input, "data/raw/base44_apps.csv");
        assert_eq!(config.analysis.output_dir, "data/processed");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.init_paths(Some(tmp.path().to_path_buf()));
        config.analysis.taxonomy_examples = 5;

        config.save().unwrap();
        assert!(config.paths.config_file.exists());

        let loaded = Config::load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(loaded.analysis.taxonomy_examples, 5);
        assert_eq!(loaded.paths.base_dir, tmp.path());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[scrape]\ntimeout_secs = 3\n").unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.scrape.timeout_secs, 3);
        assert_eq!(loaded.scrape.raw_output, "raw_base44_page.html");
        assert_eq!(loaded.analysis.high_complexity_threshold, 7.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.scrape.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.scrape.timeout_secs = 10;
        assert!(config.validate().is_ok());

        config.analysis.high_complexity_threshold = 11.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_relative_to_base() {
        let mut config = Config::default();
        config.init_paths(Some(PathBuf::from("/srv/atlas")));
        assert_eq!(
            config.input_path(),
            PathBuf::from("/srv/atlas/data/raw/base44_apps.csv")
        );
        assert_eq!(config.resolve("/tmp/x.html"), PathBuf::from("/tmp/x.html"));
    }
}
