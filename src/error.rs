//! Custom error types for appatlas

use thiserror::Error;

/// Main error type for appatlas operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error came from the network layer (timeout, DNS, refused, bad status)
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Fetch(_))
    }
}

/// Result type alias for appatlas
pub type Result<T> = std::result::Result<T, Error>;
