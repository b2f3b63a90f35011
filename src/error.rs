use std::path::PathBuf;

use thiserror::Error;

/// A word list could not be read, or holds nothing usable.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config file {} contains no entries", .path.display())]
    Empty { path: PathBuf },
}

/// Target URL rejected. Deliberately carries no detail about which rule failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid URL")]
pub struct ValidationError;

/// Transport-level failure of a single probe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProbeError::Timeout
        } else if e.is_connect() {
            ProbeError::Connect(e.to_string())
        } else {
            ProbeError::Request(e.to_string())
        }
    }
}
