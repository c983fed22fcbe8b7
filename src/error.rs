//! Error types for figma-fetch
//!
//! Fatal errors (`CredentialError`, `FetchError`, `ConfigError`) stop the run
//! with exit status 1. `DownloadError` is per-asset and only ever reported.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// No access token could be found in the environment or in any config file
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("could not find FIGMA_ACCESS_TOKEN (searched {} config file(s))", .searched.len())]
    NotFound { searched: Vec<PathBuf> },
}

/// The batch image-URL request failed as a whole
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The API answered 2xx but reported an error in the body
    #[error("Figma API error: {0}")]
    Api(String),

    #[error("failed to parse response: {0}")]
    Decode(String),
}

/// Invalid asset manifest or output configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no assets configured")]
    NoAssets,

    /// Filename is empty, absolute, or has more than one path component
    #[error("invalid asset filename {0:?}: must be a plain file name")]
    InvalidFilename(String),
}

/// Anything that stops a fetch run before or instead of the download loop
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0}")]
    Credential(#[from] CredentialError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("error fetching image URLs: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single asset download
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} for URL: {url}")]
    Status { status: StatusCode, url: String },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file not created: {}", .0.display())]
    NotCreated(PathBuf),
}
