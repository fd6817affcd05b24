//! Error types for the globus-http crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::transfer::Direction;

/// Broad classification of a [`GlobusError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Auth,
    Transfer,
    Io,
    Argument,
}

/// Errors that can occur while authenticating or transferring a file.
#[derive(Error, Debug)]
pub enum GlobusError {
    #[error("failed to read config file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("token request failed")]
    TokenRequest(#[source] reqwest::Error),

    #[error("token endpoint rejected credentials ({status}): {error}{}", describe(.description))]
    TokenRejected {
        status: u16,
        error: String,
        description: Option<String>,
    },

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to download {url}: got status code: {status}")]
    DownloadStatus { url: String, status: u16 },

    #[error(
        "failed to upload to {url}: got status code {status}, response: {body}{}",
        body_read_failure(.body_error)
    )]
    UploadStatus {
        url: String,
        status: u16,
        body: String,
        body_error: Option<reqwest::Error>,
    },

    #[error("failed to read response body from {url}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to open destination {} for writing", .path.display())]
    DestinationCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save {url} as {}", .path.display())]
    Save {
        url: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open source {} for reading", .path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read source {} stats", .path.display())]
    SourceStat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing source and/or destination for {0}")]
    MissingOperands(Direction),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

impl GlobusError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigRead { .. } | Self::ConfigParse { .. } => ErrorKind::Config,
            Self::TokenRequest(_) | Self::TokenRejected { .. } => ErrorKind::Auth,
            Self::Request { .. }
            | Self::DownloadStatus { .. }
            | Self::UploadStatus { .. }
            | Self::BodyRead { .. } => ErrorKind::Transfer,
            Self::DestinationCreate { .. }
            | Self::Save { .. }
            | Self::SourceOpen { .. }
            | Self::SourceStat { .. } => ErrorKind::Io,
            Self::MissingOperands(_) | Self::UnknownCommand(_) => ErrorKind::Argument,
        }
    }
}

fn describe(description: &Option<String>) -> String {
    match description {
        Some(d) => format!(" ({})", d),
        None => String::new(),
    }
}

fn body_read_failure(err: &Option<reqwest::Error>) -> String {
    match err {
        Some(e) => format!(", body read error: {}", e),
        None => String::new(),
    }
}

/// Result type alias for GlobusError.
pub type Result<T> = std::result::Result<T, GlobusError>;
