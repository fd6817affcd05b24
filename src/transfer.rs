//! Single-file download and upload over an authenticated client.

use std::fmt;
use std::path::Path;

use futures::StreamExt;
use reqwest::{Body, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::info;

use crate::client::GlobusClient;
use crate::error::{GlobusError, Result};

/// Which way the bytes flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Download,
    Upload,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Download => write!(f, "download"),
            Direction::Upload => write!(f, "upload"),
        }
    }
}

/// One transfer, built from the command-line operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferRequest {
    /// GET `source` (a URL) into `destination` (a local path).
    Download { source: String, destination: String },
    /// PUT `source` (a local path) to `destination` (a URL).
    Upload { source: String, destination: String },
}

impl TransferRequest {
    /// Build a request, failing if either operand is missing.
    pub fn from_operands(
        direction: Direction,
        source: Option<String>,
        destination: Option<String>,
    ) -> Result<Self> {
        let (Some(source), Some(destination)) = (source, destination) else {
            return Err(GlobusError::MissingOperands(direction));
        };

        Ok(match direction {
            Direction::Download => TransferRequest::Download {
                source,
                destination,
            },
            Direction::Upload => TransferRequest::Upload {
                source,
                destination,
            },
        })
    }

    pub fn direction(&self) -> Direction {
        match self {
            TransferRequest::Download { .. } => Direction::Download,
            TransferRequest::Upload { .. } => Direction::Upload,
        }
    }

    /// Run the transfer, returning the number of bytes moved.
    pub async fn execute(&self, client: &GlobusClient) -> Result<u64> {
        match self {
            TransferRequest::Download {
                source,
                destination,
            } => download(client, source, destination).await,
            TransferRequest::Upload {
                source,
                destination,
            } => upload(client, source, destination).await,
        }
    }
}

/// Download `source_url` to a local file.
///
/// The destination is only created once the server has answered 200 OK.
pub async fn download<P: AsRef<Path>>(
    client: &GlobusClient,
    source_url: &str,
    destination: P,
) -> Result<u64> {
    let destination = destination.as_ref();
    let response = client.get(source_url).await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(GlobusError::DownloadStatus {
            url: source_url.to_string(),
            status: status.as_u16(),
        });
    }

    let mut file = File::create(destination)
        .await
        .map_err(|source| GlobusError::DestinationCreate {
            path: destination.to_path_buf(),
            source,
        })?;
    let save_error = |source: std::io::Error| GlobusError::Save {
        url: source_url.to_string(),
        path: destination.to_path_buf(),
        source,
    };

    // Stream to file
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| GlobusError::BodyRead {
            url: source_url.to_string(),
            source,
        })?;
        file.write_all(&chunk).await.map_err(save_error)?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(save_error)?;

    info!(url = %source_url, path = %destination.display(), bytes = written, "download complete");
    Ok(written)
}

/// Upload a local file to `destination_url` with an exact `Content-Length`.
pub async fn upload<P: AsRef<Path>>(
    client: &GlobusClient,
    source: P,
    destination_url: &str,
) -> Result<u64> {
    let source = source.as_ref();
    let file = File::open(source)
        .await
        .map_err(|err| GlobusError::SourceOpen {
            path: source.to_path_buf(),
            source: err,
        })?;
    let file_size = file
        .metadata()
        .await
        .map_err(|err| GlobusError::SourceStat {
            path: source.to_path_buf(),
            source: err,
        })?
        .len();

    let body = Body::wrap_stream(ReaderStream::new(file));
    let response = client.put(destination_url, body, file_size).await?;

    let status = response.status();
    if status != StatusCode::OK {
        let (body, body_error) = match response.bytes().await {
            Ok(bytes) => (String::from_utf8_lossy(&bytes).into_owned(), None),
            Err(err) => (String::new(), Some(err)),
        };
        return Err(GlobusError::UploadStatus {
            url: destination_url.to_string(),
            status: status.as_u16(),
            body,
            body_error,
        });
    }

    info!(path = %source.display(), url = %destination_url, bytes = file_size, "upload complete");
    Ok(file_size)
}
