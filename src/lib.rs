//! globus-http - Download and upload single files through the Globus HTTP API.
//!
//! This library provides functionality to:
//! - Load client credentials from a TOML config file
//! - Authenticate with the OAuth2 client-credentials grant against Globus Auth
//! - Download a URL to a local file, or upload a local file to a URL
//!
//! # Example
//!
//! ```no_run
//! use globus_http::{build_client, download, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_file("config.toml")?;
//!     let client = build_client(config);
//!
//!     let bytes = download(
//!         &client,
//!         "https://g-123456.12345.1234.data.globus.org/filename.txt",
//!         "filename.txt",
//!     )
//!     .await?;
//!     println!("downloaded {} bytes", bytes);
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod transfer;

// Re-exports for convenience
pub use auth::Authenticator;
pub use cli::BuildInfo;
pub use client::{build_client, GlobusClient};
pub use config::Config;
pub use error::{ErrorKind, GlobusError, Result};
pub use transfer::{download, upload, Direction, TransferRequest};
