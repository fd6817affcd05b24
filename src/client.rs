//! HTTP client that attaches a Globus bearer token to every request.

use reqwest::header::CONTENT_LENGTH;
use reqwest::{Body, Client, Response};
use tracing::debug;

use crate::auth::Authenticator;
use crate::config::Config;
use crate::error::{GlobusError, Result};

/// Build an authenticated client for the Globus token endpoint.
///
/// No network I/O happens here; the token is fetched on the first request.
pub fn build_client(config: Config) -> GlobusClient {
    GlobusClient::new(Authenticator::new(config))
}

/// Authenticated HTTP client.
#[derive(Clone)]
pub struct GlobusClient {
    auth: Authenticator,
    http: Client,
}

impl GlobusClient {
    /// Create a new GlobusClient.
    pub fn new(auth: Authenticator) -> Self {
        Self {
            auth,
            http: Client::new(),
        }
    }

    /// Create a client that authenticates against a custom token endpoint.
    pub fn with_token_url(config: Config, token_url: impl Into<String>) -> Self {
        Self::new(Authenticator::with_token_url(config, token_url))
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.auth
    }

    /// Issue an authenticated GET.
    pub async fn get(&self, url: &str) -> Result<Response> {
        let token = self.auth.get_access_token().await?;
        debug!(%url, "GET");

        self.http
            .get(url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|source| GlobusError::Request {
                url: url.to_string(),
                source,
            })
    }

    /// Issue an authenticated PUT with a body of exactly `content_length` bytes.
    pub async fn put(&self, url: &str, body: Body, content_length: u64) -> Result<Response> {
        let token = self.auth.get_access_token().await?;
        debug!(%url, content_length, "PUT");

        self.http
            .put(url)
            .bearer_auth(&token)
            .header(CONTENT_LENGTH, content_length)
            .body(body)
            .send()
            .await
            .map_err(|source| GlobusError::Request {
                url: url.to_string(),
                source,
            })
    }
}
