//! Client-credentials authentication against Globus Auth.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use reqwest::Client;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::Config;
use crate::error::{GlobusError, Result};
use crate::models::{OAuthErrorResponse, TokenResponse};

/// Globus Auth OAuth2 token endpoint.
pub const TOKEN_URL: &str = "https://auth.globus.org/v2/oauth2/token";

/// Tokens this close to expiry are treated as expired.
const EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Cached access token with expiration.
#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Option<SystemTime>,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at > SystemTime::now() + EXPIRY_BUFFER,
            None => true,
        }
    }
}

/// Obtains and caches access tokens using the client-credentials grant.
///
/// Nothing is fetched until [`Authenticator::get_access_token`] is called.
#[derive(Clone)]
pub struct Authenticator {
    config: Arc<Config>,
    token_url: String,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl Authenticator {
    /// Create a new authenticator for the Globus token endpoint.
    pub fn new(config: Config) -> Self {
        Self::with_token_url(config, TOKEN_URL)
    }

    /// Create a new authenticator against a custom token endpoint.
    pub fn with_token_url(config: Config, token_url: impl Into<String>) -> Self {
        Self {
            config: Arc::new(config),
            token_url: token_url.into(),
            client: Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_access_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_valid()) {
                return Ok(token.access_token.clone());
            }
        }

        let new_token = self.refresh_token().await?;

        {
            let mut cached = self.cached_token.write().await;
            *cached = Some(new_token.clone());
        }

        Ok(new_token.access_token)
    }

    /// Exchange the client credentials for a fresh access token.
    async fn refresh_token(&self) -> Result<CachedToken> {
        debug!(token_url = %self.token_url, client_id = %self.config.client_id, "requesting access token");

        let mut params = vec![("grant_type", "client_credentials".to_string())];
        if let Some(scope) = self.config.scope_param() {
            params.push(("scope", scope));
        }

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(
                urlencoding::encode(&self.config.client_id),
                Some(urlencoding::encode(&self.config.client_secret)),
            )
            .form(&params)
            .send()
            .await
            .map_err(GlobusError::TokenRequest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(oauth_error) => GlobusError::TokenRejected {
                    status: status.as_u16(),
                    error: oauth_error.error,
                    description: oauth_error.error_description,
                },
                Err(_) => GlobusError::TokenRejected {
                    status: status.as_u16(),
                    error: body,
                    description: None,
                },
            });
        }

        let token_response: TokenResponse =
            response.json().await.map_err(GlobusError::TokenRequest)?;

        debug!(
            token_type = ?token_response.token_type,
            expires_in = ?token_response.expires_in,
            "access token acquired"
        );

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at: token_response
                .expires_in
                .map(|secs| SystemTime::now() + Duration::from_secs(secs)),
        })
    }
}
