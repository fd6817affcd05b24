//! Data models for OAuth2 token endpoint responses.

use serde::Deserialize;

/// Successful client-credentials token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds. Absent means the token does not expire.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Standard OAuth2 error body (RFC 6749, section 5.2).
#[derive(Debug, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}
