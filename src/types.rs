use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The token state of the single user this proxy acts for.
///
/// Starts out empty and unauthorized. Only the
/// [`TokenManager`](crate::management::TokenManager) mutates it.
#[derive(Debug, Clone, Default)]
pub struct TokenState {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_at: DateTime<Utc>,
    pub authorized: bool,
}

impl TokenState {
    /// A refresh is due once `now` has passed `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Body of a successful response from the token endpoint.
///
/// Refresh responses may omit `refresh_token`, in which case the stored one
/// stays valid.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageParams {
    pub image_url: String,
}

/// A fully buffered upstream response, ready to be relayed.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: axum::http::StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: axum::body::Bytes,
}
