//! Error types of the proxy and their HTTP representation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures talking to the Spotify token endpoint.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token endpoint request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid token response: {0}")]
    Malformed(String),
}

/// Errors surfaced by the proxy's HTTP handlers.
///
/// Upstream API responses are never turned into a `ProxyError`, whatever
/// their status; they are relayed as they are. Only failures that happen
/// before or instead of an upstream response end up here.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// No token was ever obtained, or the refresh failed.
    #[error("No access token")]
    Unauthorized,

    /// The upstream API could not be reached.
    #[error("upstream request failed: {0}")]
    Gateway(String),

    /// The image URL could not be fetched.
    #[error("failed to fetch image: {0}")]
    ImageFetch(String),

    /// The fetched bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    fn kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Gateway(_) => (StatusCode::BAD_GATEWAY, "gateway_error"),
            Self::ImageFetch(_) => (StatusCode::BAD_GATEWAY, "image_fetch_error"),
            Self::Decode(_) => (StatusCode::UNPROCESSABLE_ENTITY, "decode_error"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind().0
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.kind();

        let body = json!({
            "error": {
                "type": error_type,
                "message": self.to_string()
            }
        });

        (status, Json(body)).into_response()
    }
}
