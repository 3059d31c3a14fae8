use axum::{Extension, extract::Query, http::StatusCode};
use tracing::warn;

use crate::{server::AppState, types::CallbackParams};

/// Completes the authorization-code flow.
///
/// Spotify redirects here with either `code` or `error`. Without a code no
/// exchange is attempted.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> (StatusCode, String) {
    let Some(code) = params.code else {
        let reason = params.error.unwrap_or_else(|| "missing code".to_string());
        warn!(reason = %reason, "authorization was not granted");
        return (
            StatusCode::BAD_REQUEST,
            format!("Authorization failed: {reason}"),
        );
    };

    match state.tokens.exchange_authorization_code(&code).await {
        Ok(()) => (
            StatusCode::OK,
            "Authorization code received and access token obtained".to_string(),
        ),
        Err(e) => {
            warn!(error = %e, "token exchange failed");
            (StatusCode::BAD_GATEWAY, format!("Token exchange failed: {e}"))
        }
    }
}
