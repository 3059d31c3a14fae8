use axum::{
    Extension,
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};

use crate::server::AppState;

/// Redirects the browser to Spotify's consent page.
pub async fn login(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, state.tokens.authorization_url())])
}
