use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use tracing::debug;
use url::form_urlencoded;

use crate::{config::Config, error::AuthError, types::TokenResponse, utils};

/// Builds the URL the user is sent to for granting access.
///
/// Pure string construction: client id, `response_type=code`, the fixed
/// redirect URI and the requested scopes are encoded as query parameters of
/// the authorize endpoint.
///
/// # Example
///
/// ```
/// let url = authorization_url(&config);
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorization_url(config: &Config) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", &config.client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("scope", &config.scope)
        .finish();

    let separator = if config.auth_url.contains('?') { '&' } else { '?' };
    format!("{}{separator}{query}", config.auth_url)
}

/// Exchanges an authorization code for an access and refresh token.
///
/// # Errors
///
/// Fails on transport errors, non-200 responses, or a response lacking either
/// token.
pub async fn exchange_code(
    client: &Client,
    config: &Config,
    code: &str,
) -> Result<TokenResponse, AuthError> {
    let token = request_token(
        client,
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config.redirect_uri),
        ],
    )
    .await?;

    match token.refresh_token.as_deref() {
        Some(refresh) if !refresh.is_empty() => Ok(token),
        _ => Err(AuthError::Malformed("missing refresh_token".to_string())),
    }
}

/// Requests a new access token with a refresh token.
///
/// The returned response may or may not carry a new refresh token.
pub async fn refresh_token(
    client: &Client,
    config: &Config,
    refresh_token: &str,
) -> Result<TokenResponse, AuthError> {
    request_token(
        client,
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(
    client: &Client,
    config: &Config,
    form: &[(&str, &str)],
) -> Result<TokenResponse, AuthError> {
    let credentials = utils::basic_credentials(&config.client_id, &config.client_secret);

    let res = client
        .post(&config.token_url)
        .header(AUTHORIZATION, format!("Basic {credentials}"))
        .form(form)
        .send()
        .await?;

    let status = res.status();
    let body = res.bytes().await?;
    debug!(status = %status, "token endpoint responded");

    if status != StatusCode::OK {
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    let token: TokenResponse =
        serde_json::from_slice(&body).map_err(|e| AuthError::Malformed(e.to_string()))?;

    if token.access_token.is_empty() {
        return Err(AuthError::Malformed("empty access_token".to_string()));
    }

    Ok(token)
}
