use axum::{
    Extension,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Uri},
    response::Response,
};

use crate::{error::ProxyError, server::AppState};

pub const PROXY_PREFIX: &str = "/proxy/";

/// Relays `/proxy/{path}` to the Spotify Web API.
///
/// The path is taken from the raw request URI so percent-encoded segments
/// reach upstream exactly as the client sent them.
pub async fn proxy(
    Extension(state): Extension<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let path = uri.path().strip_prefix(PROXY_PREFIX).unwrap_or_default();

    let upstream = state
        .forwarder
        .forward(method, path, uri.query(), &headers, body)
        .await?;

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = upstream.headers;
    Ok(response)
}
