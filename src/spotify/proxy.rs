use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{HeaderMap, HeaderValue, Method, header::AUTHORIZATION},
};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::Config,
    error::ProxyError,
    management::TokenManager,
    types::UpstreamResponse,
    utils,
};

/// Forwards arbitrary requests to the Spotify Web API with the current
/// bearer token injected.
///
/// Request and response bodies are treated as opaque bytes; nothing is
/// decoded or re-encoded on the way through.
pub struct Forwarder {
    client: Client,
    api_url: String,
    tokens: Arc<TokenManager>,
}

impl Forwarder {
    pub fn new(config: &Config, client: Client, tokens: Arc<TokenManager>) -> Self {
        Forwarder {
            client,
            api_url: config.api_url.clone(),
            tokens,
        }
    }

    /// Issues `method {api_url}/{path}?{query}` upstream and buffers the
    /// response.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::Unauthorized`] if no token is available. No upstream
    ///   call is made in that case.
    /// - [`ProxyError::Gateway`] if the upstream API cannot be reached or the
    ///   response body cannot be read.
    ///
    /// Upstream error statuses are not errors here; they are returned like
    /// any other response.
    #[instrument(skip(self, method, headers, body), fields(method = %method))]
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<UpstreamResponse, ProxyError> {
        let Some(token) = self.tokens.get_valid_token().await else {
            debug!("no access token available, not forwarding");
            return Err(ProxyError::Unauthorized);
        };

        let url = utils::with_query(utils::join_url(&self.api_url, path), query);

        let mut upstream_headers = utils::forwardable_request_headers(headers);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ProxyError::Internal(format!("invalid access token: {e}")))?;
        bearer.set_sensitive(true);
        upstream_headers.insert(AUTHORIZATION, bearer);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .headers(upstream_headers);
        if carries_body(&method) {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "upstream request failed");
            gateway_error(e)
        })?;

        let status = response.status();
        let headers = utils::relayable_response_headers(response.headers());
        let body = response.bytes().await.map_err(gateway_error)?;

        info!(status = %status, bytes = body.len(), "request forwarded");

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}

/// Methods whose inbound body is sent upstream.
fn carries_body(method: &Method) -> bool {
    method == Method::POST || method == Method::PUT
}

fn gateway_error(e: reqwest::Error) -> ProxyError {
    if e.is_timeout() {
        ProxyError::Gateway(format!("upstream request timed out: {e}"))
    } else if e.is_connect() {
        ProxyError::Gateway(format!("failed to connect to upstream: {e}"))
    } else {
        ProxyError::Gateway(e.to_string())
    }
}
