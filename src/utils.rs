use axum::http::{HeaderMap, HeaderName, header};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Encodes the client credentials for the token endpoint's Basic
/// authorization header, i.e. `base64(client_id:client_secret)`.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    STANDARD.encode(format!("{client_id}:{client_secret}"))
}

/// Joins the upstream base URL and a forwarded path with exactly one slash
/// between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{base}/{path}",
        base = base.trim_end_matches('/'),
        path = path.trim_start_matches('/')
    )
}

/// Appends a raw query string to `url` without re-encoding it.
pub fn with_query(url: String, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{url}?{q}"),
        _ => url,
    }
}

/// Checks if a header only describes a single connection and must not be
/// forwarded by a proxy (RFC 9110, section 7.6.1).
pub fn is_hop_by_hop_header(name: &HeaderName) -> bool {
    name == header::CONNECTION
        || name == header::TE
        || name == header::TRAILER
        || name == header::TRANSFER_ENCODING
        || name == header::UPGRADE
        || name == header::PROXY_AUTHORIZATION
        || name == header::PROXY_AUTHENTICATE
        || name.as_str() == "keep-alive"
        || name.as_str() == "proxy-connection"
}

/// Copies the headers of an inbound request that may be sent upstream.
///
/// `Host` and `Content-Length` belong to the inbound connection, and
/// `Accept-Encoding` is left to the HTTP client, which undoes any
/// compression it negotiates.
pub fn forwardable_request_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop_header(name)
            || name == header::HOST
            || name == header::CONTENT_LENGTH
            || name == header::ACCEPT_ENCODING
        {
            continue;
        }
        forwarded.append(name.clone(), value.clone());
    }
    forwarded
}

/// Copies the headers of a buffered upstream response that may be relayed.
///
/// The body has already been decoded and fully read, so any header about its
/// encoding or framing would no longer match. `Content-Length` is recomputed
/// from the buffered body when the response is written.
pub fn relayable_response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut relayed = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop_header(name)
            || name == header::CONTENT_ENCODING
            || name == header::CONTENT_LENGTH
        {
            continue;
        }
        relayed.append(name.clone(), value.clone());
    }
    relayed
}
