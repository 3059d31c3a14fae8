use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use sporlproxy::utils::{
    basic_credentials, forwardable_request_headers, is_hop_by_hop_header, join_url,
    relayable_response_headers, with_query,
};

// Helper function to build a header map from name/value pairs
fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.append(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    map
}

#[test]
fn test_basic_credentials() {
    // base64("client:secret")
    assert_eq!(basic_credentials("client", "secret"), "Y2xpZW50OnNlY3JldA==");

    // A colon in the secret is kept as is
    assert_eq!(basic_credentials("a", "b:c"), "YTpiOmM=");
}

#[test]
fn test_join_url() {
    assert_eq!(
        join_url("https://api.spotify.com", "v1/me/player"),
        "https://api.spotify.com/v1/me/player"
    );

    // Trailing and leading slashes collapse into one
    assert_eq!(
        join_url("https://api.spotify.com/", "/v1/me/player"),
        "https://api.spotify.com/v1/me/player"
    );

    // Empty path points at the base itself
    assert_eq!(join_url("http://localhost:9000", ""), "http://localhost:9000/");
}

#[test]
fn test_with_query() {
    let url = "https://api.spotify.com/v1/me/player/volume".to_string();

    assert_eq!(
        with_query(url.clone(), Some("volume_percent=50")),
        "https://api.spotify.com/v1/me/player/volume?volume_percent=50"
    );
    assert_eq!(with_query(url.clone(), Some("")), url);
    assert_eq!(with_query(url.clone(), None), url);

    // Already encoded values are not touched
    assert_eq!(
        with_query("http://x/search".to_string(), Some("q=a%20b&type=track")),
        "http://x/search?q=a%20b&type=track"
    );
}

#[test]
fn test_is_hop_by_hop_header() {
    assert!(is_hop_by_hop_header(&header::CONNECTION));
    assert!(is_hop_by_hop_header(&header::TRANSFER_ENCODING));
    assert!(is_hop_by_hop_header(&HeaderName::from_static("keep-alive")));
    assert!(!is_hop_by_hop_header(&header::CONTENT_TYPE));
    assert!(!is_hop_by_hop_header(&header::AUTHORIZATION));
}

#[test]
fn test_forwardable_request_headers() {
    let inbound = headers(&[
        ("host", "proxy.local:8000"),
        ("content-length", "2"),
        ("content-type", "application/json"),
        ("accept-encoding", "gzip, br"),
        ("connection", "keep-alive"),
        ("x-custom", "one"),
        ("x-custom", "two"),
    ]);

    let forwarded = forwardable_request_headers(&inbound);

    assert!(forwarded.get(header::HOST).is_none());
    assert!(forwarded.get(header::CONTENT_LENGTH).is_none());
    assert!(forwarded.get(header::ACCEPT_ENCODING).is_none());
    assert!(forwarded.get(header::CONNECTION).is_none());
    assert_eq!(forwarded[header::CONTENT_TYPE], "application/json");

    // Repeated headers survive with all their values
    let custom: Vec<_> = forwarded.get_all("x-custom").iter().collect();
    assert_eq!(custom, vec!["one", "two"]);
}

#[test]
fn test_relayable_response_headers() {
    let upstream = headers(&[
        ("content-encoding", "gzip"),
        ("transfer-encoding", "chunked"),
        ("content-length", "123"),
        ("content-type", "application/json; charset=utf-8"),
        ("cache-control", "private, max-age=0"),
        ("retry-after", "3"),
    ]);

    let relayed = relayable_response_headers(&upstream);

    assert!(relayed.get(header::CONTENT_ENCODING).is_none());
    assert!(relayed.get(header::TRANSFER_ENCODING).is_none());
    assert!(relayed.get(header::CONTENT_LENGTH).is_none());
    assert_eq!(relayed[header::CONTENT_TYPE], "application/json; charset=utf-8");
    assert_eq!(relayed[header::CACHE_CONTROL], "private, max-age=0");
    assert_eq!(relayed[header::RETRY_AFTER], "3");
}
