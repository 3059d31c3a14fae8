use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    Res, api,
    artwork::ImageTranscoder,
    config::Config,
    management::TokenManager,
    spotify::proxy::Forwarder,
    success,
};

/// Shared handles every request handler gets.
///
/// There is exactly one [`TokenManager`] per server; the forwarder holds a
/// reference to the same instance.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenManager>,
    pub forwarder: Arc<Forwarder>,
    pub artwork: Arc<ImageTranscoder>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = config.http_client()?;
        let config = Arc::new(config);
        let tokens = Arc::new(TokenManager::new(Arc::clone(&config), client.clone()));
        Ok(Self::with_tokens(&config, client, tokens))
    }

    /// Assembles the state around an existing token manager.
    pub fn with_tokens(
        config: &Config,
        client: reqwest::Client,
        tokens: Arc<TokenManager>,
    ) -> Self {
        AppState {
            forwarder: Arc::new(Forwarder::new(config, client.clone(), Arc::clone(&tokens))),
            artwork: Arc::new(ImageTranscoder::new(config, client)),
            tokens,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route(
            "/proxy/{*path}",
            get(api::proxy).post(api::proxy).put(api::proxy),
        )
        .route("/image", get(api::image))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = config.server_addr;
    let app = router(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    success!("Proxy listening on http://{}", listener.local_addr()?);
    tracing::info!(addr = %addr, "server started");

    axum::serve(listener, app).await?;
    Ok(())
}
