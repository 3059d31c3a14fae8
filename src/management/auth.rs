use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::AuthError,
    spotify,
    types::{TokenResponse, TokenState},
};

/// Source of the current time, replaceable in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Owns the token state and keeps the access token valid.
///
/// The whole check-and-refresh sequence runs under one lock, so concurrent
/// requests that find the token expired trigger a single refresh call and all
/// observe its result, whether it succeeded or failed.
pub struct TokenManager {
    state: Mutex<TokenState>,
    // bumped under the lock once a refresh call has completed
    refresh_attempts: AtomicU64,
    client: Client,
    config: Arc<Config>,
    clock: Clock,
}

impl TokenManager {
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self::with_clock(config, client, Arc::new(Utc::now))
    }

    pub fn with_clock(config: Arc<Config>, client: Client, clock: Clock) -> Self {
        TokenManager {
            state: Mutex::new(TokenState::default()),
            refresh_attempts: AtomicU64::new(0),
            client,
            config,
            clock,
        }
    }

    /// Returns a currently valid access token, refreshing it when expired.
    ///
    /// Returns `None` without any network call while no authorization code
    /// has been exchanged yet. A failed refresh also yields `None` and leaves
    /// the stored state untouched. Requests that were already waiting on that
    /// refresh share its failure; the next request after it tries again.
    pub async fn get_valid_token(&self) -> Option<String> {
        let attempts_seen = self.refresh_attempts.load(Ordering::SeqCst);
        let mut state = self.state.lock().await;
        if !state.authorized {
            return None;
        }

        if !state.is_expired(self.now()) {
            return Some(state.access_token.clone());
        }

        if self.refresh_attempts.load(Ordering::SeqCst) != attempts_seen {
            debug!("refresh attempted while waiting and token is still expired");
            return None;
        }

        let refreshed =
            spotify::auth::refresh_token(&self.client, &self.config, &state.refresh_token).await;
        self.refresh_attempts.fetch_add(1, Ordering::SeqCst);
        match refreshed {
            Ok(token) => {
                self.apply_refresh(&mut state, token);
                info!(expires_at = %state.expires_at, "access token refreshed");
                Some(state.access_token.clone())
            }
            Err(e) => {
                warn!(error = %e, "access token refresh failed");
                None
            }
        }
    }

    /// Exchanges the code from the authorization redirect for tokens.
    ///
    /// On success the state is replaced entirely, so calling this again
    /// re-authorizes. On failure the previous state is kept.
    pub async fn exchange_authorization_code(&self, code: &str) -> Result<(), AuthError> {
        let mut state = self.state.lock().await;
        let token = spotify::auth::exchange_code(&self.client, &self.config, code).await?;

        *state = TokenState {
            expires_at: self.expires_at(token.expires_in),
            access_token: token.access_token,
            refresh_token: token.refresh_token.unwrap_or_default(),
            scope: token.scope.unwrap_or_default(),
            authorized: true,
        };

        info!(expires_at = %state.expires_at, scope = %state.scope, "authorization code exchanged");
        Ok(())
    }

    /// See [`spotify::auth::authorization_url`].
    pub fn authorization_url(&self) -> String {
        spotify::auth::authorization_url(&self.config)
    }

    pub async fn is_authorized(&self) -> bool {
        self.state.lock().await.authorized
    }

    fn apply_refresh(&self, state: &mut TokenState, token: TokenResponse) {
        state.expires_at = self.expires_at(token.expires_in);
        state.access_token = token.access_token;
        if let Some(refresh) = token.refresh_token.filter(|r| !r.is_empty()) {
            state.refresh_token = refresh;
        }
        if let Some(scope) = token.scope {
            state.scope = scope;
        }
    }

    fn expires_at(&self, expires_in: u64) -> DateTime<Utc> {
        let now = self.now();
        i64::try_from(expires_in)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    #[cfg(test)]
    async fn snapshot(&self) -> TokenState {
        self.state.lock().await.clone()
    }
}
