//! Configuration management for the Spotify proxy.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every value is read once at startup and collected
//! into a [`Config`], which is then handed to the token manager, the forwarder
//! and the image transcoder.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, net::SocketAddr, num::NonZeroU32, path::PathBuf, str::FromStr, time::Duration};

use reqwest::{Client, Url};
use thiserror::Error;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/callback";
pub const DEFAULT_SCOPE: &str = "user-modify-playback-state user-read-playback-state";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_IMAGE_WIDTH: u32 = 160;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 128;
pub const DEFAULT_IMAGE_QUALITY: u8 = 75;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to load env file {path}: {reason}")]
    EnvFile { path: PathBuf, reason: String },
}

/// Static configuration of the proxy.
///
/// Built once by [`Config::from_env`]. All fields are public so tests can
/// point the proxy at mock servers.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: SocketAddr,
    pub image_width: u32,
    pub image_height: u32,
    pub image_quality: u8,
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a configuration with the given credentials and defaults for
    /// everything else.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            image_width: DEFAULT_IMAGE_WIDTH,
            image_height: DEFAULT_IMAGE_HEIGHT,
            image_quality: DEFAULT_IMAGE_QUALITY,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Reads the full configuration from the process environment.
    ///
    /// Call [`load_env`] first if values should also come from a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first variable that is missing or
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let image_quality = image_quality()?;
        if !(1..=100).contains(&image_quality) {
            return Err(ConfigError::Invalid {
                name: "IMAGE_JPEG_QUALITY",
                value: image_quality.to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        Ok(Self {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
            redirect_uri: spotify_redirect_uri()?,
            scope: spotify_scope(),
            auth_url: spotify_apiauth_url()?,
            token_url: spotify_apitoken_url()?,
            api_url: spotify_apiurl()?,
            server_addr: server_addr()?,
            image_width: image_width()?,
            image_height: image_height()?,
            image_quality,
            http_timeout: Duration::from_secs(http_timeout_secs()?),
        })
    }

    /// Builds the HTTP client shared by the token manager, the forwarder and
    /// the image transcoder.
    ///
    /// Every request made through it is bounded by `http_timeout`, so a hung
    /// token endpoint cannot hold the token lock forever.
    pub fn http_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(self.http_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

/// Loads environment variables from a `.env` file.
///
/// Without an explicit path the file is looked up in the local data directory
/// under `sporlproxy/.env`:
/// - Linux: `~/.local/share/sporlproxy/.env`
/// - macOS: `~/Library/Application Support/sporlproxy/.env`
/// - Windows: `%LOCALAPPDATA%/sporlproxy/.env`
///
/// A missing file is not an error; the process environment alone may hold
/// every value. Variables already present in the environment win over the file.
///
/// # Errors
///
/// Returns an error if the default directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env(path: Option<PathBuf>) -> Result<(), ConfigError> {
    let path = match path {
        Some(path) => path,
        None => {
            let path = default_env_path();
            if let Some(parent) = path.parent() {
                async_fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ConfigError::EnvFile {
                        path: parent.to_path_buf(),
                        reason: e.to_string(),
                    })?;
            }
            path
        }
    };

    if async_fs::metadata(&path).await.is_err() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile {
        path,
        reason: e.to_string(),
    })
}

/// Returns the default location of the `.env` file.
pub fn default_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlproxy/.env");
    path
}

/// Returns the address the proxy binds to (`SERVER_ADDRESS`).
///
/// Defaults to `0.0.0.0:8000`, so the embedded display on the local network
/// can reach it.
pub fn server_addr() -> Result<SocketAddr, ConfigError> {
    parsed("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// # Security Note
///
/// The client secret is only ever sent to the token endpoint inside the
/// Basic authorization header and is never logged.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the OAuth redirect URI (`SPOTIFY_API_REDIRECT_URI`).
///
/// This must match the redirect URI registered in the Spotify application
/// settings and point at this proxy's `/callback` route.
pub fn spotify_redirect_uri() -> Result<String, ConfigError> {
    url_var("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the space separated OAuth scopes (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string())
}

/// Returns the OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> Result<String, ConfigError> {
    url_var("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
///
/// Forwarded paths are appended to it, e.g. `v1/me/player`.
pub fn spotify_apiurl() -> Result<String, ConfigError> {
    url_var("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> Result<String, ConfigError> {
    url_var("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the target artwork width (`IMAGE_WIDTH`). Zero is rejected.
pub fn image_width() -> Result<u32, ConfigError> {
    dimension("IMAGE_WIDTH", DEFAULT_IMAGE_WIDTH)
}

/// Returns the target artwork height (`IMAGE_HEIGHT`). Zero is rejected.
pub fn image_height() -> Result<u32, ConfigError> {
    dimension("IMAGE_HEIGHT", DEFAULT_IMAGE_HEIGHT)
}

pub fn image_quality() -> Result<u8, ConfigError> {
    parsed("IMAGE_JPEG_QUALITY", &DEFAULT_IMAGE_QUALITY.to_string())
}

pub fn http_timeout_secs() -> Result<u64, ConfigError> {
    parsed("HTTP_TIMEOUT_SECS", &DEFAULT_HTTP_TIMEOUT_SECS.to_string())
}

fn dimension(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    parsed::<NonZeroU32>(name, &default.to_string()).map(NonZeroU32::get)
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn url_var(name: &'static str, default: &str) -> Result<String, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    Url::parse(&value).map_err(|e| ConfigError::Invalid {
        name,
        value: value.clone(),
        reason: e.to_string(),
    })?;
    Ok(value)
}

fn parsed<T>(name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.clone(),
        reason: e.to_string(),
    })
}
