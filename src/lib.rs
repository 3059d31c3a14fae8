//! Spotify Web API Proxy Library
//!
//! This library provides a small HTTP proxy that sits in front of the Spotify
//! Web API on behalf of a single user. It performs the OAuth 2.0
//! authorization-code flow once, keeps the resulting token fresh, and forwards
//! arbitrary REST calls upstream with the current bearer token injected. A
//! separate endpoint resizes album artwork for small embedded displays.
//!
//! # Modules
//!
//! - `api` - HTTP handlers exposed by the proxy
//! - `artwork` - Remote image fetching, resizing and JPEG re-encoding
//! - `config` - Configuration management and environment variables
//! - `error` - Error types and their HTTP representation
//! - `management` - Token state and lifecycle management
//! - `server` - Router assembly and listener
//! - `spotify` - Token endpoint client and generic request forwarder
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporlproxy::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> sporlproxy::Res<()> {
//!     config::load_env(None).await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod artwork;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the binary and the server bootstrap, where any error is simply
/// reported to the user. Request-path code uses the typed errors from
/// [`error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Open {} to authorize", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Proxy listening on {}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal startup errors. Request handlers never call it; they
/// convert failures into HTTP responses instead.
///
/// # Example
///
/// ```
/// error!("Invalid configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser, navigate to {} manually", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
