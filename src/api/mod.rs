//! # API Module
//!
//! HTTP handlers of the proxy. Each handler converts its failures into a
//! response; nothing here can bring the process down.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /login`, redirects (302) to Spotify's authorize page.
//! - [`callback`] - `GET /callback`, exchanges the authorization code for
//!   tokens. This normally happens once per process lifetime.
//!
//! ### Forwarding
//!
//! - [`proxy`] - `GET|POST|PUT /proxy/{path}`, relays the request to the
//!   Spotify Web API with the current bearer token.
//!
//! ### Artwork
//!
//! - [`image`] - `GET /image?image_url=...`, returns the image resized and
//!   re-encoded as JPEG. No authorization is involved.
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, status, version and whether a user has
//!   authorized the proxy yet.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sporlproxy::{config::Config, server};
//!
//! let state = server::AppState::new(Config::from_env()?)?;
//! let app = server::router(state);
//! ```

mod callback;
mod health;
mod image;
mod login;
mod proxy;

pub use callback::callback;
pub use health::health;
pub use image::image;
pub use login::login;
pub use proxy::{PROXY_PREFIX, proxy};
