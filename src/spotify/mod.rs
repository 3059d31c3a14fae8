//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here:
//!
//! - [`auth`] - Authorization URL construction and the token endpoint
//!   (authorization-code exchange and refresh, both with the client
//!   credentials in a Basic authorization header)
//! - [`proxy`] - The [`Forwarder`](proxy::Forwarder), which replays inbound
//!   requests against the Web API with the current bearer token
//!
//! ```text
//! api handlers
//!      ↓
//! TokenManager ──→ auth (accounts.spotify.com/api/token)
//!      ↓
//! Forwarder ──→ api.spotify.com/{path}
//! ```
//!
//! No retries are performed anywhere in this module. A failed call is
//! final for the request that triggered it.

pub mod auth;
pub mod proxy;
