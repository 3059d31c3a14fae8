mod auth;

pub use auth::Clock;
pub use auth::TokenManager;
