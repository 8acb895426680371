//! Authentication
//!
//! Two generations, two schemes: v1 endpoints accept a long-lived API
//! token (header or query parameter), v2 endpoints want an OAuth2 bearer
//! token minted from a refresh token. The [`Authenticator`] caches the
//! bearer token and refreshes it on expiry.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, Location};
