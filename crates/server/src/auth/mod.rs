//! Session gate for protected routes.
//!
//! Sessions come from an external identity provider; the server only verifies them per
//! request and never caches them.

mod jwt;
mod middleware;

use api_types::SessionUser;
use async_trait::async_trait;
use axum::http::HeaderMap;
use thiserror::Error;

pub use jwt::{JwtSessionProvider, SessionClaims, SESSION_COOKIE};
pub use middleware::{optional_session, require_session};

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user: SessionUser,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolves the session carried by `headers`. `Ok(None)` means there is no valid
    /// session; errors are reserved for failures of the provider itself.
    async fn get_session(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<RequestContext>, SessionError>;
}
