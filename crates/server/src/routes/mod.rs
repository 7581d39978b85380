use axum::{Router, middleware::from_fn_with_state};

use crate::{
    AppState,
    auth::{optional_session, require_session},
};

pub mod error;
pub mod favorites;
pub mod health;
pub mod reports;
pub mod users;
pub mod workspaces;

/// All API routes. Protected routes are wrapped in `require_session`, public ones in
/// `optional_session`.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .merge(workspaces::public_router())
        .layer(from_fn_with_state(state.clone(), optional_session));

    let protected = Router::new()
        .merge(workspaces::protected_router())
        .merge(reports::protected_router())
        .merge(favorites::protected_router())
        .merge(users::protected_router())
        .layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .nest("/v1", public.merge(protected))
        .merge(health::router())
        .with_state(state)
}
