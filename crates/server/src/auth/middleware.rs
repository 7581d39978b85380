use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use super::RequestContext;
use crate::{AppState, configure_user_scope, routes::error::ErrorResponse};

async fn resolve(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<RequestContext>, ErrorResponse> {
    state
        .sessions()
        .get_session(headers)
        .await
        .map_err(|error| {
            tracing::error!(?error, "failed to resolve session");
            ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to resolve session")
        })
}

/// Rejects requests without a valid session and exposes the caller as
/// `Extension<RequestContext>`.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ErrorResponse> {
    let ctx = resolve(&state, request.headers())
        .await?
        .ok_or_else(|| ErrorResponse::new(StatusCode::UNAUTHORIZED, "authentication required"))?;

    configure_user_scope(&ctx.user);
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}

/// Exposes the caller, if any, as `Extension<Option<RequestContext>>`. Public routes never
/// fail on a missing or invalid session.
pub async fn optional_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let ctx = resolve(&state, request.headers()).await.ok().flatten();
    request.extensions_mut().insert(ctx);
    next.run(request).await
}
