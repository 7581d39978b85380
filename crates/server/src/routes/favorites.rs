use api_types::{FavoriteWorkspace, ToggleFavoriteRequest, ToggleFavoriteResponse};
use axum::{
    Json, Router,
    extract::{Extension, State},
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use tracing::instrument;

use super::error::{ErrorResponse, db_error, not_found};
use crate::{
    AppState,
    auth::RequestContext,
    db::{favorites::FavoriteRepository, users::UserRepository, workspaces::WorkspaceRepository},
};

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(get_favorites))
        .route("/favorites/toggle", post(toggle_favorite))
}

#[instrument(
    name = "favorites.toggle_favorite",
    skip(state, ctx, payload),
    fields(workspace_id = %payload.workspace_id, user_id = %ctx.user.id)
)]
async fn toggle_favorite(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    WithRejection(Json(payload), _): WithRejection<Json<ToggleFavoriteRequest>, ErrorResponse>,
) -> Result<Json<ToggleFavoriteResponse>, ErrorResponse> {
    let exists = WorkspaceRepository::exists(state.pool(), payload.workspace_id)
        .await
        .map_err(|error| {
            tracing::error!(?error, "failed to check workspace existence");
            db_error(error, "failed to update favorite status")
        })?;
    if !exists {
        return Err(not_found("workspace"));
    }

    let mut tx = state.pool().begin().await.map_err(|error| {
        tracing::error!(?error, "failed to begin transaction");
        db_error(error, "failed to update favorite status")
    })?;

    UserRepository::upsert(&mut *tx, &ctx.user)
        .await
        .map_err(|error| {
            tracing::error!(?error, "failed to record session user");
            db_error(error, "failed to update favorite status")
        })?;

    let favorited = FavoriteRepository::toggle(&mut *tx, ctx.user.id, payload.workspace_id)
        .await
        .map_err(|error| {
            tracing::error!(?error, "failed to toggle favorite");
            db_error(error, "failed to update favorite status")
        })?;

    tx.commit().await.map_err(|error| {
        tracing::error!(?error, "failed to commit favorite toggle");
        db_error(error, "failed to update favorite status")
    })?;

    Ok(Json(ToggleFavoriteResponse { favorited }))
}

#[instrument(name = "favorites.get_favorites", skip(state, ctx), fields(user_id = %ctx.user.id))]
async fn get_favorites(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Vec<FavoriteWorkspace>>, ErrorResponse> {
    let favorites = FavoriteRepository::list_for_user(state.pool(), ctx.user.id)
        .await
        .map_err(|error| {
            tracing::error!(?error, "failed to list favorites");
            db_error(error, "failed to fetch favorite workspaces")
        })?;

    Ok(Json(favorites))
}
