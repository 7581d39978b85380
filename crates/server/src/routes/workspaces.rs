use api_types::{
    CreateWorkspaceRequest, ListWorkspacesQuery, SearchWorkspacesQuery, Workspace,
    WorkspaceDetail,
};
use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::{Query, WithRejection};
use tracing::instrument;
use uuid::Uuid;

use super::error::{ErrorResponse, db_error, not_found};
use crate::{
    AppState,
    auth::RequestContext,
    conditions::{RECENT_REPORTS_WINDOW, summarize},
    db::{
        favorites::FavoriteRepository,
        reports::ReportRepository,
        users::UserRepository,
        workspaces::{CreateWorkspaceParams, WorkspaceRepository},
    },
    validation::{validate_create_workspace, validate_listing, validate_search},
};

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/workspaces", get(get_workspaces))
        .route("/workspaces/search", get(search_workspaces))
        .route("/workspaces/{workspace_id}", get(get_workspace))
}

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/workspaces", post(create_workspace))
}

#[instrument(name = "workspaces.get_workspaces", skip(state, query))]
async fn get_workspaces(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListWorkspacesQuery>, ErrorResponse>,
) -> Result<Json<Vec<Workspace>>, ErrorResponse> {
    let listing = validate_listing(query)?;

    let workspaces = match listing.nearby {
        Some(filter) => {
            WorkspaceRepository::list_nearby(
                state.pool(),
                filter,
                &listing.venue_types,
                listing.limit,
                listing.offset,
            )
            .await
        }
        None => {
            WorkspaceRepository::list_recent(
                state.pool(),
                &listing.venue_types,
                listing.limit,
                listing.offset,
            )
            .await
        }
    }
    .map_err(|error| {
        tracing::error!(?error, "failed to fetch workspaces");
        db_error(error, "failed to fetch workspaces")
    })?;

    Ok(Json(workspaces))
}

#[instrument(
    name = "workspaces.get_workspace",
    skip(state, ctx),
    fields(workspace_id = %workspace_id)
)]
async fn get_workspace(
    State(state): State<AppState>,
    Extension(ctx): Extension<Option<RequestContext>>,
    WithRejection(Path(workspace_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
) -> Result<Json<WorkspaceDetail>, ErrorResponse> {
    let workspace = WorkspaceRepository::find_by_id(state.pool(), workspace_id)
        .await
        .map_err(|error| {
            tracing::error!(?error, %workspace_id, "failed to load workspace");
            db_error(error, "failed to fetch workspace details")
        })?
        .ok_or_else(|| not_found("workspace"))?;

    let reports = ReportRepository::list_recent(state.pool(), workspace_id, RECENT_REPORTS_WINDOW)
        .await
        .map_err(|error| {
            tracing::error!(?error, %workspace_id, "failed to load workspace reports");
            db_error(error, "failed to fetch workspace details")
        })?;

    let averages = summarize(&reports);

    let is_favorited = match ctx {
        Some(ctx) => FavoriteRepository::is_favorited(state.pool(), ctx.user.id, workspace_id)
            .await
            .map_err(|error| {
                tracing::error!(?error, %workspace_id, "failed to load favorite status");
                db_error(error, "failed to fetch workspace details")
            })?,
        None => false,
    };

    Ok(Json(WorkspaceDetail {
        workspace,
        reports,
        averages,
        is_favorited,
    }))
}

#[instrument(
    name = "workspaces.create_workspace",
    skip(state, ctx, payload),
    fields(user_id = %ctx.user.id, venue_type = ?payload.venue_type)
)]
async fn create_workspace(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateWorkspaceRequest>, ErrorResponse>,
) -> Result<(StatusCode, Json<Workspace>), ErrorResponse> {
    validate_create_workspace(&payload)?;

    let mut tx = state.pool().begin().await.map_err(|error| {
        tracing::error!(?error, "failed to begin transaction");
        db_error(error, "failed to create workspace")
    })?;

    UserRepository::upsert(&mut *tx, &ctx.user)
        .await
        .map_err(|error| {
            tracing::error!(?error, "failed to record session user");
            db_error(error, "failed to create workspace")
        })?;

    let workspace = WorkspaceRepository::create(
        &mut *tx,
        CreateWorkspaceParams {
            name: payload.name,
            address: payload.address,
            latitude: payload.latitude,
            longitude: payload.longitude,
            venue_type: payload.venue_type,
            amenities: payload.amenities,
            created_by_id: Some(ctx.user.id),
        },
    )
    .await
    .map_err(|error| {
        tracing::error!(?error, "failed to create workspace");
        db_error(error, "failed to create workspace")
    })?;

    tx.commit().await.map_err(|error| {
        tracing::error!(?error, "failed to commit workspace");
        db_error(error, "failed to create workspace")
    })?;

    tracing::info!(workspace_id = %workspace.id, "workspace created");

    Ok((StatusCode::CREATED, Json(workspace)))
}

#[instrument(name = "workspaces.search_workspaces", skip(state, query))]
async fn search_workspaces(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SearchWorkspacesQuery>, ErrorResponse>,
) -> Result<Json<Vec<Workspace>>, ErrorResponse> {
    let search = validate_search(query)?;

    let workspaces = WorkspaceRepository::search(state.pool(), &search.query, search.limit)
        .await
        .map_err(|error| {
            tracing::error!(?error, "failed to search workspaces");
            db_error(error, "failed to search workspaces")
        })?;

    Ok(Json(workspaces))
}
