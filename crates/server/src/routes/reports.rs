use api_types::{Report, SubmitReportRequest};
use axum::{
    Json, Router,
    extract::{Extension, State},
    http::StatusCode,
    routing::post,
};
use axum_extra::extract::WithRejection;
use tracing::instrument;

use super::error::{ErrorResponse, db_error, not_found};
use crate::{
    AppState,
    auth::RequestContext,
    db::{
        reports::{CreateReportParams, ReportRepository},
        users::UserRepository,
        workspaces::WorkspaceRepository,
    },
    validation::validate_report,
};

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/reports", post(submit_report))
}

#[instrument(
    name = "reports.submit_report",
    skip(state, ctx, payload),
    fields(workspace_id = %payload.workspace_id, user_id = %ctx.user.id)
)]
async fn submit_report(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    WithRejection(Json(payload), _): WithRejection<Json<SubmitReportRequest>, ErrorResponse>,
) -> Result<(StatusCode, Json<Report>), ErrorResponse> {
    validate_report(&payload)?;

    let exists = WorkspaceRepository::exists(state.pool(), payload.workspace_id)
        .await
        .map_err(|error| {
            tracing::error!(?error, "failed to check workspace existence");
            db_error(error, "failed to submit workspace report")
        })?;
    if !exists {
        return Err(not_found("workspace"));
    }

    let mut tx = state.pool().begin().await.map_err(|error| {
        tracing::error!(?error, "failed to begin transaction");
        db_error(error, "failed to submit workspace report")
    })?;

    UserRepository::upsert(&mut *tx, &ctx.user)
        .await
        .map_err(|error| {
            tracing::error!(?error, "failed to record session user");
            db_error(error, "failed to submit workspace report")
        })?;

    // A workspace deleted since the existence check surfaces as a foreign key violation,
    // which `db_error` reports as not found.
    let report = ReportRepository::create(
        &mut *tx,
        CreateReportParams {
            workspace_id: payload.workspace_id,
            user_id: ctx.user.id,
            crowd_level: payload.crowd_level,
            noise_level: payload.noise_level,
            wifi_speed: payload.wifi_speed,
            notes: payload.notes,
        },
    )
    .await
    .map_err(|error| {
        tracing::error!(?error, "failed to submit workspace report");
        db_error(error, "failed to submit workspace report")
    })?;

    tx.commit().await.map_err(|error| {
        tracing::error!(?error, "failed to commit workspace report");
        db_error(error, "failed to submit workspace report")
    })?;

    Ok((StatusCode::CREATED, Json(report)))
}
