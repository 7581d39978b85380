use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub success: bool,
    pub message: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/db", get(database_check))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn database_check(State(state): State<AppState>) -> (StatusCode, Json<DatabaseHealth>) {
    match sqlx::query("SELECT 1 FROM workspaces LIMIT 1")
        .execute(state.pool())
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(DatabaseHealth {
                success: true,
                message: "Database connection successful",
            }),
        ),
        Err(error) => {
            tracing::error!(?error, "database health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DatabaseHealth {
                    success: false,
                    message: "Database connection failed",
                }),
            )
        }
    }
}
