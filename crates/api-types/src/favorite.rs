use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::Workspace;

/// A user's bookmark of a workspace. At most one exists per user and workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A favorited workspace, carrying the id of the favorite record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FavoriteWorkspace {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub workspace: Workspace,
    pub favorite_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteRequest {
    pub workspace_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteResponse {
    pub favorited: bool,
}
