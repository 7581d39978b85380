use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// The user behind an authenticated session, as asserted by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct PrivateDataResponse {
    pub message: String,
    pub user: SessionUser,
}
