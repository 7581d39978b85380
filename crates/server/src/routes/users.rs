use api_types::PrivateDataResponse;
use axum::{Json, Router, extract::Extension, routing::get};

use crate::{AppState, auth::RequestContext};

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/me", get(private_data))
}

async fn private_data(Extension(ctx): Extension<RequestContext>) -> Json<PrivateDataResponse> {
    Json(PrivateDataResponse {
        message: "This is private".to_string(),
        user: ctx.user,
    })
}
