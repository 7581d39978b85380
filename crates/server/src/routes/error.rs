use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::validation::ValidationError;

#[derive(Debug)]
pub struct ErrorResponse {
    status: StatusCode,
    message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Machine-readable error class shown to clients next to the message.
    pub fn code(&self) -> &'static str {
        match self.status {
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
            StatusCode::BAD_REQUEST => "VALIDATION_ERROR",
            StatusCode::CONFLICT => "CONFLICT",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message, "code": self.code() }));
        (self.status, body).into_response()
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(error: ValidationError) -> Self {
        ErrorResponse::new(StatusCode::BAD_REQUEST, error.to_string())
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        ErrorResponse::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for ErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        ErrorResponse::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<axum_extra::extract::QueryRejection> for ErrorResponse {
    fn from(rejection: axum_extra::extract::QueryRejection) -> Self {
        ErrorResponse::new(StatusCode::BAD_REQUEST, rejection.to_string())
    }
}

pub(crate) fn not_found(resource: &str) -> ErrorResponse {
    ErrorResponse::new(StatusCode::NOT_FOUND, format!("{resource} not found"))
}

pub(crate) fn db_error(
    error: impl std::error::Error + 'static,
    fallback_message: &str,
) -> ErrorResponse {
    let error: &(dyn std::error::Error + 'static) = &error;
    let mut current = Some(error);

    while let Some(err) = current {
        if let Some(sqlx_error) = err.downcast_ref::<sqlx::Error>() {
            if let sqlx::Error::Database(db_err) = sqlx_error {
                if db_err.is_unique_violation() {
                    return ErrorResponse::new(StatusCode::CONFLICT, "resource already exists");
                }
                if db_err.is_foreign_key_violation() {
                    return ErrorResponse::new(StatusCode::NOT_FOUND, "related resource not found");
                }
            }
            break;
        }
        current = err.source();
    }

    ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, fallback_message)
}
