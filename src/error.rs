//! API error taxonomy and HTTP translation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::error;

/// ENABLE_GLOBAL_ERROR_LOGGING=true switches 500 logging to full debug detail.
fn verbose_errors() -> bool {
    static VERBOSE: OnceLock<bool> = OnceLock::new();
    *VERBOSE.get_or_init(|| {
        std::env::var("ENABLE_GLOBAL_ERROR_LOGGING")
            .map(|v| v == "true")
            .unwrap_or(false)
    })
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {developer}")]
    Forbidden { developer: String, client: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("email address already taken: {0}")]
    UniqueEmail(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Translates a store-level unique violation on the email column into the
    /// client-facing conflict error; anything else stays a database error.
    pub fn from_insert(e: sqlx::Error, email: &str) -> Self {
        let unique = e
            .as_database_error()
            .map(|d| d.is_unique_violation())
            .unwrap_or(false);
        if unique {
            ApiError::UniqueEmail(email.to_string())
        } else {
            ApiError::Db(e)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": message })),
            )
                .into_response(),
            ApiError::Forbidden { developer, client } => (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": { "developer": developer, "client": client } })),
            )
                .into_response(),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::UniqueEmail(email) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": {
                        "developer": "UniqueConstraintViolation",
                        "client": format!(
                            "Please enter another email address, ({email}) is already taken."
                        ),
                    }
                })),
            )
                .into_response(),
            ApiError::Db(e) => {
                if verbose_errors() {
                    error!(error = ?e, "store error");
                } else {
                    error!(error = %e, "store error");
                }
                internal_response()
            }
            ApiError::Internal(e) => {
                if verbose_errors() {
                    error!(error = ?e, "unexpected error");
                } else {
                    error!(error = %e, "unexpected error");
                }
                internal_response()
            }
        }
    }
}

/// Generic 500 body; detail stays server-side only.
fn internal_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal Server Error", "error": {} })),
    )
        .into_response()
}
