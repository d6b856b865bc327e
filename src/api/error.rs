use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::domain::FieldErrors;
use crate::services::GuestError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    AccessDenied,

    /// Field name -> message map, serialized as the response body itself.
    ValidationErrors(FieldErrors),

    Unauthorized(String),

    InternalError(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::AccessDenied => write!(f, "Access denied"),
            Self::ValidationErrors(errors) => write!(f, "Validation failed: {errors:?}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody { error: msg })).into_response()
            }
            Self::AccessDenied => (
                StatusCode::FORBIDDEN,
                Json(ErrorBody {
                    error: "Access denied".to_string(),
                }),
            )
                .into_response(),
            Self::ValidationErrors(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            Self::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(ErrorBody { error: msg })).into_response()
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "An internal error occurred".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<GuestError> for ApiError {
    fn from(err: GuestError) -> Self {
        match err {
            GuestError::NotFound => Self::NotFound("Guest not found".to_string()),
            GuestError::AccessDenied => Self::AccessDenied,
            GuestError::Validation(errors) => Self::ValidationErrors(errors),
            GuestError::Storage(e) => Self::InternalError(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    pub fn validation(field: &str, msg: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), msg.into());
        Self::ValidationErrors(errors)
    }
}
