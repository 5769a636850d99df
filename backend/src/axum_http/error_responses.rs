use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crates::domain::value_objects::recording_requests::RecordingRequestError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::usecases::{
    recordable_targets::RecordableTargetsError, recordings::RecordingError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<RecordingError> for AppError {
    fn from(err: RecordingError) -> Self {
        match err {
            RecordingError::Request(RecordingRequestError::TargetNotFound(target)) => {
                AppError::NotFound(format!("{} not found", target))
            }
            RecordingError::Request(request_err) => AppError::Validation {
                field: request_err.field().to_string(),
                message: request_err.to_string(),
            },
            RecordingError::NotFound => AppError::NotFound(err.to_string()),
            RecordingError::NotEditable(_) | RecordingError::NotDeletable(_) => {
                AppError::Conflict(err.to_string())
            }
            RecordingError::Internal(inner) => AppError::Internal(inner),
        }
    }
}

impl From<RecordableTargetsError> for AppError {
    fn from(err: RecordableTargetsError) -> Self {
        match err {
            RecordableTargetsError::TooManyIds(_) => AppError::BadRequest(err.to_string()),
            RecordableTargetsError::Internal(inner) => AppError::Internal(inner),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let message = err.body_text();
                AppError::Validation {
                    field: rejected_field(&message).unwrap_or("body").to_string(),
                    message,
                }
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

/// Pulls the offending field out of a serde error such as
/// "missing field `recordable_type`" or "scheduled_start: premature end of input".
fn rejected_field(message: &str) -> Option<&str> {
    let detail = message
        .split_once("target type: ")
        .map_or(message, |(_, rest)| rest);

    if let Some((_, rest)) = detail.split_once("missing field `") {
        return rest.split_once('`').map(|(field, _)| field);
    }

    detail
        .split_once(": ")
        .map(|(path, _)| path)
        .filter(|path| {
            !path.is_empty()
                && path
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
        })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, field) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string(), None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                message,
                Some(field),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::Internal(err) => {
                // Don't leak internal error detail to client
                error!(error = ?err, "http: internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
            field,
        });

        (status, body).into_response()
    }
}
