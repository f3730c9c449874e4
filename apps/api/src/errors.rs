use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::form::orchestrator::FormError;
use crate::form::validation::ValidationFailure;
use crate::gateway::GatewayError;

const UPSTREAM_MESSAGE: &str = "Failed to fetch data from the backend server";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Form invalid: {0}")]
    FormInvalid(ValidationFailure),

    #[error("Backend error ({status})")]
    Upstream { status: StatusCode, details: Value },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Backend { status, details } => AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                details,
            },
            GatewayError::Http(e) => AppError::Upstream {
                status: StatusCode::BAD_GATEWAY,
                details: Value::String(e.to_string()),
            },
            GatewayError::InvalidResponse(msg) => AppError::Upstream {
                status: StatusCode::BAD_GATEWAY,
                details: Value::String(msg),
            },
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::AlreadySubmitted
            | FormError::SubmissionInFlight
            | FormError::NoSubmissionPending => AppError::Conflict(err.to_string()),
            FormError::NotRepeatable(_) | FormError::UnknownField { .. } => {
                AppError::Validation(err.to_string())
            }
            FormError::Invalid(failure) => AppError::FormInvalid(failure),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, extra) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None)
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            AppError::FormInvalid(failure) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "FORM_INVALID",
                failure.message.clone(),
                Some(("failure", json!(failure))),
            ),
            AppError::Upstream { status, details } => {
                tracing::error!("Backend error {status}: {details}");
                (
                    status,
                    "UPSTREAM_ERROR",
                    UPSTREAM_MESSAGE.to_string(),
                    Some(("details", details)),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some((key, value)) = extra {
            error[key] = value;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
