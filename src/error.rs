/*
 * Responsibility
 * - AppError shared by handlers and middleware
 * - IntoResponse (HTTP status + JSON error body)
 * - ForwardError -> AppError
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::ForwardError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("authorization service unavailable")]
    BadGateway,

    #[error("authorization service timed out")]
    GatewayTimeout,

    #[error("internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadGateway => StatusCode::BAD_GATEWAY,
            AppError::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::BadGateway => "BAD_GATEWAY",
            AppError::GatewayTimeout => "GATEWAY_TIMEOUT",
            AppError::Internal => "INTERNAL",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponseBody {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ForwardError> for AppError {
    fn from(e: ForwardError) -> Self {
        match e {
            ForwardError::MissingCredential => AppError::Unauthorized(e.to_string()),
            // Wiring defect upstream: no broker client configured.
            ForwardError::MissingClient => {
                tracing::error!(error = %e, "auth forwarder has no messaging client");
                AppError::Internal
            }
            // The cause is logged by the forwarder; keep it out of the response.
            ForwardError::Transport(_) => AppError::BadGateway,
            ForwardError::Timeout(_) => AppError::GatewayTimeout,
        }
    }
}
