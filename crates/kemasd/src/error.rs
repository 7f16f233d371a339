//! API error taxonomy.
//!
//! Every failure mode maps to a terminal JSON response; no request is
//! left hanging. Partial extraction failures are not represented here -
//! they are absorbed inside `extract` and the request still succeeds.

use crate::jamai::UpstreamError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kemas_common::ErrorBody;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected before any outbound call.
    #[error("input text is required")]
    EmptyInput,
    /// Server misconfiguration; fatal until the environment is fixed.
    #[error("upstream credentials not configured")]
    MissingCredentials,
    /// Remote service answered with a non-success status, forwarded as-is.
    #[error("upstream returned status {status}")]
    Upstream { status: u16, details: Value },
    /// Catch-all boundary for transport failures and unforeseen shapes.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, body } => Self::Upstream {
                status,
                details: body,
            },
            UpstreamError::Transport(e) => Self::Internal(e.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::EmptyInput => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Input text is required".to_string(),
                    details: None,
                },
            ),
            ApiError::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "JamAI Base credentials not configured. Set JAMAI_BASE_API_KEY and JAMAI_BASE_PROJECT_ID.".to_string(),
                    details: None,
                },
            ),
            ApiError::Upstream { status, details } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                ErrorBody {
                    error: "Failed to process normalization".to_string(),
                    details: Some(details),
                },
            ),
            ApiError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Internal server error".to_string(),
                    details: Some(Value::String(e.to_string())),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
