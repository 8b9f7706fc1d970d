use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use resale_profit_core::ProfitError;
use serde_json::json;
use thiserror::Error;

/// Central error type for the HTTP layer
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Calculation(#[from] ProfitError),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Body or query string that could not be decoded.
    #[error("Rejected request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            AppError::Calculation(ProfitError::InvalidInput { field, reason }) => (
                StatusCode::BAD_REQUEST,
                format!("{field}: {reason}"),
                "INVALID_INPUT",
            ),
            AppError::Calculation(e) => {
                tracing::error!(error = %e, "calculation or export failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    e.to_string(),
                    "EXPORT_FAILED",
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::Rejected { status, message } => (status, message, "INVALID_REQUEST"),
            AppError::InternalError(e) => {
                tracing::error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(r: JsonRejection) -> Self {
        AppError::Rejected {
            status: r.status(),
            message: r.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(r: QueryRejection) -> Self {
        AppError::Rejected {
            status: r.status(),
            message: r.body_text(),
        }
    }
}
