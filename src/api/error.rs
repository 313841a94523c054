use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::analysis::AnalysisError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid contract address")]
    InvalidAddress,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Token analysis not found")]
    NotFound,
    #[error("Failed to analyze token")]
    AnalysisFailed(#[from] AnalysisError),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidAddress | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::AnalysisFailed(e) => {
                tracing::error!("Analysis error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            ApiError::Internal(_) => "Something went wrong!".to_string(),
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
