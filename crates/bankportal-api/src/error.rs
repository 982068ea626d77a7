//! Error types for bankportal-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bankportal_core::error::ErrorCode;
use bankportal_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },

    /// Ledger errors keep their code and suggestions in the response body
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(error) => match error.code() {
                ErrorCode::InvalidKind => StatusCode::NOT_FOUND,
                ErrorCode::PageOutOfRange => StatusCode::BAD_REQUEST,
                ErrorCode::SourceError => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// JSON error body; ledger errors add `code`, `suggestions` and `details`
    pub fn body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });
        if let ApiError::Core(error) = self {
            let details = error.to_details();
            body["code"] = serde_json::json!(details.code);
            body["suggestions"] = serde_json::json!(details.suggestions);
            if let Some(extra) = details.details {
                body["details"] = extra;
            }
        }
        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Core(error) => log::log!(
                error.severity().level(),
                "Request failed with {}: [{}] {}",
                status,
                error.code(),
                error
            ),
            _ => log::warn!("Request failed with {}: {}", status, self),
        }
        (status, Json(self.body())).into_response()
    }
}
