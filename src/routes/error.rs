use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use std::fmt::Display;
use thiserror::Error;

use crate::core::{CriteriaError, InternshipError};
use crate::models::{ErrorResponse, UnknownStatus};

/// Handler-boundary error, rendered as an [`ErrorResponse`]
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected input (400)
    #[error("{0}")]
    Validation(String),

    /// Missing company, internship or application (404)
    #[error("{0}")]
    NotFound(String),

    /// Anything else (500); `message` is the raw underlying error
    #[error("{context}: {message}")]
    Internal { context: &'static str, message: String },
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{} not found", what))
    }

    /// Wrap an unexpected failure, logging it with `context`
    pub fn internal(context: &'static str, err: impl Display) -> Self {
        tracing::error!("{}: {}", context, err);
        ApiError::Internal {
            context,
            message: err.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error, message) = match self {
            ApiError::Validation(message) => ("Validation failed".to_string(), message.clone()),
            ApiError::NotFound(message) => ("Not found".to_string(), message.clone()),
            ApiError::Internal { context, message } => (context.to_string(), message.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error,
            message,
            status_code: self.status_code().as_u16(),
        })
    }
}

impl From<InternshipError> for ApiError {
    fn from(err: InternshipError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CriteriaError> for ApiError {
    fn from(err: CriteriaError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<UnknownStatus> for ApiError {
    fn from(err: UnknownStatus) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::Validation(format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(format!("Invalid query: {}", err)).into()
}

/// Handle malformed path segments such as non-UUID ids
pub fn handle_path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(format!("Invalid path: {}", err)).into()
}
