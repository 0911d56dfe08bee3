use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use etl_llm::LLMError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request body must be in JSON format")]
    InvalidRequestBody,

    #[error("'inputJson' key not found in request body")]
    MissingInputJson,

    #[error("inputJson string is not a valid JSON object")]
    InvalidInputJson { details: String },

    #[error(transparent)]
    Upstream(#[from] LLMError),

    #[error("Empty response from OpenAI")]
    EmptyCompletion,

    #[error("Invalid JSON returned from OpenAI")]
    InvalidCompletionJson { raw_output: String, details: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct JsonError {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequestBody => StatusCode::BAD_REQUEST,
            AppError::MissingInputJson => StatusCode::BAD_REQUEST,
            AppError::InvalidInputJson { .. } => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::EmptyCompletion => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidCompletionJson { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (raw_output, details) = match self {
            AppError::InvalidInputJson { details } => (None, Some(details.clone())),
            AppError::InvalidCompletionJson {
                raw_output,
                details,
            } => (Some(raw_output.clone()), Some(details.clone())),
            _ => (None, None),
        };

        if self.status_code().is_server_error() {
            tracing::error!("[ERROR]: {}", self);
        }

        HttpResponse::build(self.status_code()).json(JsonError {
            error: self.to_string(),
            raw_output,
            details,
        })
    }
}
