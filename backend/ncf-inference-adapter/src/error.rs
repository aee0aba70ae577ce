use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Message is already JSON, e.g. `{"error": "unsupported content type text/plain"}`
    #[error("{0}")]
    UnsupportedContentType(String),

    #[error("Invalid request encoding: {0}")]
    InvalidEncoding(String),

    #[error("Invalid request JSON: {0}")]
    InvalidJson(String),

    #[error("No one-hot value equal to 1 in instance {instance}")]
    ValueNotFound { instance: usize },

    /// Raw response body of a non-200 model server reply
    #[error("{0}")]
    ModelServerError(String),

    #[error("Model server unreachable: {0}")]
    ModelServerUnreachable(String),

    #[error("Invalid model server response: {0}")]
    InvalidModelResponse(String),

    #[error("Model returned {predictions} predictions for {instances} instances")]
    PredictionCountMismatch { instances: usize, predictions: usize },

    #[error("Model returned an empty prediction for instance {instance}")]
    EmptyPrediction { instance: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl AppError {
    /// Whether the failure originated upstream of the adapter
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::ModelServerError(_)
                | AppError::ModelServerUnreachable(_)
                | AppError::InvalidModelResponse(_)
                | AppError::PredictionCountMismatch { .. }
                | AppError::EmptyPrediction { .. }
        )
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        HttpResponse::build(code).json(ErrorResponse {
            error: self.to_string(),
            code: code.as_u16(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::InvalidEncoding(_)
            | AppError::InvalidJson(_)
            | AppError::ValueNotFound { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

// Inbound parse failures; model responses map to InvalidModelResponse explicitly
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidJson(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ModelServerUnreachable(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_server_error_message_is_verbatim() {
        let err = AppError::ModelServerError("server overloaded".to_string());
        assert_eq!(err.to_string(), "server overloaded");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.is_upstream());
    }

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(
            AppError::UnsupportedContentType("{}".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::ValueNotFound { instance: 3 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert!(!AppError::InvalidJson("eof".into()).is_upstream());
    }
}
