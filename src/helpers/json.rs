use actix_web::{error, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

/// Failure body shared by every error path of the public API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    pub fn response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }

    /// `500 {"error": message}` as an actix error, for extractor error handlers.
    pub fn internal_server_error(message: &str) -> error::Error {
        let response = Self::new(message).response(StatusCode::INTERNAL_SERVER_ERROR);
        error::InternalError::from_response(message.to_string(), response).into()
    }
}
