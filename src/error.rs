use crate::db::StoreError;
use ntex::http::StatusCode;
use ntex::web::{HttpRequest, HttpResponse, WebResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database not configured")]
    StoreUnavailable,
    #[error("Database error: {0}")]
    Store(#[from] StoreError),
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::StoreUnavailable | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidIdentifier(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl WebResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self, _: &HttpRequest) -> HttpResponse {
        let message = match self {
            AppError::StoreUnavailable => "Database not configured",
            AppError::Store(e) => {
                log::error!("store operation failed: {}", e);
                "Database error"
            }
            AppError::InvalidIdentifier(msg) | AppError::Validation(msg) => {
                log::debug!("rejected request: {}", self);
                msg.as_str()
            }
        };
        HttpResponse::build(self.status()).json(&serde_json::json!({ "error": message }))
    }
}
