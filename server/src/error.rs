use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;
use thiserror::Error;

use crate::database::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Inappropriate content")]
    InappropriateContent,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: self.to_string(),
        };

        match self {
            AppError::InappropriateContent | AppError::InvalidRequest(_) => {
                HttpResponse::BadRequest().json(error_response)
            }
            AppError::NotFound(_) => HttpResponse::NotFound().json(error_response),
            AppError::Storage(_) | AppError::Config(_) | AppError::Io(_) | AppError::Internal(_) => {
                tracing::error!("Request failed: {}", self);
                HttpResponse::InternalServerError().json(error_response)
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_rt::test]
    async fn test_inappropriate_content_is_bad_request() {
        let response = AppError::InappropriateContent.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Inappropriate content");
    }

    #[actix_rt::test]
    async fn test_storage_error_is_internal() {
        let error = AppError::from(StoreError::UnsupportedUrl("mysql://db".to_string()));
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].as_str().unwrap().contains("mysql://db"));
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("Question 9".to_string()).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
