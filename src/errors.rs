// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and error code
#[derive(Error, Debug)]
pub enum ShopMapError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,

    #[error("Shop search endpoint error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ShopMapError {
    fn error_code(&self) -> &'static str {
        match self {
            ShopMapError::InvalidInput(_) => "INVALID_INPUT",
            ShopMapError::ValidationError(_) => "VALIDATION_ERROR",
            ShopMapError::Unauthorized => "UNAUTHORIZED",
            ShopMapError::Forbidden => "FORBIDDEN",
            ShopMapError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            ShopMapError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ShopMapError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

/// Convert ShopMapError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for ShopMapError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ShopMapError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ShopMapError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ShopMapError::Unauthorized => StatusCode::UNAUTHORIZED,
            ShopMapError::Forbidden => StatusCode::FORBIDDEN,
            ShopMapError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            ShopMapError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ShopMapError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ShopMapError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ShopMapError::ExternalApiError("down".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ShopMapError::RateLimitExceeded.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_error_response_body() {
        let response = ShopMapError::Forbidden.error_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
