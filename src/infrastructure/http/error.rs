//! HTTP Error Handling
//!
//! - `ApiError`: JSON 接口，统一 `{errno, error, data}` 格式，HTTP 状态码总是 200
//! - `PageError`: HTML 页面，终止本次渲染并显示提示页

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ports::ReaderPreferences;
use crate::application::ApplicationError;
use crate::infrastructure::render::message_page;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match &self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno::NOT_FOUND, error = %msg, "Resource not found");
                ErrorResponse::new(errno::NOT_FOUND, msg.clone())
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno::BAD_REQUEST, error = %msg, "Bad request");
                ErrorResponse::new(errno::BAD_REQUEST, msg.clone())
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                ErrorResponse::new(errno::INTERNAL_ERROR, msg.clone())
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(errno = errno::SERVICE_UNAVAILABLE, error = %msg, "Service unavailable");
                ErrorResponse::new(errno::SERVICE_UNAVAILABLE, msg.clone())
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} not found: {}", resource_type, id))
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::EmptyCatalog => ApiError::NotFound(e.to_string()),
            ApplicationError::NotConfigured
            | ApplicationError::StorageUnavailable(_)
            | ApplicationError::FeatureDisabled(_)
            | ApplicationError::ExternalServiceError(_) => ApiError::ServiceUnavailable(e.to_string()),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

/// HTML 页面错误
#[derive(Debug)]
pub struct PageError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: String,
    pub preferences: ReaderPreferences,
}

impl PageError {
    pub fn from_application(err: ApplicationError, preferences: ReaderPreferences) -> Self {
        let (status, title, message) = match &err {
            ApplicationError::NotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Storage not configured",
                "No database address is configured. Set READER_DATABASE__URL and reload.".to_string(),
            ),
            ApplicationError::StorageUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Storage unavailable",
                "The database connection could not be re-established. Please try again.".to_string(),
            ),
            ApplicationError::EmptyCatalog => (
                StatusCode::OK,
                "No novels",
                "No novels available.".to_string(),
            ),
            ApplicationError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not found", err.to_string()),
            ApplicationError::ValidationError(_) => {
                (StatusCode::BAD_REQUEST, "Invalid request", err.to_string())
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                err.to_string(),
            ),
        };

        tracing::warn!(status = status.as_u16(), error = %err, "Page rendering halted");

        Self {
            status,
            title,
            message,
            preferences,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (
            self.status,
            Html(message_page(self.title, &self.message, &self.preferences)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_mapping() {
        assert!(matches!(
            ApiError::from(ApplicationError::not_found("Novel", "x")),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::NotConfigured),
            ApiError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::validation("bad")),
            ApiError::BadRequest(_)
        ));
    }

    #[test]
    fn test_page_error_statuses() {
        let prefs = ReaderPreferences::default();
        let empty = PageError::from_application(ApplicationError::EmptyCatalog, prefs);
        assert_eq!(empty.status, StatusCode::OK);
        assert_eq!(empty.message, "No novels available.");

        let missing = PageError::from_application(ApplicationError::NotConfigured, prefs);
        assert_eq!(missing.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
