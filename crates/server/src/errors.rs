use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ApiResponse;
use service::errors::ServiceError;
use tracing::{error, warn};

/// Failure rendered as the `{success:false, error, message}` envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self { status, error, message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => ApiError::validation(msg),
            ServiceError::NotFound(msg) => ApiError::new(StatusCode::NOT_FOUND, "Not Found", msg),
            ServiceError::Storage(msg) => {
                // Driver details stay in the log, callers get a generic message
                error!(err = %msg, "survey storage failure");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error", "storage error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(err = %rejection.body_text(), "rejected request body");
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(err = %rejection.body_text(), "rejected query string");
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::failure(self.error, self.message);
        (self.status, Json(body)).into_response()
    }
}
