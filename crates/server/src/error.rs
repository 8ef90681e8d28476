use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::{error, warn};
use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable message
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    BadRequest(String),
    Unauthorized,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Service(ServiceError::NotFound(_)) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Service(ServiceError::Validation(_)) | Self::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            Self::Service(ServiceError::Conflict(_)) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Service(ServiceError::Storage(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_UNAVAILABLE")
            }
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            Self::Service(ServiceError::Storage(e)) => {
                error!("Storage error: {e}");
                // Do not leak driver details to the client
                "storage unavailable".to_string()
            }
            Self::Service(e) => {
                warn!("Request rejected: {e}");
                e.to_string()
            }
            Self::BadRequest(message) => message,
            Self::Unauthorized => "missing subject in token".to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                error: code.to_string(),
                message,
            }),
        )
            .into_response()
    }
}
