use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use nutrilens_core::domain::common::entities::app_errors::CoreError;

/// JSON envelope carried by every non-success response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    RequestTimeout(String),

    /// Provider-reported failure surfaced with the provider's own status.
    #[error("{1}")]
    Upstream(StatusCode, String),

    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::RequestTimeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Upstream(status, _) => *status,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidImageFormat
            | CoreError::InvalidDataUrl
            | CoreError::EmptyImageData
            | CoreError::InvalidImageEncoding
            | CoreError::ContentBlocked => ApiError::BadRequest(error.to_string()),
            CoreError::ImageTooLarge => ApiError::PayloadTooLarge(error.to_string()),
            CoreError::Misconfigured(detail) => {
                // Operator error: the detail stays in server logs, the client
                // gets a generic message.
                tracing::error!("service misconfigured: {detail}");
                ApiError::InternalServerError(
                    "The analysis service is not configured. Please try again later.".to_string(),
                )
            }
            CoreError::NoAnalysisResults | CoreError::NoTextContent => {
                ApiError::InternalServerError(error.to_string())
            }
            CoreError::ProviderError { status, message } => ApiError::Upstream(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            ),
            CoreError::ProviderTimeout => ApiError::RequestTimeout(error.to_string()),
            CoreError::ExternalServiceError(detail) => {
                tracing::error!("provider call failed: {detail}");
                ApiError::InternalServerError(
                    "Failed to analyze the image. Please try again.".to_string(),
                )
            }
        }
    }
}
