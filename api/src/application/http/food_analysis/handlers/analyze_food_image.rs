use axum::{
    extract::{Request, State},
    http::header::{CONTENT_LENGTH, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    food_analysis::validators::AnalyzeFoodImageRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};
use nutrilens_core::domain::food_analysis::{
    ports::FoodAnalysisService,
    value_objects::{AnalyzeFoodInput, MAX_IMAGE_SIZE},
};

/// Upper bound on the collected request body. A 10MB image grows by ~4/3
/// under base64, plus the JSON wrapper.
const BODY_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeFoodResponse {
    /// HTML-entity-escaped analysis text.
    pub analysis: String,
}

#[utoipa::path(
    post,
    path = "/analyze-food",
    tag = "food-analysis",
    summary = "Analyze food from a photo",
    description = "Analyzes the food shown in a base64 data URL image using LLM vision",
    request_body = AnalyzeFoodImageRequest,
    responses(
        (status = 200, body = AnalyzeFoodResponse),
        (status = 400, body = ErrorResponse),
        (status = 408, body = ErrorResponse),
        (status = 413, body = ErrorResponse),
        (status = 415, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    ),
)]
pub async fn analyze_food_image(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response<AnalyzeFoodResponse>, ApiError> {
    // The declared length is checked before the body is read; the decoded
    // size check in the domain layer stays authoritative when the header is
    // absent or wrong.
    if let Some(declared) = request.headers().get(CONTENT_LENGTH) {
        let declared: usize = declared
            .to_str()
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(0);

        if declared > MAX_IMAGE_SIZE {
            return Err(ApiError::PayloadTooLarge(
                "Request body too large - maximum allowed size is 10MB".to_string(),
            ));
        }
    }

    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if !content_type.contains("application/json") {
        return Err(ApiError::UnsupportedMediaType(
            "Invalid content type - application/json required".to_string(),
        ));
    }

    let body = axum::body::to_bytes(request.into_body(), BODY_LIMIT)
        .await
        .map_err(|_| {
            ApiError::PayloadTooLarge(
                "Request body too large - maximum allowed size is 10MB".to_string(),
            )
        })?;

    let payload: AnalyzeFoodImageRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("No image provided".to_string()))?;

    if payload.image.is_empty() {
        return Err(ApiError::BadRequest("No image provided".to_string()));
    }

    let result = state
        .service
        .analyze_food(AnalyzeFoodInput {
            image: payload.image,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeFoodResponse {
        analysis: result.analysis,
    }))
}
