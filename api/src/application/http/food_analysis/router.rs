use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::analyze_food_image::{__path_analyze_food_image, analyze_food_image};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_food_image))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/analyze-food", state.args.server.root_path),
        post(analyze_food_image),
    )
}
