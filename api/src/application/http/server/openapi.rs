use crate::application::http::food_analysis::handlers::analyze_food_image::__path_analyze_food_image;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nutrilens API"
    ),
    paths(analyze_food_image)
)]
pub struct ApiDoc;
