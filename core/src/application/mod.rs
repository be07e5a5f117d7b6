use crate::{
    domain::common::{NutrilensConfig, services::Service},
    infrastructure::llm::GeminiVisionClient,
};

pub type NutrilensService = Service<GeminiVisionClient>;

/// Wires the domain service to its concrete infrastructure adapters.
pub fn create_service(config: NutrilensConfig) -> NutrilensService {
    let vision_client =
        GeminiVisionClient::new(config.llm.gemini_api_key, config.llm.gemini_model);

    Service::new(vision_client)
}
