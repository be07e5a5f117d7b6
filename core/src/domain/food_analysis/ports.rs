use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{FoodAnalysis, ProviderOutcome},
        value_objects::AnalyzeFoodInput,
    },
};

/// Client trait for the external vision-language provider.
#[cfg_attr(test, mockall::automock)]
pub trait VisionClient: Send + Sync {
    /// Submits one prompt-plus-image request and classifies the provider's
    /// answer. `Err` is reserved for configuration failures; every provider
    /// behavior maps to a [`ProviderOutcome`] variant.
    fn analyze_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
    ) -> impl Future<Output = Result<ProviderOutcome, CoreError>> + Send;
}

/// Service trait for food analysis business logic.
#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_food(
        &self,
        input: AnalyzeFoodInput,
    ) -> impl Future<Output = Result<FoodAnalysis, CoreError>> + Send;
}
