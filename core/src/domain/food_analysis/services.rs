use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{
        entities::{FoodAnalysis, ProviderOutcome},
        helpers::sanitize_html,
        ports::{FoodAnalysisService, VisionClient},
        prompt::ANALYSIS_PROMPT,
        value_objects::{AnalyzeFoodInput, ImagePayload},
    },
};

impl<V> FoodAnalysisService for Service<V>
where
    V: VisionClient,
{
    async fn analyze_food(&self, input: AnalyzeFoodInput) -> Result<FoodAnalysis, CoreError> {
        // Admission happens before any provider work: an invalid or oversized
        // payload never reaches the outbound call.
        let payload = ImagePayload::parse(&input.image)?;

        let outcome = self
            .vision_client
            .analyze_image(ANALYSIS_PROMPT.to_string(), payload.data)
            .await?;

        match outcome {
            ProviderOutcome::Success { text } => {
                let analysis = FoodAnalysis::new(sanitize_html(&text));
                tracing::info!(analysis_id = %analysis.id, "food analysis completed");
                Ok(analysis)
            }
            ProviderOutcome::SafetyBlocked { reason } => {
                tracing::error!("content blocked by provider: {reason}");
                Err(CoreError::ContentBlocked)
            }
            ProviderOutcome::NoCandidates => Err(CoreError::NoAnalysisResults),
            ProviderOutcome::NoTextContent => Err(CoreError::NoTextContent),
            ProviderOutcome::Upstream { status, message } => {
                Err(CoreError::ProviderError { status, message })
            }
            ProviderOutcome::Timeout => Err(CoreError::ProviderTimeout),
            ProviderOutcome::Transport { detail } => Err(CoreError::ExternalServiceError(detail)),
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, engine::general_purpose};

    use super::*;
    use crate::domain::food_analysis::{
        ports::MockVisionClient, value_objects::MAX_IMAGE_SIZE,
    };

    fn data_url(bytes: &[u8]) -> String {
        format!(
            "data:image/jpeg;base64,{}",
            general_purpose::STANDARD.encode(bytes)
        )
    }

    fn input(image: impl Into<String>) -> AnalyzeFoodInput {
        AnalyzeFoodInput {
            image: image.into(),
        }
    }

    #[tokio::test]
    async fn test_oversized_image_never_reaches_provider() {
        // No expectations set: any provider call panics the test.
        let service = Service::new(MockVisionClient::new());

        let result = service
            .analyze_food(input(data_url(&vec![0u8; MAX_IMAGE_SIZE + 1])))
            .await;

        assert_eq!(result.unwrap_err(), CoreError::ImageTooLarge);
    }

    #[tokio::test]
    async fn test_bad_prefix_never_reaches_provider() {
        let service = Service::new(MockVisionClient::new());

        let result = service.analyze_food(input("not-a-data-url")).await;

        assert_eq!(result.unwrap_err(), CoreError::InvalidImageFormat);
    }

    #[tokio::test]
    async fn test_success_text_is_sanitized() {
        let mut client = MockVisionClient::new();
        client.expect_analyze_image().returning(|_, _| {
            Box::pin(std::future::ready(Ok(ProviderOutcome::Success {
                text: "**Food:** <strong>Bagel</strong> & butter".to_string(),
            })))
        });
        let service = Service::new(client);

        let analysis = service
            .analyze_food(input(data_url(b"jpeg")))
            .await
            .unwrap();

        assert_eq!(
            analysis.analysis,
            "**Food:** &lt;strong&gt;Bagel&lt;/strong&gt; &amp; butter"
        );
        assert!(!analysis.analysis.contains('<'));
        assert!(!analysis.analysis.contains('>'));
    }

    #[tokio::test]
    async fn test_provider_receives_fixed_prompt_and_image_bytes() {
        let mut client = MockVisionClient::new();
        client
            .expect_analyze_image()
            .withf(|prompt, image_data| {
                prompt.starts_with("You are a nutritional analysis expert")
                    && image_data == b"jpeg bytes"
            })
            .returning(|_, _| {
                Box::pin(std::future::ready(Ok(ProviderOutcome::Success {
                    text: "ok".to_string(),
                })))
            });
        let service = Service::new(client);

        service
            .analyze_food(input(data_url(b"jpeg bytes")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_safety_block_maps_to_content_blocked() {
        let mut client = MockVisionClient::new();
        client.expect_analyze_image().returning(|_, _| {
            Box::pin(std::future::ready(Ok(ProviderOutcome::SafetyBlocked {
                reason: "SAFETY".to_string(),
            })))
        });
        let service = Service::new(client);

        let result = service.analyze_food(input(data_url(b"jpeg"))).await;

        assert_eq!(result.unwrap_err(), CoreError::ContentBlocked);
    }

    #[tokio::test]
    async fn test_no_candidates_maps_to_no_analysis_results() {
        let mut client = MockVisionClient::new();
        client
            .expect_analyze_image()
            .returning(|_, _| Box::pin(std::future::ready(Ok(ProviderOutcome::NoCandidates))));
        let service = Service::new(client);

        let result = service.analyze_food(input(data_url(b"jpeg"))).await;

        assert_eq!(result.unwrap_err(), CoreError::NoAnalysisResults);
    }

    #[tokio::test]
    async fn test_no_text_maps_to_no_text_content() {
        let mut client = MockVisionClient::new();
        client
            .expect_analyze_image()
            .returning(|_, _| Box::pin(std::future::ready(Ok(ProviderOutcome::NoTextContent))));
        let service = Service::new(client);

        let result = service.analyze_food(input(data_url(b"jpeg"))).await;

        assert_eq!(result.unwrap_err(), CoreError::NoTextContent);
    }

    #[tokio::test]
    async fn test_upstream_error_keeps_provider_status_and_message() {
        let mut client = MockVisionClient::new();
        client.expect_analyze_image().returning(|_, _| {
            Box::pin(std::future::ready(Ok(ProviderOutcome::Upstream {
                status: 429,
                message: "Resource has been exhausted".to_string(),
            })))
        });
        let service = Service::new(client);

        let result = service.analyze_food(input(data_url(b"jpeg"))).await;

        assert_eq!(
            result.unwrap_err(),
            CoreError::ProviderError {
                status: 429,
                message: "Resource has been exhausted".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_timeout_maps_to_provider_timeout() {
        let mut client = MockVisionClient::new();
        client
            .expect_analyze_image()
            .returning(|_, _| Box::pin(std::future::ready(Ok(ProviderOutcome::Timeout))));
        let service = Service::new(client);

        let result = service.analyze_food(input(data_url(b"jpeg"))).await;

        assert_eq!(result.unwrap_err(), CoreError::ProviderTimeout);
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_external_service_error() {
        let mut client = MockVisionClient::new();
        client.expect_analyze_image().returning(|_, _| {
            Box::pin(std::future::ready(Ok(ProviderOutcome::Transport {
                detail: "connection reset".to_string(),
            })))
        });
        let service = Service::new(client);

        let result = service.analyze_food(input(data_url(b"jpeg"))).await;

        assert_eq!(
            result.unwrap_err(),
            CoreError::ExternalServiceError("connection reset".to_string())
        );
    }

    #[tokio::test]
    async fn test_misconfiguration_propagates() {
        let mut client = MockVisionClient::new();
        client.expect_analyze_image().returning(|_, _| {
            Box::pin(std::future::ready(Err(CoreError::Misconfigured(
                "GEMINI_API_KEY is not set".to_string(),
            ))))
        });
        let service = Service::new(client);

        let result = service.analyze_food(input(data_url(b"jpeg"))).await;

        assert_eq!(
            result.unwrap_err(),
            CoreError::Misconfigured("GEMINI_API_KEY is not set".to_string())
        );
    }
}
