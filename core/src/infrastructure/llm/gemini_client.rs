use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{entities::ProviderOutcome, ports::VisionClient},
};

/// Total deadline for one provider call. The in-flight request is cancelled
/// when the timer fires; there is no retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Generation parameters sent with every request.
const TEMPERATURE: f64 = 0.2;
const TOP_K: i32 = 32;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: i32 = 800;

/// Harm categories all blocked at medium and above.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Raw-body excerpt length surfaced to clients when a provider error response
/// is not parseable JSON. Full bodies stay in the server logs.
const ERROR_EXCERPT_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct GeminiVisionClient {
    api_key: Option<String>,
    model_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    top_k: i32,
    top_p: f64,
    max_output_tokens: i32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(default, rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// Builds the fixed-shape provider request: constant prompt parameters,
/// constant safety thresholds, image inlined as base64. The MIME type always
/// declares JPEG regardless of the client's image subtype, matching the
/// upstream product behavior.
fn build_request(prompt: String, image_data: &[u8]) -> GeminiRequest {
    let base64_image = general_purpose::STANDARD.encode(image_data);

    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text { text: prompt },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/jpeg".to_string(),
                        data: base64_image,
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
        safety_settings: SAFETY_CATEGORIES
            .iter()
            .map(|&category| SafetySetting {
                category,
                threshold: SAFETY_THRESHOLD,
            })
            .collect(),
    }
}

/// Classifies a non-success provider response body. A parseable error message
/// is surfaced verbatim; anything else becomes a bounded raw-text excerpt.
fn classify_error_body(status: u16, body: &str) -> ProviderOutcome {
    match serde_json::from_str::<GeminiErrorBody>(body) {
        Ok(parsed) => ProviderOutcome::Upstream {
            status,
            message: parsed.error.message,
        },
        Err(_) => {
            let excerpt: String = body.chars().take(ERROR_EXCERPT_LEN).collect();
            ProviderOutcome::Upstream {
                status,
                message: format!("Error from Gemini API: {excerpt}..."),
            }
        }
    }
}

/// Classifies a success-status provider response body.
///
/// The safety-block check runs before candidate inspection: a blocked prompt
/// legitimately has no candidates and must not be reported as malformed.
fn classify_body(body: &str) -> ProviderOutcome {
    let response: GeminiResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("failed to parse Gemini response: {e} - {body}");
            return ProviderOutcome::Transport {
                detail: format!("failed to parse provider response: {e}"),
            };
        }
    };

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return ProviderOutcome::SafetyBlocked {
            reason: reason.to_string(),
        };
    }

    let Some(candidate) = response.candidates.first() else {
        tracing::error!("no candidates in Gemini response: {body}");
        return ProviderOutcome::NoCandidates;
    };

    let text = candidate
        .content
        .as_ref()
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone());

    match text {
        Some(text) if !text.is_empty() => ProviderOutcome::Success { text },
        _ => {
            tracing::error!("no text content in Gemini candidate: {body}");
            ProviderOutcome::NoTextContent
        }
    }
}

impl GeminiVisionClient {
    pub fn new(api_key: Option<String>, model_name: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key,
            model_name,
            client,
        }
    }

    async fn call_gemini_api(&self, request: &GeminiRequest) -> Result<ProviderOutcome, CoreError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("GEMINI_API_KEY is not configured");
            CoreError::Misconfigured("GEMINI_API_KEY is not set".to_string())
        })?;

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model_name, api_key
        );

        let response = match self.client.post(&url).json(request).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::error!("Gemini API request timed out after {REQUEST_TIMEOUT:?}");
                return Ok(ProviderOutcome::Timeout);
            }
            Err(e) => {
                tracing::error!("Gemini API request failed: {e}");
                return Ok(ProviderOutcome::Transport {
                    detail: format!("LLM API error: {e}"),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {status} - {error_text}");
            return Ok(classify_error_body(status.as_u16(), &error_text));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                tracing::error!("Gemini API response timed out after {REQUEST_TIMEOUT:?}");
                return Ok(ProviderOutcome::Timeout);
            }
            Err(e) => {
                tracing::error!("failed to read Gemini response body: {e}");
                return Ok(ProviderOutcome::Transport {
                    detail: format!("failed to read provider response: {e}"),
                });
            }
        };

        Ok(classify_body(&body))
    }
}

impl VisionClient for GeminiVisionClient {
    async fn analyze_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
    ) -> Result<ProviderOutcome, CoreError> {
        let request = build_request(prompt, &image_data);
        self.call_gemini_api(&request).await
    }
}
