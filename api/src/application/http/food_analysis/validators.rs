use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the analyze-food endpoint. Deserialized manually in the handler so
/// admission failures map to the exact status codes of the public contract.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeFoodImageRequest {
    /// Base64 data URL, `data:image/<subtype>;base64,<payload>`.
    pub image: String,
}
