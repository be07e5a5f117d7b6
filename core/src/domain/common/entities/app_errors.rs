use thiserror::Error;

/// Domain-level failure taxonomy. Client input errors carry their final
/// client-facing message; provider and configuration failures keep detail for
/// server-side logs and are translated to bounded messages at the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid image format - must be a data URL")]
    InvalidImageFormat,

    #[error("Invalid image data URL format")]
    InvalidDataUrl,

    #[error("Empty image data")]
    EmptyImageData,

    #[error("Invalid base64 image data")]
    InvalidImageEncoding,

    #[error("Image too large - maximum allowed size is 10MB")]
    ImageTooLarge,

    #[error("service misconfigured: {0}")]
    Misconfigured(String),

    #[error("The request was blocked for safety reasons. Please try a different image.")]
    ContentBlocked,

    #[error("No analysis results returned from the AI model. Please try a different image.")]
    NoAnalysisResults,

    #[error("No text content in the AI model response. Please try a different image.")]
    NoTextContent,

    #[error("{message}")]
    ProviderError { status: u16, message: String },

    #[error("The request timed out. Please try again with a smaller image.")]
    ProviderTimeout,

    #[error("external service error: {0}")]
    ExternalServiceError(String),
}
