use base64::{Engine as _, engine::general_purpose};

use crate::domain::common::entities::app_errors::CoreError;

/// Maximum accepted decoded image size (10MB).
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AnalyzeFoodInput {
    /// Raw client-supplied data URL, `data:image/<subtype>;base64,<payload>`.
    pub image: String,
}

/// Image bytes extracted from a base64 data URL.
///
/// The declared image subtype is validated but not carried further: the
/// provider request always declares `image/jpeg`, matching the upstream
/// product behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data: Vec<u8>,
}

impl ImagePayload {
    /// Parses and bounds a data URL. Oversized payloads are rejected, never
    /// truncated, and the prefix is checked before any decoding happens.
    pub fn parse(image: &str) -> Result<Self, CoreError> {
        if !image.starts_with("data:image/") {
            return Err(CoreError::InvalidImageFormat);
        }

        // Metadata and payload, split on the first comma.
        let (_, base64_data) = image
            .split_once(',')
            .ok_or(CoreError::InvalidDataUrl)?;

        let base64_data = base64_data.trim();
        if base64_data.is_empty() {
            return Err(CoreError::EmptyImageData);
        }

        let data = general_purpose::STANDARD
            .decode(base64_data)
            .map_err(|_| CoreError::InvalidImageEncoding)?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(CoreError::ImageTooLarge);
        }

        Ok(Self { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_url(bytes: &[u8]) -> String {
        format!(
            "data:image/jpeg;base64,{}",
            general_purpose::STANDARD.encode(bytes)
        )
    }

    #[test]
    fn test_parse_valid_data_url() {
        let payload = ImagePayload::parse(&data_url(b"fake jpeg bytes")).unwrap();
        assert_eq!(payload.data, b"fake jpeg bytes");
    }

    #[test]
    fn test_rejects_missing_prefix() {
        let err = ImagePayload::parse("not-a-data-url").unwrap_err();
        assert_eq!(err, CoreError::InvalidImageFormat);
    }

    #[test]
    fn test_rejects_non_image_data_url() {
        let err = ImagePayload::parse("data:text/plain;base64,aGVsbG8=").unwrap_err();
        assert_eq!(err, CoreError::InvalidImageFormat);
    }

    #[test]
    fn test_rejects_missing_comma() {
        let err = ImagePayload::parse("data:image/png;base64").unwrap_err();
        assert_eq!(err, CoreError::InvalidDataUrl);
    }

    #[test]
    fn test_rejects_empty_payload() {
        let err = ImagePayload::parse("data:image/png;base64,").unwrap_err();
        assert_eq!(err, CoreError::EmptyImageData);

        let err = ImagePayload::parse("data:image/png;base64,   ").unwrap_err();
        assert_eq!(err, CoreError::EmptyImageData);
    }

    #[test]
    fn test_rejects_undecodable_payload() {
        let err = ImagePayload::parse("data:image/png;base64,!!!not-base64!!!").unwrap_err();
        assert_eq!(err, CoreError::InvalidImageEncoding);
    }

    #[test]
    fn test_rejects_oversized_image() {
        let err = ImagePayload::parse(&data_url(&vec![0u8; MAX_IMAGE_SIZE + 1])).unwrap_err();
        assert_eq!(err, CoreError::ImageTooLarge);
    }

    #[test]
    fn test_accepts_image_at_size_limit() {
        let payload = ImagePayload::parse(&data_url(&vec![0u8; MAX_IMAGE_SIZE])).unwrap();
        assert_eq!(payload.data.len(), MAX_IMAGE_SIZE);
    }
}
