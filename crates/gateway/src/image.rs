//! One-shot image generation via `models/{model}:generateContent`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::chat::{Content, GenerateContentRequest, GenerateContentResponse};
use crate::error::GatewayError;
use crate::Gateway;

/// Output resolution tier, carried verbatim on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeTier {
    #[default]
    OneK,
    TwoK,
    FourK,
}

impl SizeTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneK => "1K",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }

    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::OneK => Self::TwoK,
            Self::TwoK => Self::FourK,
            Self::FourK => Self::OneK,
        }
    }
}

/// A decoded image returned by the model.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
    image_size: &'static str,
}

impl Gateway {
    /// Asks the image model for a square rendering of `prompt`.
    ///
    /// A reply that carries no inline image data is `Ok(None)`, not an
    /// error; the model may answer with text only.
    pub async fn generate_image(
        &self,
        prompt: &str,
        size: SizeTier,
    ) -> Result<Option<GeneratedImage>, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(None, prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: "1:1",
                    image_size: size.as_str(),
                },
            }),
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.image_model
        );
        let res = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(GatewayError::from_status(status, crate::error_message(&body)));
        }

        let body = res.text().await?;
        let image = decode_image(&body)?;
        if let Some(image) = &image {
            tracing::debug!(bytes = image.bytes.len(), mime = %image.mime_type, "image decoded");
        }
        Ok(image)
    }
}

/// Scans the first candidate's parts for inline data and decodes it.
fn decode_image(body: &str) -> Result<Option<GeneratedImage>, GatewayError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|err| GatewayError::Decode(err.to_string()))?;
    let Some(content) = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
    else {
        return Ok(None);
    };
    for part in content.parts {
        if let Some(inline) = part.inline_data {
            let bytes = BASE64
                .decode(inline.data.as_bytes())
                .map_err(|err| GatewayError::Decode(err.to_string()))?;
            return Ok(Some(GeneratedImage {
                bytes,
                mime_type: inline.mime_type.unwrap_or_else(|| "image/png".to_string()),
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_tier_wire_values() {
        assert_eq!(SizeTier::OneK.as_str(), "1K");
        assert_eq!(SizeTier::TwoK.as_str(), "2K");
        assert_eq!(SizeTier::FourK.as_str(), "4K");
        assert_eq!(SizeTier::FourK.cycle(), SizeTier::OneK);
    }

    #[test]
    fn decodes_inline_data_after_text_part() {
        // "PNG!" base64-encoded.
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "here you go"},
                        {"inlineData": {"mimeType": "image/png", "data": "UE5HIQ=="}}
                    ]
                }
            }]
        }"#;
        let image = decode_image(body).unwrap().unwrap();
        assert_eq!(image.bytes, b"PNG!");
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn text_only_reply_is_none() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "sorry"}]}}]}"#;
        assert!(decode_image(body).unwrap().is_none());
    }

    #[test]
    fn missing_mime_type_defaults_to_png() {
        let body = r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "UE5HIQ=="}}]}}]}"#;
        let image = decode_image(body).unwrap().unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn invalid_base64_is_a_decode_error() {
        let body = r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "!!"}}]}}]}"#;
        assert!(matches!(decode_image(body), Err(GatewayError::Decode(_))));
    }
}
