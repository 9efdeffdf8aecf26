/// Client for the remote generative-image service
///
/// One request per remix: the uploaded photo (base64) followed by the
/// template's resolved instruction, asking for an image-typed response.
/// The first inline-image part of the response is reassembled into a
/// data URI. No retries happen here; retrying is always an explicit
/// user action upstream.

use base64::engine::general_purpose;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::catalog::Template;
use crate::upload::UploadedPhoto;

/// The image editing model. It accepts both an image and a text prompt
/// as input.
const GENERATION_MODEL: &str = "gemini-2.5-flash-image";

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the service credential.
const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Placeholder token template authors use to refer to the uploaded
/// subject. Everything else in a prompt is sent verbatim.
const SUBJECT_PLACEHOLDER: &str = "{input person}";
const SUBJECT_PHRASE: &str = "The person in the provided photo";

/// Why a generation run failed. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("GEMINI_API_KEY environment variable is not set.")]
    MissingCredential,

    #[error("The model used for remixing is currently unavailable. Please try again later.")]
    ModelUnavailable,

    #[error("No image was generated. The response may have been blocked.")]
    EmptyResponse,

    #[error("Failed to generate image. Please try again or use a different photo.")]
    RequestFailed,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl Part {
    fn from_photo(photo: &UploadedPhoto) -> Self {
        Part {
            inline_data: Some(InlineData {
                mime_type: photo.format.mime_type().to_string(),
                data: general_purpose::STANDARD.encode(photo.bytes.as_slice()),
            }),
            text: None,
        }
    }

    fn from_text(text: String) -> Self {
        Part {
            inline_data: None,
            text: Some(text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// Substitute every occurrence of the subject placeholder, leaving the
/// rest of the prompt untouched.
pub fn resolve_prompt(prompt: &str) -> String {
    prompt.replace(SUBJECT_PLACEHOLDER, SUBJECT_PHRASE)
}

/// The first part carrying inline image data, reassembled as a data URI.
fn first_inline_image(response: &GenerateResponse) -> Option<String> {
    response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .find_map(|part| part.inline_data.as_ref())
        .map(|inline| format!("data:{};base64,{}", inline.mime_type, inline.data))
}

/// A service error mentioning a missing model is a recognized transient
/// condition; everything else gets the generic retry message.
fn classify_service_error(message: &str) -> GenerateError {
    if message.contains("not found") {
        GenerateError::ModelUnavailable
    } else {
        GenerateError::RequestFailed
    }
}

/// Split a data URI back into its MIME type and decoded payload.
pub fn parse_data_uri(uri: &str) -> Result<(String, Vec<u8>), String> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| "Not a data URI.".to_string())?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| "Data URI is not base64-encoded.".to_string())?;
    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| format!("Could not decode image data: {}", e))?;
    Ok((mime.to_string(), bytes))
}

/// Handle for talking to the generation service. Cheap to clone into a
/// request future.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl GenerationClient {
    /// Read the service credential from the environment. A missing key
    /// is only reported when a generation is actually attempted.
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_VAR).ok())
    }

    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Run one generation request and return the produced image as a
    /// data URI.
    pub async fn generate(
        &self,
        template: &Template,
        photo: &UploadedPhoto,
    ) -> Result<String, GenerateError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("no {} in the environment, refusing to dispatch", API_KEY_VAR);
            return Err(GenerateError::MissingCredential);
        };

        // The image goes first, followed by the instruction: the editing
        // model expects the photo it should work on before the text.
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::from_photo(photo),
                    Part::from_text(resolve_prompt(template.prompt)),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint, GENERATION_MODEL
        );

        tracing::info!(
            template = template.id,
            photo_bytes = photo.len(),
            "submitting remix request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "could not reach the generation service");
                classify_service_error(&e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            tracing::error!(%status, %message, "generation service returned an error");
            return Err(classify_service_error(&message));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "could not parse the generation response");
            GenerateError::RequestFailed
        })?;

        match first_inline_image(&parsed) {
            Some(data_uri) => {
                tracing::info!(template = template.id, "remix produced an image");
                Ok(data_uri)
            }
            None => {
                tracing::warn!(template = template.id, "response contained no image part");
                Err(GenerateError::EmptyResponse)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::upload::validate_photo;

    fn some_photo() -> UploadedPhoto {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        validate_photo(png.to_vec()).unwrap()
    }

    #[test]
    fn test_resolve_prompt_substitutes_every_occurrence() {
        let resolved = resolve_prompt("Make {input person} smile in {input person}'s style");
        assert_eq!(
            resolved,
            "Make The person in the provided photo smile in \
             The person in the provided photo's style"
        );
    }

    #[test]
    fn test_resolve_prompt_passes_other_text_through_verbatim() {
        let prompt = "A plain prompt with {another token} untouched";
        assert_eq!(resolve_prompt(prompt), prompt);
    }

    #[test]
    fn test_request_body_orders_image_before_instruction() {
        let photo = some_photo();
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::from_photo(&photo),
                    Part::from_text(resolve_prompt("Remix {input person}")),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert!(parts[0]["inlineData"]["data"].is_string());
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(
            parts[1]["text"],
            "Remix The person in the provided photo"
        );
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
    }

    #[test]
    fn test_first_inline_image_skips_text_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": "QUJD" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "WFla" } }
                    ]
                }
            }]
        }))
        .unwrap();

        assert_eq!(
            first_inline_image(&response).as_deref(),
            Some("data:image/png;base64,QUJD")
        );
    }

    #[test]
    fn test_response_without_image_parts_yields_nothing() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [ { "text": "blocked" } ] }
            }]
        }))
        .unwrap();
        assert!(first_inline_image(&response).is_none());

        let empty: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(first_inline_image(&empty).is_none());
    }

    #[test]
    fn test_service_errors_are_classified_by_message() {
        assert_eq!(
            classify_service_error("models/gemini-2.5-flash-image is not found for API version"),
            GenerateError::ModelUnavailable
        );
        assert_eq!(
            classify_service_error("internal error"),
            GenerateError::RequestFailed
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_dispatch() {
        let client = GenerationClient::new(None);
        let template = &catalog::templates()[0];
        let err = client.generate(template, &some_photo()).await.unwrap_err();
        assert_eq!(err, GenerateError::MissingCredential);
    }

    #[test]
    fn test_data_uri_round_trip() {
        let (mime, bytes) = parse_data_uri("data:image/png;base64,QUJD").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"ABC");

        assert!(parse_data_uri("http://example.com/a.png").is_err());
        assert!(parse_data_uri("data:image/png;base64,@@@").is_err());
    }
}
