//! HTTP layer for the Gemini generateContent API

use base64::Engine as _;
use reqwest::StatusCode;
use serde_json::{json, Value};

use formcheck_types::{Credential, Error, ImageMime, Result};

use crate::models::GeminiResponse;

/// Base endpoint of the Gemini REST API
pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model identifier used when no override is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variable consulted when no explicit API key is supplied
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Client bound to one credential and one model identifier.
///
/// Credential validity is only discovered at call time; construction never
/// contacts the service.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(credential: &Credential) -> Self {
        Self {
            api_key: credential.as_str().to_string(),
            endpoint: GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Issue the single generateContent call and return the response text
    pub async fn generate(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: ImageMime,
    ) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        let body = build_request_body(prompt, image_bytes, mime_type);

        let client = reqwest::Client::new();
        let response = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::RemoteService(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| Error::RemoteService(format!("Reading response body failed: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status, &response_text));
        }

        let response: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
            Error::RemoteService(format!(
                "Failed to decode Gemini response JSON: {}. Raw response: {}",
                e, response_text
            ))
        })?;

        response_to_text(&response)
    }
}

/// Build the generateContent request body: prompt text plus one inline image part
pub fn build_request_body(prompt: &str, image_bytes: &[u8], mime_type: ImageMime) -> Value {
    let data = base64::engine::general_purpose::STANDARD.encode(image_bytes);
    json!({
        "contents": [{
            "role": "user",
            "parts": [
                { "text": prompt },
                { "inlineData": { "mimeType": mime_type.as_str(), "data": data } }
            ]
        }]
    })
}

/// Map a non-success HTTP status to the error taxonomy
fn status_error(status: StatusCode, body: &str) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::Authentication(format!("status {}: {}", status.as_u16(), body))
        }
        _ => Error::RemoteService(format!("status {}: {}", status.as_u16(), body)),
    }
}

/// Concatenate the text parts of the first candidate
pub fn response_to_text(response: &GeminiResponse) -> Result<String> {
    if let Some(candidate) = response.candidates.first() {
        let mut full_text = String::new();
        for part in &candidate.content.parts {
            if let Some(text) = &part.text {
                full_text.push_str(text);
            }
        }
        Ok(full_text)
    } else {
        Err(Error::RemoteService("No candidates found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response(json_text: &str) -> GeminiResponse {
        serde_json::from_str(json_text).expect("sample response should decode")
    }

    #[test]
    fn request_body_carries_text_then_inline_image() {
        let body = build_request_body("נתח את התמונה", &[1, 2, 3], ImageMime::Png);

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "נתח את התמונה");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        // STANDARD base64 of [1, 2, 3]
        assert_eq!(parts[1]["inlineData"]["data"], "AQID");
        assert_eq!(body["contents"][0]["role"], "user");
    }

    #[test]
    fn response_text_concatenates_first_candidate_parts() {
        let response = sample_response(
            r####"{
                "candidates": [{
                    "content": {
                        "parts": [
                            {"text": "### Section A\n"},
                            {"text": "### Section B"}
                        ],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }]
            }"####,
        );

        let text = response_to_text(&response).unwrap();
        assert_eq!(text, "### Section A\n### Section B");
    }

    #[test]
    fn empty_candidates_is_a_remote_service_error() {
        let response = sample_response(r#"{"candidates": []}"#);
        let result = response_to_text(&response);
        assert!(matches!(result, Err(Error::RemoteService(_))));
    }

    #[test]
    fn unauthorized_status_maps_to_authentication() {
        let error = status_error(StatusCode::UNAUTHORIZED, "API key not valid");
        match error {
            Error::Authentication(message) => assert!(message.contains("API key not valid")),
            other => panic!("expected Authentication, got {:?}", other),
        }

        let error = status_error(StatusCode::FORBIDDEN, "denied");
        assert!(matches!(error, Error::Authentication(_)));
    }

    #[test]
    fn other_statuses_map_to_remote_service() {
        let error = status_error(StatusCode::INTERNAL_SERVER_ERROR, "backend unavailable");
        match error {
            Error::RemoteService(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("backend unavailable"));
            }
            other => panic!("expected RemoteService, got {:?}", other),
        }
    }

    #[test]
    fn client_builder_overrides() {
        let credential = Credential::from_sources(Some("k".to_string()), None).unwrap();
        let client = GeminiClient::new(&credential).with_model("gemini-2.5-pro");
        assert_eq!(client.model(), "gemini-2.5-pro");
    }
}
