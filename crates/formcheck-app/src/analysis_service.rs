//! Analysis service - the core use case for photo analysis
//!
//! Orchestrates one analysis interaction:
//! 1. Validate that an image was supplied
//! 2. Compose the instruction prompt for the configured template variant
//! 3. Issue the single multimodal model call
//! 4. Return the model's Markdown verbatim
//!
//! Nothing is persisted and nothing is retried; each invocation is
//! stateless and independent.

use formcheck_gemini::{GeminiBackend, GeminiClient};
use formcheck_prompt::{compose, PromptVariant};
use formcheck_types::{
    AnalysisBackend, AnalysisRequest, AnalysisResult, Credential, Error, Result,
};

/// Analyzer configuration
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub variant: PromptVariant,
    pub model: Option<String>,
}

impl AnalyzerConfig {
    pub fn with_variant(mut self, variant: PromptVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Analyze a photo with the real Gemini backend.
///
/// The credential must already be resolved; client construction itself never
/// contacts the service, so an invalid key only surfaces on the remote call.
pub fn analyze_photo(
    request: &AnalysisRequest,
    config: &AnalyzerConfig,
    credential: &Credential,
) -> Result<AnalysisResult> {
    let mut client = GeminiClient::new(credential);
    if let Some(ref model) = config.model {
        client = client.with_model(model);
    }

    let backend = GeminiBackend::new(client);
    analyze_photo_with_backend(request, config.variant, &backend)
}

/// Analyze a photo through an injected backend.
///
/// Fails with `Error::MissingInput` before the backend is touched when no
/// image bytes were supplied. The model's response text is returned
/// unmodified; the three-section contract requested by the prompt is
/// advisory to the model and is not validated here.
pub fn analyze_photo_with_backend(
    request: &AnalysisRequest,
    variant: PromptVariant,
    backend: &dyn AnalysisBackend,
) -> Result<AnalysisResult> {
    if request.image_bytes.is_empty() {
        return Err(Error::MissingInput);
    }

    let prompt = compose(variant, &request.context_question);
    let markdown_text = backend.send_prompt(&prompt, &request.image_bytes, request.mime_type)?;

    Ok(AnalysisResult { markdown_text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_prompt::fallback_question;
    use formcheck_types::ImageMime;
    use std::cell::{Cell, RefCell};

    /// Recording fake: counts calls, captures the wire prompt, returns a
    /// canned reply
    struct RecordingBackend {
        calls: Cell<usize>,
        last_prompt: RefCell<Option<String>>,
        reply: std::result::Result<String, String>,
    }

    impl RecordingBackend {
        fn replying(text: &str) -> Self {
            Self {
                calls: Cell::new(0),
                last_prompt: RefCell::new(None),
                reply: Ok(text.to_string()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: Cell::new(0),
                last_prompt: RefCell::new(None),
                reply: Err(message.to_string()),
            }
        }
    }

    impl AnalysisBackend for RecordingBackend {
        fn send_prompt(
            &self,
            prompt: &str,
            _image_bytes: &[u8],
            _mime_type: ImageMime,
        ) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = Some(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(Error::RemoteService(message.clone())),
            }
        }
    }

    fn jpeg_request(question: &str) -> AnalysisRequest {
        AnalysisRequest::new(vec![0xFF; 10], ImageMime::Jpeg, question)
    }

    #[test]
    fn result_is_passed_through_unmodified() {
        let reply = "### Section A\n...\n### Section B\n...\n### Section C\n...";
        let backend = RecordingBackend::replying(reply);

        let result = Credential::from_sources(Some("valid-key".to_string()), None)
            .and_then(|_| {
                analyze_photo_with_backend(
                    &jpeg_request(""),
                    PromptVariant::FitnessTechnique,
                    &backend,
                )
            })
            .unwrap();

        assert_eq!(result.markdown_text, reply);
        assert_eq!(backend.calls.get(), 1);
    }

    #[test]
    fn empty_question_sends_the_fallback_sentence() {
        let backend = RecordingBackend::replying("ok");

        analyze_photo_with_backend(&jpeg_request("   "), PromptVariant::FitnessTechnique, &backend)
            .unwrap();

        let prompt = backend.last_prompt.borrow().clone().unwrap();
        assert!(prompt.contains(fallback_question(PromptVariant::FitnessTechnique)));
    }

    #[test]
    fn question_reaches_the_wire_verbatim() {
        let backend = RecordingBackend::replying("ok");

        analyze_photo_with_backend(
            &jpeg_request("האם הגב ישר?"),
            PromptVariant::FitnessTechnique,
            &backend,
        )
        .unwrap();

        let prompt = backend.last_prompt.borrow().clone().unwrap();
        assert!(prompt.contains("\"\"\"האם הגב ישר?\"\"\""));
    }

    #[test]
    fn missing_image_fails_before_any_remote_call() {
        let backend = RecordingBackend::replying("should never be returned");
        let request = AnalysisRequest::new(Vec::new(), ImageMime::Jpeg, "שאלה");

        let result =
            analyze_photo_with_backend(&request, PromptVariant::FitnessTechnique, &backend);

        assert!(matches!(result, Err(Error::MissingInput)));
        assert_eq!(backend.calls.get(), 0);
    }

    #[test]
    fn missing_credential_fails_before_any_remote_call() {
        let backend = RecordingBackend::replying("should never be returned");
        let request = jpeg_request("");

        // The interaction boundary resolves the credential first; the
        // backend is only consulted when that succeeds.
        let outcome = Credential::from_sources(None, None).and_then(|_| {
            analyze_photo_with_backend(&request, PromptVariant::FitnessTechnique, &backend)
        });

        assert!(matches!(outcome, Err(Error::MissingCredential)));
        assert_eq!(backend.calls.get(), 0);
    }

    #[test]
    fn remote_failure_preserves_the_underlying_message() {
        let backend = RecordingBackend::failing("connection reset by peer");

        let result = analyze_photo_with_backend(
            &jpeg_request("שאלה"),
            PromptVariant::FitnessTechnique,
            &backend,
        );

        match result {
            Err(Error::RemoteService(message)) => {
                assert!(message.contains("connection reset by peer"));
            }
            other => panic!("expected RemoteService, got {:?}", other),
        }
    }
}
