//! Blocking AnalysisBackend implementation backed by the Gemini client
//!
//! The async request is driven to completion on a fresh tokio runtime, so
//! the calling thread blocks for the duration of the remote call. There is
//! no cancellation: once issued, the call runs to completion or failure.

use formcheck_types::{AnalysisBackend, Error, ImageMime, Result};

use crate::GeminiClient;

/// AnalysisBackend that performs the real HTTPS call
pub struct GeminiBackend {
    client: GeminiClient,
}

impl GeminiBackend {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

impl AnalysisBackend for GeminiBackend {
    fn send_prompt(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: ImageMime,
    ) -> Result<String> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| Error::RemoteService(format!("Failed to create runtime: {}", e)))?;
        runtime.block_on(self.client.generate(prompt, image_bytes, mime_type))
    }
}
