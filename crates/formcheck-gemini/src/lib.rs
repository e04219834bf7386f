//! Gemini model client for form-checker
//!
//! One multimodal call per analysis: the composed instruction prompt plus a
//! single inline image part, sent to the generateContent endpoint. No
//! caching, no retries.

mod api;
mod backend;
mod models;

pub use api::{
    build_request_body, response_to_text, GeminiClient, DEFAULT_MODEL, GEMINI_API_KEY_ENV,
    GEMINI_ENDPOINT,
};
pub use backend::GeminiBackend;
pub use models::GeminiResponse;
