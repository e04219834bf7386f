//! Request, response and credential types shared across the workspace

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Image MIME types accepted for the multimodal request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    #[default]
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageMime {
    /// Wire-level MIME string
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }

    /// Parse a MIME string; unknown types fall back to JPEG
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => ImageMime::Png,
            _ => ImageMime::Jpeg,
        }
    }

    /// Guess from a file path (extension-based)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("image/jpeg");
        Self::from_mime(mime)
    }
}

impl std::fmt::Display for ImageMime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One photo analysis request (one button press / one CLI invocation)
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image_bytes: Vec<u8>,
    pub mime_type: ImageMime,
    pub context_question: String,
}

impl AnalysisRequest {
    pub fn new(
        image_bytes: Vec<u8>,
        mime_type: ImageMime,
        context_question: impl Into<String>,
    ) -> Self {
        Self {
            image_bytes,
            mime_type,
            context_question: context_question.into(),
        }
    }
}

/// The model's formatted answer, passed through unmodified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub markdown_text: String,
}

/// API key for the remote model service, non-empty by construction
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Resolve a credential from an explicit value and the process
    /// environment, in that order.
    ///
    /// Blank values count as absent. Fails with `Error::MissingCredential`
    /// when neither source provides a key.
    pub fn from_sources(explicit: Option<String>, env: Option<String>) -> Result<Self> {
        explicit
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env.filter(|key| !key.trim().is_empty()))
            .map(Credential)
            .ok_or(Error::MissingCredential)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print the key itself
        f.write_str("Credential(***)")
    }
}

/// Seam for the single multimodal model call.
///
/// The real implementation performs one HTTPS request per invocation;
/// tests substitute a recording fake.
pub trait AnalysisBackend {
    fn send_prompt(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: ImageMime,
    ) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_wins_over_environment() {
        let credential =
            Credential::from_sources(Some("user-key".to_string()), Some("env-key".to_string()))
                .unwrap();
        assert_eq!(credential.as_str(), "user-key");
    }

    #[test]
    fn blank_explicit_key_falls_back_to_environment() {
        let credential =
            Credential::from_sources(Some("   ".to_string()), Some("env-key".to_string())).unwrap();
        assert_eq!(credential.as_str(), "env-key");
    }

    #[test]
    fn missing_both_sources_is_an_error() {
        let result = Credential::from_sources(None, None);
        assert!(matches!(result, Err(Error::MissingCredential)));
    }

    #[test]
    fn empty_environment_key_is_an_error() {
        let result = Credential::from_sources(None, Some(String::new()));
        assert!(matches!(result, Err(Error::MissingCredential)));
    }

    #[test]
    fn unknown_mime_defaults_to_jpeg() {
        assert_eq!(ImageMime::from_mime("image/webp"), ImageMime::Jpeg);
        assert_eq!(ImageMime::from_mime(""), ImageMime::Jpeg);
    }

    #[test]
    fn mime_from_path_extension() {
        assert_eq!(ImageMime::from_path("squat.png"), ImageMime::Png);
        assert_eq!(ImageMime::from_path("deadlift.JPG"), ImageMime::Jpeg);
        assert_eq!(ImageMime::from_path("no_extension"), ImageMime::Jpeg);
    }

    #[test]
    fn credential_debug_hides_the_key() {
        let credential = Credential::from_sources(Some("secret".to_string()), None).unwrap();
        assert_eq!(format!("{:?}", credential), "Credential(***)");
    }
}
