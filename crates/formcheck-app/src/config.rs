//! Configuration management for form-checker
//!
//! Config stored at: ~/.config/form-checker/config.json
//!
//! The API key is deliberately not part of the configuration; it is
//! session-scoped (explicit input or environment variable).

use formcheck_prompt::PromptVariant;
use formcheck_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Prompt template variant to analyze with
    #[serde(default)]
    pub variant: PromptVariant,

    /// Model name override (optional)
    #[serde(default)]
    pub model: Option<String>,

    /// Default output format (markdown, json)
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("form-checker");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Form Checker Configuration")?;
        writeln!(f, "==========================")?;
        writeln!(f)?;
        writeln!(f, "Variant:        {}", self.variant)?;
        writeln!(
            f,
            "Model:          {}",
            self.model.as_deref().unwrap_or("(default)")
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.variant, PromptVariant::FitnessTechnique);
        assert_eq!(config.model, None);
        assert_eq!(config.output_format, OutputFormat::Markdown);
    }

    #[test]
    fn config_json_round_trip() {
        let config = Config {
            variant: PromptVariant::BehavioralBalanced,
            model: Some("gemini-2.5-pro".to_string()),
            output_format: OutputFormat::Json,
        };

        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.variant, PromptVariant::BehavioralBalanced);
        assert_eq!(restored.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(restored.output_format, OutputFormat::Json);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.variant, PromptVariant::FitnessTechnique);
        assert_eq!(config.output_format, OutputFormat::Markdown);
    }

    #[test]
    fn display_names_the_variant() {
        let config = Config::default();
        let rendered = config.to_string();
        assert!(rendered.contains("fitness-technique"));
        assert!(rendered.contains("markdown"));
    }
}
