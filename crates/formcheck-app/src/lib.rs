//! Application services for form-checker

pub mod analysis_service;
pub mod config;

pub use analysis_service::{analyze_photo, analyze_photo_with_backend, AnalyzerConfig};
pub use config::Config;
