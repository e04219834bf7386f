//! CLI definition using clap

use clap::{Parser, Subcommand};
use formcheck_prompt::PromptVariant;
use formcheck_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "form-checker")]
#[command(version)]
#[command(about = "Exercise technique and body language photo analysis using Gemini")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Prompt template variant. Uses config value if not specified.
    #[arg(long, global = true)]
    pub variant: Option<PromptVariant>,

    /// Model name override
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Output format (markdown, json). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a photo
    Analyze {
        /// Path to image file (JPG / PNG)
        image: PathBuf,

        /// Context question to focus the analysis
        #[arg(long, short = 'q')]
        question: Option<String>,

        /// API key. Falls back to the GEMINI_API_KEY environment variable.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set prompt template variant
        #[arg(long)]
        set_variant: Option<PromptVariant>,

        /// Set model override
        #[arg(long)]
        set_model: Option<String>,

        /// Clear the model override
        #[arg(long)]
        clear_model: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
