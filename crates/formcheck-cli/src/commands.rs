//! Command handlers

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use formcheck_app::{analyze_photo, AnalyzerConfig, Config};
use formcheck_gemini::{DEFAULT_MODEL, GEMINI_API_KEY_ENV};
use formcheck_prompt::PromptVariant;
use formcheck_types::{AnalysisRequest, Credential, ImageMime, OutputFormat, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{Cli, Commands};
use crate::output::output_result;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(variant) = cli.variant {
        config.variant = variant;
    }
    if cli.model.is_some() {
        config.model = cli.model.clone();
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }

    match &cli.command {
        Commands::Analyze {
            image,
            question,
            api_key,
        } => cmd_analyze(&config, image.clone(), question.clone(), api_key.clone()),

        Commands::Config {
            show,
            set_variant,
            set_model,
            clear_model,
            set_output,
            reset,
        } => cmd_config(
            *show,
            *set_variant,
            set_model.clone(),
            *clear_model,
            *set_output,
            *reset,
        ),
    }
}

fn cmd_analyze(
    config: &Config,
    image: PathBuf,
    question: Option<String>,
    api_key: Option<String>,
) -> Result<()> {
    // Resolve the credential before anything else; the request never
    // reaches the backend without one.
    let credential =
        Credential::from_sources(api_key, std::env::var(GEMINI_API_KEY_ENV).ok())?;

    let (image_bytes, mime_type) = read_image(&image)?;
    let request = AnalysisRequest::new(image_bytes, mime_type, question.unwrap_or_default());

    let analyzer = AnalyzerConfig::default()
        .with_variant(config.variant)
        .with_model(config.model.clone());

    let model_label = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
    let spinner = busy_spinner(format!("Analyzing with {}...", model_label));

    let result = analyze_photo(&request, &analyzer, &credential);
    spinner.finish_and_clear();

    output_result(config.output_format, &result?)
}

/// Read image bytes and derive the MIME type from the file extension
pub fn read_image(path: &Path) -> Result<(Vec<u8>, ImageMime)> {
    let image_bytes = fs::read(path)?;
    Ok((image_bytes, ImageMime::from_path(path)))
}

/// Busy spinner shown for the duration of the blocking model call
fn busy_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn cmd_config(
    show: bool,
    set_variant: Option<PromptVariant>,
    set_model: Option<String>,
    clear_model: bool,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(variant) = set_variant {
        config.variant = variant;
        modified = true;
    }
    if let Some(model) = set_model {
        config.model = Some(model);
        modified = true;
    }
    if clear_model {
        config.model = None;
        modified = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
