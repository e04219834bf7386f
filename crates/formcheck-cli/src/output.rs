//! Output formatting module

use formcheck_types::{AnalysisResult, OutputFormat, Result};

pub fn output_result(output_format: OutputFormat, result: &AnalysisResult) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(result)?;
        println!("{}", content);
    } else {
        // The model already answers in Markdown; print it untouched
        println!("{}", result.markdown_text);
    }

    Ok(())
}
