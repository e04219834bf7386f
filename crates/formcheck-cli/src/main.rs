//! Form Checker - exercise technique and body language photo analysis
//!
//! A CLI tool that sends a photo and a context question to Gemini and
//! prints the model's Markdown analysis.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
