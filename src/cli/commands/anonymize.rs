//! Anonymize command implementation
//!
//! Detects entities and writes the redacted document in one step, applying
//! every detected entity.

use super::{engine_from_config, read_input, write_json, EXIT_FATAL, EXIT_INPUT};
use crate::anonymization::output::write_document;
use crate::anonymization::ProcessingMode;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Input text document (UTF-8)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Detection mode (basic, enhanced, remote); defaults to the configured mode
    #[arg(short, long)]
    pub mode: Option<ProcessingMode>,

    /// Redacted document path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Also write the detected entities as JSON
    #[arg(long)]
    pub entities_output: Option<PathBuf>,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let engine = match engine_from_config(config_path) {
            Ok(engine) => engine,
            Err(code) => return Ok(code),
        };
        let text = match read_input(&self.input) {
            Ok(text) => text,
            Err(code) => return Ok(code),
        };

        let mode = self.mode.unwrap_or_else(|| engine.default_mode());
        println!("🔍 Anonymizing {} ({mode} mode)", self.input.display());

        let result = engine.process(&text, mode).await;

        let redacted = match engine.redact(&text, &result.entities) {
            Ok(redacted) => redacted,
            Err(e) => {
                println!("❌ Redaction rejected");
                println!("   Error: {e}");
                return Ok(EXIT_INPUT);
            }
        };

        if let Err(e) = write_document(&self.output, &redacted) {
            println!("❌ Failed to write document");
            println!("   Error: {e}");
            return Ok(EXIT_FATAL);
        }

        if let Some(ref entities_output) = self.entities_output {
            if let Err(e) = write_json(&result, Some(entities_output)) {
                println!("❌ Failed to write entities");
                println!("   Error: {e}");
                return Ok(EXIT_FATAL);
            }
        }

        result.print_summary();
        println!("✅ Anonymized document written to {}", self.output.display());
        Ok(0)
    }
}
