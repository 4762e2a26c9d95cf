//! Process command implementation
//!
//! Detects entities in a document and prints them as JSON.

use super::{engine_from_config, read_input, write_json, EXIT_FATAL};
use crate::anonymization::ProcessingMode;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Input text document (UTF-8)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Detection mode (basic, enhanced, remote); defaults to the configured mode
    #[arg(short, long)]
    pub mode: Option<ProcessingMode>,

    /// Write the result JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ProcessArgs {
    /// Execute the process command
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
        tracing::info!(input = %self.input.display(), mode = %mode, "Processing document");

        let result = engine.process(&text, mode).await;

        if let Err(e) = write_json(&result, self.output.as_deref()) {
            println!("❌ Failed to write result");
            println!("   Error: {e}");
            return Ok(EXIT_FATAL);
        }

        if let Some(ref output) = self.output {
            result.print_summary();
            println!("✅ Entities written to {}", output.display());
        }

        Ok(0)
    }
}
