//! Redact command implementation
//!
//! Applies a previously reviewed entity list to a document.

use super::{engine_from_config, read_input, EXIT_FATAL, EXIT_INPUT};
use crate::anonymization::editing::{apply_edits, EntityEdit};
use crate::anonymization::output::{render_document, write_document};
use crate::anonymization::{Entity, ProcessingResult};
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Entity file accepted by `redact`: a full `process` result or a bare list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EntitiesFile {
    Result(ProcessingResult),
    List(Vec<Entity>),
}

impl EntitiesFile {
    pub fn into_entities(self) -> Vec<Entity> {
        match self {
            Self::Result(result) => result.entities,
            Self::List(entities) => entities,
        }
    }
}

/// Read an entity file
pub fn read_entities(path: &Path) -> anyhow::Result<Vec<Entity>> {
    let content = std::fs::read_to_string(path)?;
    let file: EntitiesFile = serde_json::from_str(&content)?;
    Ok(file.into_entities())
}

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Original text document (UTF-8)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Entities JSON produced by `process` (possibly edited)
    #[arg(short, long)]
    pub entities: PathBuf,

    /// Optional JSON list of edits ({"id", "replacement"?, "selected"?})
    #[arg(long)]
    pub edits: Option<PathBuf>,

    /// Write the redacted document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let engine = match engine_from_config(config_path) {
            Ok(engine) => engine,
            Err(code) => return Ok(code),
        };
        let text = match read_input(&self.input) {
            Ok(text) => text,
            Err(code) => return Ok(code),
        };

        let mut entities = match read_entities(&self.entities) {
            Ok(entities) => entities,
            Err(e) => {
                println!("❌ Failed to read entities: {}", self.entities.display());
                println!("   Error: {e}");
                return Ok(EXIT_INPUT);
            }
        };

        if let Some(ref edits_path) = self.edits {
            let edits: Vec<EntityEdit> = match std::fs::read_to_string(edits_path)
                .map_err(anyhow::Error::from)
                .and_then(|c| serde_json::from_str(&c).map_err(anyhow::Error::from))
            {
                Ok(edits) => edits,
                Err(e) => {
                    println!("❌ Failed to read edits: {}", edits_path.display());
                    println!("   Error: {e}");
                    return Ok(EXIT_INPUT);
                }
            };
            if let Err(e) = apply_edits(&mut entities, &edits) {
                println!("❌ Failed to apply edits");
                println!("   Error: {e}");
                return Ok(EXIT_INPUT);
            }
        }

        let redacted = match engine.redact(&text, &entities) {
            Ok(redacted) => redacted,
            Err(e) => {
                tracing::warn!(error = %e, "Redaction rejected");
                println!("❌ Redaction rejected");
                println!("   Error: {e}");
                return Ok(EXIT_INPUT);
            }
        };

        match self.output {
            Some(ref output) => {
                if let Err(e) = write_document(output, &redacted) {
                    println!("❌ Failed to write document");
                    println!("   Error: {e}");
                    return Ok(EXIT_FATAL);
                }
                println!("✅ Redacted document written to {}", output.display());
            }
            None => print!("{}", render_document(&redacted)),
        }

        Ok(0)
    }
}
