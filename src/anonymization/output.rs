//! Redacted document output
//!
//! The document is written as plain text, one paragraph per input line.
//! Each paragraph is trimmed; blank lines stay as empty paragraphs.

use crate::domain::{LexanonError, Result};
use std::fs;
use std::path::Path;

/// Paragraphs of `text`, trimmed
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).collect()
}

/// Render `text` into the document body
pub fn render_document(text: &str) -> String {
    let mut body = paragraphs(text).join("\n");
    body.push('\n');
    body
}

/// Write the rendered document to `path`, creating parent directories
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LexanonError::Io(format!(
                "Failed to create output directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    fs::write(path, render_document(text)).map_err(|e| {
        LexanonError::Io(format!("Failed to write document {}: {e}", path.display()))
    })?;

    tracing::info!(path = %path.display(), "Document written");
    Ok(())
}
