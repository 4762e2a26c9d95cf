//! CLI command implementations
//!
//! Exit codes: 0 success, 2 configuration error, 3 invalid input or
//! redaction precondition, 5 fatal error.

pub mod anonymize;
pub mod health;
pub mod init;
pub mod models;
pub mod process;
pub mod redact;
pub mod validate;

use crate::anonymization::AnonymizationEngine;
use crate::config::{load_config, load_config_from_str, LexanonConfig};
use crate::domain::Result;
use std::path::Path;

/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for unreadable input or rejected redaction
pub const EXIT_INPUT: i32 = 3;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Load the configuration file, or defaults plus environment overrides when
/// the file does not exist
pub fn load_or_default(config_path: &str) -> Result<LexanonConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::debug!(config_path = %config_path, "No configuration file, using defaults");
        load_config_from_str("")
    }
}

/// Build the engine from the configuration file, printing the failure
pub(crate) fn engine_from_config(config_path: &str) -> std::result::Result<AnonymizationEngine, i32> {
    let config = load_or_default(config_path).map_err(|e| {
        println!("❌ Failed to load configuration");
        println!("   Error: {e}");
        EXIT_CONFIG
    })?;

    AnonymizationEngine::new(config.anonymization).map_err(|e| {
        println!("❌ Failed to initialize anonymization engine");
        println!("   Error: {e:#}");
        EXIT_CONFIG
    })
}

/// Read a UTF-8 input document, printing the failure
pub(crate) fn read_input(path: &Path) -> std::result::Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        println!("❌ Failed to read input file: {}", path.display());
        println!("   Error: {e}");
        EXIT_INPUT
    })
}

/// Write JSON to `path`, or to stdout when no path is given
pub(crate) fn write_json<T: serde::Serialize>(
    value: &T,
    path: Option<&Path>,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(path = %path.display(), "JSON written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = load_or_default("/nonexistent/lexanon.toml").unwrap();
        assert_eq!(config.application.log_level, "info");
    }

    #[test]
    fn test_read_missing_input() {
        assert_eq!(read_input(Path::new("/nonexistent/input.txt")), Err(EXIT_INPUT));
    }
}
