//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Lexanon configuration file.

use super::EXIT_CONFIG;
use crate::anonymization::AnonymizationEngine;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        // Loading the pattern library catches rule errors validation cannot see
        let engine = match AnonymizationEngine::new(config.anonymization.clone()) {
            Ok(engine) => engine,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e:#}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        let anonymization = engine.config();
        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Default Mode: {}", anonymization.default_mode);
        println!(
            "  Pattern Library: {}",
            anonymization
                .pattern_library
                .as_ref()
                .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
        );
        println!("  Recognizer: {:?}", anonymization.recognizer);
        println!(
            "  Remote Model: {} at {} ({})",
            anonymization.remote.model,
            anonymization.remote.url,
            if anonymization.remote.enabled { "enabled" } else { "disabled" }
        );
        println!(
            "  Audit Log: {}",
            if anonymization.audit.enabled {
                anonymization.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(0)
    }
}
