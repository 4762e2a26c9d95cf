//! Health command implementation

use super::{engine_from_config, write_json, EXIT_FATAL};
use clap::Args;

/// Arguments for the health command
#[derive(Args, Debug)]
pub struct HealthArgs {}

impl HealthArgs {
    /// Execute the health command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let engine = match engine_from_config(config_path) {
            Ok(engine) => engine,
            Err(code) => return Ok(code),
        };

        let health = engine.health().await;
        tracing::info!(
            recognizer_available = health.recognizer_available,
            remote_available = health.remote_available,
            "Health checked"
        );

        if let Err(e) = write_json(&health, None) {
            println!("❌ Failed to print health status");
            println!("   Error: {e}");
            return Ok(EXIT_FATAL);
        }
        Ok(0)
    }
}
