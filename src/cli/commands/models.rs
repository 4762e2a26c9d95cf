//! Models command implementation
//!
//! Lists the models installed on the remote endpoint.

use super::{load_or_default, EXIT_CONFIG};
use crate::anonymization::detector::remote::{OllamaClient, RemoteExtractor};
use clap::Args;
use std::time::Duration;

/// Arguments for the models command
#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Endpoint URL; defaults to the configured remote URL
    #[arg(long)]
    pub url: Option<String>,
}

impl ModelsArgs {
    /// Execute the models command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let remote = &config.anonymization.remote;
        let url = self.url.clone().unwrap_or_else(|| remote.url.clone());
        if let Err(e) = url::Url::parse(&url) {
            println!("❌ Invalid URL: {url}");
            println!("   Error: {e}");
            return Ok(EXIT_CONFIG);
        }

        let client = OllamaClient::new(
            url.clone(),
            remote.model.clone(),
            remote.custom_prompt.clone(),
            Duration::from_secs(remote.timeout_seconds),
        )?;

        if !client.check_availability().await {
            println!("⚠️  Remote model endpoint unavailable: {url}");
            return Ok(0);
        }

        let models = client.list_models().await;
        println!("📦 Models available at {url}:");
        for model in &models {
            let marker = if model == &remote.model { " (configured)" } else { "" };
            println!("  - {model}{marker}");
        }
        if models.is_empty() {
            println!("  (none)");
        }

        Ok(0)
    }
}
