//! Remote language model extractor
//!
//! Talks to an Ollama-compatible endpoint. Only availability probing and
//! model listing are live; extraction currently returns nothing.

use crate::anonymization::models::Entity;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Timeout for the availability probe
pub const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(3);

/// Timeout for listing installed models
pub const LIST_MODELS_TIMEOUT: Duration = Duration::from_secs(5);

/// Remote entity extraction capability
#[async_trait]
pub trait RemoteExtractor: Send + Sync {
    /// Whether the endpoint answers; failures and timeouts are `false`
    async fn check_availability(&self) -> bool;

    /// Names of installed models; failures give an empty list
    async fn list_models(&self) -> Vec<String>;

    /// Extract entities from `text`
    async fn extract_entities(&self, text: &str) -> Vec<Entity>;
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Ollama HTTP client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    custom_prompt: Option<String>,
}

impl OllamaClient {
    /// Create a client for `base_url` (e.g. `http://localhost:11434`)
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        custom_prompt: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(AVAILABILITY_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            custom_prompt,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn custom_prompt(&self) -> Option<&str> {
        self.custom_prompt.as_deref()
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    async fn fetch_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.tags_url())
            .timeout(LIST_MODELS_TIMEOUT)
            .send()
            .await
            .context("Model listing request failed")?;

        if response.status() != StatusCode::OK {
            anyhow::bail!("Model listing returned HTTP {}", response.status());
        }

        let tags: TagsResponse = response
            .json()
            .await
            .context("Failed to parse model listing")?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl RemoteExtractor for OllamaClient {
    async fn check_availability(&self) -> bool {
        match self
            .client
            .get(self.tags_url())
            .timeout(AVAILABILITY_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!(url = %self.base_url, error = %e, "Remote model endpoint unreachable");
                false
            }
        }
    }

    async fn list_models(&self) -> Vec<String> {
        match self.fetch_models().await {
            Ok(models) => models,
            Err(e) => {
                tracing::debug!(url = %self.base_url, error = %e, "Could not list remote models");
                Vec::new()
            }
        }
    }

    async fn extract_entities(&self, _text: &str) -> Vec<Entity> {
        tracing::debug!(model = %self.model, "Remote extraction is not enabled, returning no entities");
        Vec::new()
    }
}
