//! Anonymization configuration

use crate::anonymization::detector::ner::{
    DEFAULT_ORGANIZATION_CONFIDENCE, DEFAULT_PERSON_CONFIDENCE,
};
use crate::anonymization::models::ProcessingMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name/organization recognizer to install
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerKind {
    /// French title/legal-form heuristic
    #[default]
    Heuristic,
    /// No recognizer; enhanced mode behaves like basic
    None,
}

impl std::str::FromStr for RecognizerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heuristic" => Ok(Self::Heuristic),
            "none" => Ok(Self::None),
            _ => Err(format!(
                "Invalid recognizer: {s}. Must be one of: heuristic, none"
            )),
        }
    }
}

/// Detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Mode used when the caller does not pick one
    #[serde(default)]
    pub default_mode: ProcessingMode,

    /// Path to a custom pattern library TOML file
    pub pattern_library: Option<PathBuf>,

    /// Name/organization recognizer
    #[serde(default)]
    pub recognizer: RecognizerKind,

    /// Confidence of recognized persons
    #[serde(default = "default_person_confidence")]
    pub person_confidence: f32,

    /// Confidence of recognized organizations
    #[serde(default = "default_organization_confidence")]
    pub organization_confidence: f32,

    /// Remote model endpoint
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_person_confidence() -> f32 {
    DEFAULT_PERSON_CONFIDENCE
}

fn default_organization_confidence() -> f32 {
    DEFAULT_ORGANIZATION_CONFIDENCE
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            default_mode: ProcessingMode::Basic,
            pattern_library: None,
            recognizer: RecognizerKind::Heuristic,
            person_confidence: default_person_confidence(),
            organization_confidence: default_organization_confidence(),
            remote: RemoteConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        for (name, value) in [
            ("person_confidence", self.person_confidence),
            ("organization_confidence", self.organization_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{name} must be between 0.0 and 1.0, got {value}");
            }
        }

        self.remote
            .validate()
            .context("Invalid remote model configuration")?;

        self.audit.validate().context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_DEFAULT_MODE") {
            self.default_mode = val
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid LEXANON_ANONYMIZATION_DEFAULT_MODE value")?;
        }

        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_RECOGNIZER") {
            self.recognizer = val
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid LEXANON_ANONYMIZATION_RECOGNIZER value")?;
        }

        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_PERSON_CONFIDENCE") {
            self.person_confidence = val
                .parse()
                .context("Invalid LEXANON_ANONYMIZATION_PERSON_CONFIDENCE value")?;
        }

        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_ORGANIZATION_CONFIDENCE") {
            self.organization_confidence = val
                .parse()
                .context("Invalid LEXANON_ANONYMIZATION_ORGANIZATION_CONFIDENCE value")?;
        }

        self.remote.apply_env_overrides()?;
        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Remote model (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Allow remote mode
    #[serde(default = "default_remote_enabled")]
    pub enabled: bool,

    /// Endpoint base URL
    #[serde(default = "default_remote_url")]
    pub url: String,

    /// Model name
    #[serde(default = "default_remote_model")]
    pub model: String,

    /// Prompt override for extraction
    #[serde(default)]
    pub custom_prompt: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_remote_timeout")]
    pub timeout_seconds: u64,
}

fn default_remote_enabled() -> bool {
    true
}

fn default_remote_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_remote_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_remote_timeout() -> u64 {
    30
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: default_remote_enabled(),
            url: default_remote_url(),
            model: default_remote_model(),
            custom_prompt: None,
            timeout_seconds: default_remote_timeout(),
        }
    }
}

impl RemoteConfig {
    /// Validate remote configuration
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.url)
            .with_context(|| format!("Invalid remote model URL: {}", self.url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Remote model URL must use http or https: {}", self.url);
        }
        if self.model.trim().is_empty() {
            anyhow::bail!("Remote model name cannot be empty");
        }
        if self.timeout_seconds == 0 {
            anyhow::bail!("Remote timeout_seconds must be greater than 0");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_REMOTE_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid LEXANON_ANONYMIZATION_REMOTE_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_REMOTE_URL") {
            self.url = val;
        }

        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_REMOTE_MODEL") {
            self.model = val;
        }

        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_REMOTE_TIMEOUT_SECONDS") {
            self.timeout_seconds = val
                .parse()
                .context("Invalid LEXANON_ANONYMIZATION_REMOTE_TIMEOUT_SECONDS value")?;
        }

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/lexanon.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled {
            if let Some(parent) = self.log_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!(
                            "Failed to create audit log directory: {}",
                            parent.display()
                        )
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid LEXANON_ANONYMIZATION_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("LEXANON_ANONYMIZATION_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid LEXANON_ANONYMIZATION_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}
