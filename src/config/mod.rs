//! Configuration management for Lexanon.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Lexanon uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LEXANON_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lexanon::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("lexanon.toml")?;
//!
//! println!("Default mode: {}", config.anonymization.default_mode);
//! println!("Remote model: {}", config.anonymization.remote.model);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnonymizationConfig`] - Detection, remote model and audit settings
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! default_mode = "enhanced"
//! recognizer = "heuristic"
//!
//! [anonymization.remote]
//! url = "${OLLAMA_URL}"
//! model = "llama3.2:3b"
//!
//! [anonymization.audit]
//! enabled = true
//! log_path = "./audit/lexanon.log"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::anonymization::config::{AnonymizationConfig, AuditConfig, RemoteConfig};
pub use loader::{load_config, load_config_from_str};
pub use schema::{ApplicationConfig, LexanonConfig, LoggingConfig};
