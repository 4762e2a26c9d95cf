//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Lexanon using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Lexanon - French legal document anonymizer
#[derive(Parser, Debug)]
#[command(name = "lexanon")]
#[command(version, about, long_about = None)]
#[command(author = "Lexanon Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "lexanon.toml", env = "LEXANON_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LEXANON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect sensitive entities in a document
    Process(commands::process::ProcessArgs),

    /// Replace selected entities with their placeholders
    Redact(commands::redact::RedactArgs),

    /// Detect and redact in one pass
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Report recognizer and remote model availability
    Health(commands::health::HealthArgs),

    /// List models offered by the remote model server
    Models(commands::models::ModelsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
