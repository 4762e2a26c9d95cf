//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "lexanon.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Lexanon configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: lexanon validate-config");
                println!("  3. Detect entities: lexanon process --input document.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Lexanon Configuration File
# Anonymization of French legal documents

[application]
log_level = "info"

[anonymization]
default_mode = "basic"
recognizer = "heuristic"

[anonymization.remote]
enabled = true
url = "http://localhost:11434"
model = "llama3.2:3b"
timeout_seconds = 30

[anonymization.audit]
enabled = false
log_path = "./audit/lexanon.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Lexanon Configuration File
# Anonymization of French legal documents
#
# Every setting has a default; remove what you do not need.
# Values may reference environment variables with ${VAR_NAME}, and any
# setting can be overridden with LEXANON_<SECTION>_<KEY>.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Detection
# ============================================================================
[anonymization]
# Mode used when none is given on the command line
# - basic: pattern rules only
# - enhanced: pattern rules plus person/organization recognition
# - remote: pattern rules plus the remote model
default_mode = "basic"

# Custom pattern library (TOML with [[rule]] tables)
# pattern_library = "./patterns/custom.toml"

# Person/organization recognizer: heuristic | none
recognizer = "heuristic"

# Confidence given to recognized names (0.0 - 1.0)
person_confidence = 0.9
organization_confidence = 0.85

# ============================================================================
# Remote Model (Ollama)
# ============================================================================
[anonymization.remote]
enabled = true
url = "http://localhost:11434"
# url = "${OLLAMA_URL}"
model = "llama3.2:3b"
# custom_prompt = "Extrais les noms de personnes et d'organisations."
timeout_seconds = 30

# ============================================================================
# Audit Log
# ============================================================================
[anonymization.audit]
# One line per processing/redaction call; entity text is stored as SHA-256
enabled = false
log_path = "./audit/lexanon.log"
json_format = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging (console logging is always on, on stderr)
local_enabled = false

# Log directory
local_path = "./logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}
