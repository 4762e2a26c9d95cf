//! Pattern library for entity detection
//!
//! Rules are loaded from an ordered TOML library (`[[rule]]` tables). The
//! built-in library is embedded at compile time; a custom one can be
//! supplied through configuration.

use crate::anonymization::detector::checksum;
use crate::anonymization::models::EntityType;
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::Path;

/// Upper bound on compiled program size for a single pattern
const REGEX_SIZE_LIMIT: usize = 1 << 20;

fn default_confidence() -> f32 {
    1.0
}

/// Post-match validator applied to a candidate's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// Luhn checksum over exactly 14 digits
    Luhn,
}

impl Validator {
    /// Whether the matched text passes this validator
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Self::Luhn => checksum::is_valid_luhn(text),
        }
    }
}

/// Rule definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDefinition {
    /// Rule name, used in logs
    pub name: String,
    /// Entity type produced by this rule
    pub entity_type: EntityType,
    /// Regex patterns for this rule
    pub patterns: Vec<String>,
    /// Placeholder text for every match
    pub replacement: String,
    /// Confidence score (0.0 - 1.0)
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    /// Compile patterns case-insensitively
    #[serde(default)]
    pub case_insensitive: bool,
    /// Minimum match length in characters
    #[serde(default)]
    pub min_length: Option<usize>,
    /// Optional post-match validator
    #[serde(default)]
    pub validator: Option<Validator>,
}

/// Compiled rule with metadata
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub name: String,
    pub entity_type: EntityType,
    pub regexes: Vec<Regex>,
    pub replacement: String,
    pub confidence: f32,
    pub min_length: Option<usize>,
    pub validator: Option<Validator>,
}

impl PatternRule {
    /// Whether a matched string survives the length and validator filters
    pub fn accepts(&self, matched: &str) -> bool {
        if let Some(min) = self.min_length {
            if matched.chars().count() < min {
                return false;
            }
        }
        self.validator.map_or(true, |v| v.accepts(matched))
    }
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default, rename = "rule")]
    rules: Vec<RuleDefinition>,
}

/// Ordered registry of compiled pattern rules
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    rules: Vec<PatternRule>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    ///
    /// A pattern that fails to compile is logged and skipped; the rest of its
    /// rule still loads. A rule left with no usable pattern is dropped. Only a
    /// library with no usable rule at all is an error.
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut rules = Vec::with_capacity(library.rules.len());

        for def in library.rules {
            let mut regexes = Vec::with_capacity(def.patterns.len());

            for pattern_str in &def.patterns {
                match RegexBuilder::new(pattern_str)
                    .case_insensitive(def.case_insensitive)
                    .size_limit(REGEX_SIZE_LIMIT)
                    .build()
                {
                    Ok(regex) => regexes.push(regex),
                    Err(e) => {
                        tracing::warn!(
                            rule = %def.name,
                            pattern = %pattern_str,
                            error = %e,
                            "Skipping pattern that failed to compile"
                        );
                    }
                }
            }

            if regexes.is_empty() {
                tracing::warn!(rule = %def.name, "Skipping rule with no usable pattern");
                continue;
            }

            rules.push(PatternRule {
                name: def.name,
                entity_type: def.entity_type,
                regexes,
                replacement: def.replacement,
                confidence: def.confidence.clamp(0.0, 1.0),
                min_length: def.min_length,
                validator: def.validator,
            });
        }

        if rules.is_empty() {
            anyhow::bail!("Pattern library contains no usable rule");
        }

        Ok(Self { rules })
    }

    /// Create a default pattern registry with built-in patterns
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/legal_fr_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// All rules, in evaluation order
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Rules producing a given entity type, in evaluation order
    pub fn rules_for_type(&self, entity_type: EntityType) -> impl Iterator<Item = &PatternRule> {
        self.rules
            .iter()
            .filter(move |r| r.entity_type == entity_type)
    }

    /// Look up a rule by name
    pub fn rule(&self, name: &str) -> Option<&PatternRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}
