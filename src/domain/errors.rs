//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use super::ids::EntityId;
use thiserror::Error;

/// Main Lexanon error type
#[derive(Debug, Error)]
pub enum LexanonError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors (bad caller input that is not a redaction precondition)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Detection pipeline errors
    #[error("Detection error: {0}")]
    Detection(String),

    /// Redaction precondition violations
    #[error("Redaction error: {0}")]
    Redaction(#[from] RedactionError),

    /// Remote model errors
    #[error("Remote model error: {0}")]
    Remote(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Precondition violations detected before any substitution happens
///
/// A failed redaction never produces partial output: the caller gets exactly
/// one of these and the original text is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedactionError {
    /// A span reaches past the end of the text
    #[error("span {start}..{end} of entity {entity_id} is out of bounds for text of {len} characters")]
    SpanOutOfBounds {
        entity_id: EntityId,
        start: usize,
        end: usize,
        len: usize,
    },

    /// A span with `start >= end`
    #[error("span {start}..{end} of entity {entity_id} is empty or reversed")]
    EmptySpan {
        entity_id: EntityId,
        start: usize,
        end: usize,
    },

    /// An entity without any span
    #[error("entity {0} has no positions")]
    MissingPositions(EntityId),

    /// Two selected spans overlap
    #[error("selected spans overlap: entity {first} at {first_start}..{first_end} and entity {second} at {second_start}..{second_end}")]
    OverlappingSpans {
        first: EntityId,
        first_start: usize,
        first_end: usize,
        second: EntityId,
        second_start: usize,
        second_end: usize,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for LexanonError {
    fn from(err: std::io::Error) -> Self {
        LexanonError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LexanonError {
    fn from(err: serde_json::Error) -> Self {
        LexanonError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LexanonError {
    fn from(err: toml::de::Error) -> Self {
        LexanonError::Configuration(format!("TOML parse error: {err}"))
    }
}
