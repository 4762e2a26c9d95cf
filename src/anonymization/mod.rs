//! Anonymization module for Lexanon
//!
//! This module detects personal and case-sensitive information in French
//! legal documents and replaces it with placeholder text.
//!
//! # Architecture
//!
//! The anonymization pipeline consists of:
//! - **Detection**: pattern rules, name/organization recognition, remote model probing
//! - **Reconciliation**: overlap resolution into a span-disjoint entity set
//! - **Editing**: manual entities, replacement/selection changes, grouping
//! - **Redaction**: right-to-left substitution of the selected spans
//! - **Audit**: structured logging with hashed entity text
//!
//! # Usage
//!
//! ```rust,ignore
//! use lexanon::anonymization::{AnonymizationEngine, AnonymizationConfig, ProcessingMode};
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let result = engine.process(text, ProcessingMode::Enhanced).await;
//! let redacted = engine.redact(text, &result.entities)?;
//! ```

pub mod audit;
pub mod config;
pub mod detector;
pub mod editing;
pub mod engine;
pub mod models;
pub mod offset;
pub mod output;
pub mod reconciler;
pub mod redaction;
pub mod report;

// Re-export main types
pub use config::AnonymizationConfig;
pub use engine::AnonymizationEngine;
pub use models::{Entity, EntitySource, EntityType, ProcessingMode, Span};
pub use report::{HealthStatus, ProcessingResult, ProcessingStats};
