// Lexanon - French Legal Document Anonymizer
// Copyright (c) 2025 Lexanon Contributors
// Licensed under the MIT License

//! # Lexanon - French Legal Document Anonymizer
//!
//! Lexanon finds personal and case-sensitive information in French legal
//! documents (names, organizations, addresses, phone numbers, e-mails,
//! SIRET and social security numbers, legal references) and replaces the
//! selected occurrences with placeholders such as `Personne A`.
//!
//! ## Overview
//!
//! - **Detection** with ordered pattern rules, optional name/organization
//!   recognition and an optional remote model
//! - **Reconciliation** of overlapping candidates by confidence
//! - **Editing**: manual entities, replacement and selection changes, grouping
//! - **Redaction** with character offsets, validated before any substitution
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Detection, reconciliation, editing and redaction
//! - [`domain`] - Identifiers and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lexanon::anonymization::{AnonymizationConfig, AnonymizationEngine, ProcessingMode};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//!
//!     let text = "Monsieur Jean Dupont, tél. 06 12 34 56 78.";
//!     let result = engine.process(text, ProcessingMode::Enhanced).await;
//!     println!("Found {} entities", result.entities.len());
//!
//!     let redacted = engine.redact(text, &result.entities)?;
//!     assert_eq!(redacted, "Monsieur Personne A, tél. 06 XX XX XX XX.");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library errors use [`domain::LexanonError`]; redaction failures are the
//! more specific [`domain::RedactionError`], which names the offending entity.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
