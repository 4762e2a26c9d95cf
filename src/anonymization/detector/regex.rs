//! Regex-based entity detector

use super::{
    patterns::{PatternRegistry, PatternRule},
    DetectionContext, EntityDetector,
};
use crate::anonymization::models::{Entity, EntitySource};
use crate::anonymization::offset::OffsetMap;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Regex-based entity detector
///
/// Stateless: every rule of the registry runs independently over the text and
/// the matches are concatenated in rule order.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    pattern_registry: Arc<PatternRegistry>,
}

impl PatternDetector {
    /// Create a new pattern detector with the built-in library
    pub fn new() -> Result<Self> {
        let registry = PatternRegistry::default_patterns()?;
        Ok(Self::with_registry(registry))
    }

    /// Create a new pattern detector with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
        }
    }

    /// Registry backing this detector
    pub fn registry(&self) -> &PatternRegistry {
        &self.pattern_registry
    }

    /// Evaluate a single rule
    ///
    /// All-or-nothing: an error anywhere discards the whole rule's output.
    fn detect_rule(&self, rule: &PatternRule, text: &str, offsets: &OffsetMap) -> Result<Vec<Entity>> {
        let mut entities = Vec::new();

        for regex in &rule.regexes {
            for matched in regex.find_iter(text) {
                let value = matched.as_str();
                if !rule.accepts(value) {
                    tracing::trace!(
                        rule = %rule.name,
                        start = matched.start(),
                        "Candidate rejected by rule filter"
                    );
                    continue;
                }

                let span = offsets
                    .span_from_bytes(matched.start(), matched.end())
                    .with_context(|| {
                        format!(
                            "Match {}..{} of rule '{}' is not on a character boundary",
                            matched.start(),
                            matched.end(),
                            rule.name
                        )
                    })?;

                entities.push(
                    Entity::new(
                        rule.entity_type,
                        EntitySource::Pattern,
                        value,
                        span,
                        rule.replacement.clone(),
                    )
                    .with_confidence(rule.confidence),
                );
            }
        }

        Ok(entities)
    }
}

impl EntityDetector for PatternDetector {
    fn name(&self) -> &str {
        "pattern"
    }

    fn detect(&self, text: &str, ctx: &mut DetectionContext) -> Vec<Entity> {
        let mut entities = Vec::new();

        for rule in self.pattern_registry.rules() {
            match self.detect_rule(rule, text, ctx.offsets()) {
                Ok(found) => {
                    tracing::debug!(rule = %rule.name, count = found.len(), "Pattern rule evaluated");
                    entities.extend(found);
                }
                Err(e) => {
                    tracing::warn!(rule = %rule.name, error = %e, "Pattern rule failed, skipping");
                }
            }
        }

        entities
    }
}
