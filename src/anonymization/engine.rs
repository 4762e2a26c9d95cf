//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that orchestrates entity
//! detection, overlap resolution, redaction and audit logging.
//!
//! # Pipeline
//!
//! - **Pattern detector**: always runs
//! - **Name/organization recognizer**: enhanced mode, when available
//! - **Remote extractor**: remote mode, when the endpoint answers
//! - **Reconciler**: merges all proposals into a span-disjoint set
//!
//! # Examples
//!
//! ```no_run
//! use lexanon::anonymization::{AnonymizationEngine, config::AnonymizationConfig};
//! use lexanon::anonymization::models::ProcessingMode;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//!
//! let text = "Contactez le 06 12 34 56 78 ou jean@test.fr";
//! let result = engine.process(text, ProcessingMode::Basic).await;
//! let redacted = engine.redact(text, &result.entities)?;
//! assert_eq!(redacted, "Contactez le 06 XX XX XX XX ou email.anonymise@exemple.fr");
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    audit::AuditLogger,
    config::{AnonymizationConfig, RecognizerKind},
    detector::{
        ner::{HeuristicRecognizer, NameOrgRecognizer, NerDetector, UnavailableRecognizer},
        patterns::PatternRegistry,
        regex::PatternDetector,
        remote::{OllamaClient, RemoteExtractor},
        DetectionContext, EntityDetector,
    },
    models::{Entity, ProcessingMode},
    offset::OffsetMap,
    reconciler,
    redaction,
    report::{HealthStatus, ProcessingResult, ProcessingStats, ServiceStatus},
};
use crate::domain::RedactionError;
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main anonymization engine
///
/// Detectors hold no per-call state, so the engine is `Send + Sync` and can
/// be shared across tasks in an `Arc`.
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    patterns: PatternDetector,
    ner: NerDetector,
    remote: Option<Arc<dyn RemoteExtractor>>,
    audit_logger: Option<AuditLogger>,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - Pattern library file cannot be loaded
    /// - Remote client or audit logger initialization fails
    pub fn new(config: AnonymizationConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid anonymization configuration")?;

        let patterns = if let Some(ref pattern_path) = config.pattern_library {
            PatternDetector::with_registry(PatternRegistry::from_file(pattern_path)?)
        } else {
            PatternDetector::new()?
        };

        let recognizer: Arc<dyn NameOrgRecognizer> = match config.recognizer {
            RecognizerKind::Heuristic => Arc::new(HeuristicRecognizer::new()?),
            RecognizerKind::None => Arc::new(UnavailableRecognizer),
        };
        let ner = NerDetector::new(recognizer)
            .with_confidences(config.person_confidence, config.organization_confidence);

        let remote: Option<Arc<dyn RemoteExtractor>> = if config.remote.enabled {
            Some(Arc::new(OllamaClient::new(
                config.remote.url.clone(),
                config.remote.model.clone(),
                config.remote.custom_prompt.clone(),
                Duration::from_secs(config.remote.timeout_seconds),
            )?))
        } else {
            None
        };

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
                true,
            )?)
        } else {
            None
        };

        tracing::debug!(
            rules = patterns.registry().rules().len(),
            recognizer = ner.recognizer_name(),
            remote_enabled = remote.is_some(),
            "Anonymization engine initialized"
        );

        Ok(Self {
            config,
            patterns,
            ner,
            remote,
            audit_logger,
        })
    }

    /// Replace the name/organization recognizer
    pub fn with_recognizer(mut self, recognizer: Arc<dyn NameOrgRecognizer>) -> Self {
        self.ner = NerDetector::new(recognizer).with_confidences(
            self.config.person_confidence,
            self.config.organization_confidence,
        );
        self
    }

    /// Replace the remote extractor
    pub fn with_remote(mut self, remote: Arc<dyn RemoteExtractor>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    pub fn default_mode(&self) -> ProcessingMode {
        self.config.default_mode
    }

    /// Detect and reconcile entities in `text`
    ///
    /// Never fails: detector problems reduce what is found, unavailable
    /// components show up as flags in the stats.
    pub async fn process(&self, text: &str, mode: ProcessingMode) -> ProcessingResult {
        let start = Instant::now();
        let mut ctx = DetectionContext::new(text);

        let mut candidates = self.patterns.detect(text, &mut ctx);

        let recognizer_available = self.ner.is_available();
        if mode == ProcessingMode::Enhanced {
            if recognizer_available {
                candidates.extend(self.ner.detect(text, &mut ctx));
            } else {
                tracing::warn!("Enhanced mode requested but no recognizer is available");
            }
        }

        let mut remote_available = false;
        if mode == ProcessingMode::Remote {
            remote_available = self.probe_remote().await;
            if remote_available {
                let remote_entities = self.extract_remote(text).await;
                candidates.extend(validate_remote(text, ctx.offsets(), remote_entities));
            } else {
                tracing::warn!("Remote mode requested but the remote model is unavailable");
            }
        }

        let candidates_proposed = candidates.len();
        let outcome = reconciler::reconcile(candidates);

        let mut stats = ProcessingStats::from_entities(&outcome.entities, mode);
        stats.processing_time_ms = start.elapsed().as_millis() as u64;
        stats.candidates_proposed = candidates_proposed;
        stats.candidates_discarded = outcome.discarded;
        stats.recognizer_available = recognizer_available;
        stats.remote_available = remote_available;

        tracing::debug!(
            proposed = candidates_proposed,
            discarded = outcome.discarded,
            "Candidates reconciled"
        );
        crate::log_detection_complete!(mode, outcome.entities.len(), start.elapsed());

        let result = ProcessingResult {
            entities: outcome.entities,
            stats,
        };

        if let Some(ref logger) = self.audit_logger {
            if let Err(e) = logger.log_processing(&result) {
                tracing::warn!(error = %e, "Failed to write audit entry");
            }
        }

        result
    }

    /// Apply the selected entities to `text`
    pub fn redact(&self, text: &str, entities: &[Entity]) -> Result<String, RedactionError> {
        let output = redaction::apply(text, entities)?;

        if let Some(ref logger) = self.audit_logger {
            if let Err(e) = logger.log_redaction(entities) {
                tracing::warn!(error = %e, "Failed to write audit entry");
            }
        }

        Ok(output)
    }

    /// Report component availability
    pub async fn health(&self) -> HealthStatus {
        HealthStatus {
            status: ServiceStatus::Healthy,
            recognizer_available: self.ner.is_available(),
            remote_available: self.probe_remote().await,
            timestamp: Utc::now(),
        }
    }

    /// Models installed on the remote endpoint, empty when unreachable
    pub async fn list_remote_models(&self) -> Vec<String> {
        match self.remote {
            Some(ref remote) => remote.list_models().await,
            None => Vec::new(),
        }
    }

    fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.config.remote.timeout_seconds)
    }

    async fn probe_remote(&self) -> bool {
        let Some(ref remote) = self.remote else {
            return false;
        };

        match tokio::time::timeout(self.remote_timeout(), remote.check_availability()).await {
            Ok(available) => available,
            Err(_) => {
                tracing::warn!("Remote availability probe timed out");
                false
            }
        }
    }

    async fn extract_remote(&self, text: &str) -> Vec<Entity> {
        let Some(ref remote) = self.remote else {
            return Vec::new();
        };

        match tokio::time::timeout(self.remote_timeout(), remote.extract_entities(text)).await {
            Ok(entities) => entities,
            Err(_) => {
                tracing::warn!("Remote extraction timed out");
                Vec::new()
            }
        }
    }
}

/// Keep remote entities whose spans lie inside `text` and whose first span
/// reads back as the entity text
fn validate_remote(text: &str, offsets: &OffsetMap, entities: Vec<Entity>) -> Vec<Entity> {
    entities
        .into_iter()
        .filter(|entity| {
            let spans_valid = !entity.positions.is_empty()
                && entity
                    .positions
                    .iter()
                    .all(|span| !span.is_empty() && offsets.slice(text, *span).is_some());
            let text_matches = entity
                .primary_span()
                .and_then(|span| offsets.slice(text, span))
                .is_some_and(|slice| slice == entity.text);

            if !(spans_valid && text_matches) {
                tracing::warn!(
                    entity_type = ?entity.entity_type,
                    positions = ?entity.positions,
                    "Remote model returned an entity that does not match the text, dropping it"
                );
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::{EntitySource, EntityType, Span};
    use async_trait::async_trait;
    use tempfile::tempdir;

    struct StubRemote {
        available: bool,
        entities: Vec<Entity>,
    }

    #[async_trait]
    impl RemoteExtractor for StubRemote {
        async fn check_availability(&self) -> bool {
            self.available
        }

        async fn list_models(&self) -> Vec<String> {
            vec!["stub:1b".to_string()]
        }

        async fn extract_entities(&self, _text: &str) -> Vec<Entity> {
            self.entities.clone()
        }
    }

    fn offline_config() -> AnonymizationConfig {
        let mut config = AnonymizationConfig::default();
        config.remote.enabled = false;
        config
    }

    #[tokio::test]
    async fn test_basic_mode_phone_and_email() {
        let engine = AnonymizationEngine::new(offline_config()).unwrap();
        let text = "Contactez le 06 12 34 56 78 ou jean@test.fr";

        let result = engine.process(text, ProcessingMode::Basic).await;
        assert_eq!(result.entities.len(), 2);
        assert_eq!(result.entities[0].positions, vec![Span::new(13, 27)]);
        assert_eq!(result.entities[1].positions, vec![Span::new(31, 43)]);
        assert_eq!(result.stats.mode_used, ProcessingMode::Basic);
        assert_eq!(result.stats.total_occurrences, 2);
        assert!(result.stats.recognizer_available);
        assert!(!result.stats.remote_available);

        let redacted = engine.redact(text, &result.entities).unwrap();
        assert_eq!(
            redacted,
            "Contactez le 06 XX XX XX XX ou email.anonymise@exemple.fr"
        );
    }

    #[tokio::test]
    async fn test_basic_mode_skips_recognizer() {
        let engine = AnonymizationEngine::new(offline_config()).unwrap();
        let result = engine
            .process("Maître Jean Dupont plaide.", ProcessingMode::Basic)
            .await;
        assert!(result.entities.is_empty());
    }

    #[tokio::test]
    async fn test_enhanced_mode_adds_names() {
        let engine = AnonymizationEngine::new(offline_config()).unwrap();
        let result = engine
            .process(
                "Maître Jean Dupont, tél 06 12 34 56 78.",
                ProcessingMode::Enhanced,
            )
            .await;

        let person = result
            .entities
            .iter()
            .find(|e| e.entity_type == EntityType::Person)
            .unwrap();
        assert_eq!(person.text, "Jean Dupont");
        assert_eq!(person.replacement, "Personne A");
        assert_eq!(person.source, EntitySource::StatisticalModel);
        assert_eq!(result.stats.entities_by_type[&EntityType::Phone], 1);
    }

    #[tokio::test]
    async fn test_enhanced_without_recognizer() {
        let config = AnonymizationConfig {
            recognizer: RecognizerKind::None,
            ..offline_config()
        };
        let engine = AnonymizationEngine::new(config).unwrap();
        let result = engine
            .process("Maître Jean Dupont", ProcessingMode::Enhanced)
            .await;
        assert!(result.entities.is_empty());
        assert!(!result.stats.recognizer_available);
        assert_eq!(result.stats.mode_used, ProcessingMode::Enhanced);
    }

    #[tokio::test]
    async fn test_remote_mode_reports_availability() {
        let engine = AnonymizationEngine::new(offline_config())
            .unwrap()
            .with_remote(Arc::new(StubRemote {
                available: true,
                entities: Vec::new(),
            }));

        let result = engine.process("texte", ProcessingMode::Remote).await;
        assert!(result.stats.remote_available);

        let result = engine.process("texte", ProcessingMode::Basic).await;
        assert!(!result.stats.remote_available);
    }

    #[tokio::test]
    async fn test_remote_entities_are_reconciled() {
        let text = "Appelez le 06 12 34 56 78";
        let overlapping = Entity::new(
            EntityType::Phone,
            EntitySource::RemoteModel,
            "06 12",
            Span::new(11, 16),
            "X",
        )
        .with_confidence(0.7);

        let engine = AnonymizationEngine::new(offline_config())
            .unwrap()
            .with_remote(Arc::new(StubRemote {
                available: true,
                entities: vec![overlapping],
            }));

        let result = engine.process(text, ProcessingMode::Remote).await;
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].source, EntitySource::Pattern);
        assert_eq!(result.stats.candidates_proposed, 2);
        assert_eq!(result.stats.candidates_discarded, 1);
    }

    #[tokio::test]
    async fn test_remote_entities_outside_text_are_dropped() {
        let text = "Plaidoirie de Jean Dupont";
        let valid = Entity::new(
            EntityType::Person,
            EntitySource::RemoteModel,
            "Jean Dupont",
            Span::new(14, 25),
            "Personne A",
        );
        let out_of_range = Entity::new(
            EntityType::Person,
            EntitySource::RemoteModel,
            "Paul Roy",
            Span::new(20, 60),
            "Personne B",
        );
        let wrong_text = Entity::new(
            EntityType::Organization,
            EntitySource::RemoteModel,
            "Cabinet Martin",
            Span::new(0, 10),
            "Organisation A",
        );
        let empty = Entity::new(
            EntityType::Person,
            EntitySource::RemoteModel,
            "",
            Span::new(3, 3),
            "Personne C",
        );

        let engine = AnonymizationEngine::new(offline_config())
            .unwrap()
            .with_remote(Arc::new(StubRemote {
                available: true,
                entities: vec![valid, out_of_range, wrong_text, empty],
            }));

        let result = engine.process(text, ProcessingMode::Remote).await;
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].text, "Jean Dupont");
        assert_eq!(result.stats.candidates_proposed, 1);

        let redacted = engine.redact(text, &result.entities).unwrap();
        assert_eq!(redacted, "Plaidoirie de Personne A");
    }

    #[tokio::test]
    async fn test_health_and_models() {
        let engine = AnonymizationEngine::new(offline_config()).unwrap();
        let health = engine.health().await;
        assert_eq!(health.status, ServiceStatus::Healthy);
        assert!(health.recognizer_available);
        assert!(!health.remote_available);
        assert!(engine.list_remote_models().await.is_empty());

        let engine = engine.with_remote(Arc::new(StubRemote {
            available: true,
            entities: Vec::new(),
        }));
        assert!(engine.health().await.remote_available);
        assert_eq!(engine.list_remote_models().await, vec!["stub:1b"]);
    }

    #[tokio::test]
    async fn test_audit_entries_written() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let mut config = offline_config();
        config.audit.enabled = true;
        config.audit.log_path = log_path.clone();

        let engine = AnonymizationEngine::new(config).unwrap();
        let text = "jean@test.fr";
        let result = engine.process(text, ProcessingMode::Basic).await;
        engine.redact(text, &result.entities).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("jean@test.fr"));
    }

    #[tokio::test]
    async fn test_engine_is_shareable() {
        let engine = Arc::new(AnonymizationEngine::new(offline_config()).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                tokio::spawn(async move {
                    engine
                        .process("Me Paul Roy et Mme Anne Roy", ProcessingMode::Enhanced)
                        .await
                })
            })
            .collect();

        for handle in handles {
            let result = handle.await.unwrap();
            let replacements: Vec<_> = result
                .entities
                .iter()
                .map(|e| e.replacement.as_str())
                .collect();
            assert_eq!(replacements, vec!["Personne A", "Personne B"]);
        }
    }
}
