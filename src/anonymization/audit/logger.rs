//! Audit logger for anonymization operations

use crate::anonymization::models::Entity;
use crate::anonymization::report::ProcessingResult;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    event: &'static str,
    mode: Option<String>,
    entities_count: usize,
    occurrences_count: usize,
    processing_time_ms: Option<u64>,
    entities: Vec<AuditEntity>,
}

/// Audit entity entry (with hashed text)
#[derive(Debug, Serialize)]
struct AuditEntity {
    entity_type: String,
    source: String,
    confidence: f32,
    spans: Vec<(usize, usize)>,
    selected: bool,
    /// SHA-256 hash of the matched text (never log plaintext)
    value_hash: String,
}

/// Audit logger for anonymization operations
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log one detection call
    pub fn log_processing(&self, result: &ProcessingResult) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: result.stats.processed_at.to_rfc3339(),
            event: "process",
            mode: Some(result.stats.mode_used.to_string()),
            entities_count: result.entities.len(),
            occurrences_count: result.stats.total_occurrences,
            processing_time_ms: Some(result.stats.processing_time_ms),
            entities: result
                .entities
                .iter()
                .map(|e| self.create_audit_entity(e))
                .collect(),
        };

        self.write_entry(&entry)
    }

    /// Log one redaction call
    pub fn log_redaction(&self, entities: &[Entity]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let selected: Vec<&Entity> = entities.iter().filter(|e| e.selected).collect();
        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            event: "redact",
            mode: None,
            entities_count: selected.len(),
            occurrences_count: selected.iter().map(|e| e.positions.len()).sum(),
            processing_time_ms: None,
            entities: selected
                .into_iter()
                .map(|e| self.create_audit_entity(e))
                .collect(),
        };

        self.write_entry(&entry)
    }

    /// Create an audit entity entry with hashed text
    fn create_audit_entity(&self, entity: &Entity) -> AuditEntity {
        AuditEntity {
            entity_type: entity.entity_type.label().to_string(),
            source: format!("{:?}", entity.source),
            confidence: entity.confidence,
            spans: entity.positions.iter().map(|s| (s.start, s.end)).collect(),
            selected: entity.selected,
            value_hash: self.hash_value(&entity.text),
        }
    }

    /// Hash a sensitive value using SHA-256
    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        format!("{result:x}")
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Event: {} | Mode: {} | Entities: {} | Occurrences: {} | Time: {}",
                entry.timestamp,
                entry.event,
                entry.mode.as_deref().unwrap_or("-"),
                entry.entities_count,
                entry.occurrences_count,
                entry
                    .processing_time_ms
                    .map_or_else(|| "-".to_string(), |ms| format!("{ms}ms"))
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}
