//! Processing results and statistics

use crate::anonymization::models::{Entity, EntityType, ProcessingMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Statistics for one `process` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Wall-clock processing time (ms)
    pub processing_time_ms: u64,

    /// Mode actually used
    pub mode_used: ProcessingMode,

    /// Total spans across the reconciled entities
    pub total_occurrences: usize,

    /// Candidates proposed by all detectors
    pub candidates_proposed: usize,

    /// Candidates removed by overlap resolution
    pub candidates_discarded: usize,

    /// Reconciled entities per type
    pub entities_by_type: BTreeMap<EntityType, usize>,

    /// Whether the name/organization recognizer was usable
    pub recognizer_available: bool,

    /// Whether the remote model endpoint answered (only probed in remote mode)
    pub remote_available: bool,

    /// When processing finished
    pub processed_at: DateTime<Utc>,
}

impl ProcessingStats {
    /// Build the per-type and occurrence counts from reconciled entities
    pub fn from_entities(entities: &[Entity], mode_used: ProcessingMode) -> Self {
        let mut entities_by_type = BTreeMap::new();
        for entity in entities {
            *entities_by_type.entry(entity.entity_type).or_insert(0) += 1;
        }

        Self {
            processing_time_ms: 0,
            mode_used,
            total_occurrences: entities.iter().map(|e| e.positions.len()).sum(),
            candidates_proposed: 0,
            candidates_discarded: 0,
            entities_by_type,
            recognizer_available: false,
            remote_available: false,
            processed_at: Utc::now(),
        }
    }
}

/// Result of one `process` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Reconciled, span-disjoint entities
    pub entities: Vec<Entity>,
    pub stats: ProcessingStats,
}

/// Overall service status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Pattern detection works; optional components may be missing
    Healthy,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => f.write_str("healthy"),
        }
    }
}

/// Availability of the engine's components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: ServiceStatus,
    pub recognizer_available: bool,
    pub remote_available: bool,
    pub timestamp: DateTime<Utc>,
}

impl ProcessingResult {
    /// Print a human-readable summary to stdout
    pub fn print_summary(&self) {
        let stats = &self.stats;
        println!("\n📋 Detection Summary");
        println!("═══════════════════════════════════════════════════════════");
        println!("Mode:                  {}", stats.mode_used);
        println!("Entities:              {}", self.entities.len());
        println!("Occurrences:           {}", stats.total_occurrences);
        println!(
            "Candidates:            {} proposed, {} discarded",
            stats.candidates_proposed, stats.candidates_discarded
        );
        println!("Processing time:       {} ms", stats.processing_time_ms);
        println!(
            "Recognizer:            {}",
            if stats.recognizer_available { "available" } else { "unavailable" }
        );
        println!(
            "Remote model:          {}",
            if stats.remote_available { "available" } else { "unavailable" }
        );

        if !stats.entities_by_type.is_empty() {
            println!("\nBy type:");
            for (entity_type, count) in &stats.entities_by_type {
                println!("  {:<20} {}", entity_type.label(), count);
            }
        }
        println!("═══════════════════════════════════════════════════════════\n");
    }
}
