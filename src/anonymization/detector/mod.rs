//! Entity detection module
//!
//! Provides the detector interface and its implementations:
//! - [`regex::PatternDetector`]: pattern rules from the [`patterns`] library
//! - [`ner::NerDetector`]: person/organization recognition behind a pluggable recognizer
//! - [`remote::OllamaClient`]: remote model extractor (availability probing only)

pub mod checksum;
pub mod ner;
pub mod patterns;
pub mod regex;
pub mod remote;

use crate::anonymization::models::Entity;
use crate::anonymization::offset::OffsetMap;
use ner::PlaceholderCounters;

/// Per-call detection state
///
/// Created fresh for every processing call and threaded through each detector,
/// so nothing call-specific ever lives on a shared detector instance.
#[derive(Debug)]
pub struct DetectionContext {
    offsets: OffsetMap,
    counters: PlaceholderCounters,
}

impl DetectionContext {
    /// Create the context for one text
    pub fn new(text: &str) -> Self {
        Self {
            offsets: OffsetMap::new(text),
            counters: PlaceholderCounters::default(),
        }
    }

    /// Byte/char offset table for the text
    pub fn offsets(&self) -> &OffsetMap {
        &self.offsets
    }

    /// Placeholder numbering for this call
    pub fn counters_mut(&mut self) -> &mut PlaceholderCounters {
        &mut self.counters
    }

    /// Current placeholder numbering
    pub fn counters(&self) -> &PlaceholderCounters {
        &self.counters
    }
}

/// Trait for entity detection implementations
///
/// Detection is best-effort and never fails: a detector that hits a problem
/// logs it and returns what its intact parts produced.
pub trait EntityDetector: Send + Sync {
    /// Detector name, used in logs
    fn name(&self) -> &str;

    /// Detect entities in `text`, with character offsets into `text`
    fn detect(&self, text: &str, ctx: &mut DetectionContext) -> Vec<Entity>;
}
