//! Person and organization recognition
//!
//! The statistical recognizer is an external capability behind
//! [`NameOrgRecognizer`]. [`NerDetector`] turns whatever the recognizer
//! reports into entities and hands out the `Personne A` / `Organisation A`
//! placeholders from the per-call [`PlaceholderCounters`].

use super::{DetectionContext, EntityDetector};
use crate::anonymization::models::{Entity, EntitySource, EntityType, Span};
use crate::anonymization::offset::OffsetMap;
use anyhow::{Context, Result};
use regex::Regex;
use std::sync::Arc;

/// Default confidence for recognized persons
pub const DEFAULT_PERSON_CONFIDENCE: f32 = 0.9;

/// Default confidence for recognized organizations
pub const DEFAULT_ORGANIZATION_CONFIDENCE: f32 = 0.85;

/// Label reported by a recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameOrgLabel {
    Person,
    Organization,
}

impl NameOrgLabel {
    fn entity_type(self) -> EntityType {
        match self {
            Self::Person => EntityType::Person,
            Self::Organization => EntityType::Organization,
        }
    }
}

/// A span reported by a recognizer, in character offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecognizedSpan {
    pub span: Span,
    pub label: NameOrgLabel,
    /// Recognizer's own score, if it produces one
    pub confidence: Option<f32>,
}

/// Name/organization recognition capability
pub trait NameOrgRecognizer: Send + Sync {
    /// Recognizer name, used in logs
    fn name(&self) -> &str;

    /// Whether the underlying model is loaded and usable
    fn is_available(&self) -> bool;

    /// Recognize persons and organizations, with character offsets into `text`
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>>;
}

/// Recognizer used when no model is installed
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRecognizer;

impl NameOrgRecognizer for UnavailableRecognizer {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn recognize(&self, _text: &str) -> Result<Vec<RecognizedSpan>> {
        Ok(Vec::new())
    }
}

// Capitalized word, including accented and hyphenated forms ("Jean-Éric", "D'Arcy")
const CAPITALIZED_WORD: &str = r"\p{Lu}[\p{L}'\-]+";
const ORG_WORD: &str = r"\p{Lu}[\p{L}&'\-]*";
const CIVILITY_TITLES: &str = r"M\.|Mme|Madame|Monsieur|Maître|Me|Mlle|Dr";
const LEGAL_FORMS: &str = "SARL|SASU|SAS|SA|SCI|EURL|SNC";
const ORG_PREFIXES: &str = "[Ss]ociété|[Cc]abinet";

/// High-precision French heuristic recognizer
///
/// - civility title followed by capitalized words: person (title excluded)
/// - capitalized words ending with a legal form: organization
/// - `société` / `cabinet` followed by capitalized words: organization
///
/// Overlapping hits keep the earliest, then longest, span.
#[derive(Debug, Clone)]
pub struct HeuristicRecognizer {
    person: Regex,
    organization_suffix: Regex,
    organization_prefix: Regex,
}

impl HeuristicRecognizer {
    pub fn new() -> Result<Self> {
        let person = Regex::new(&format!(
            r"\b(?:{CIVILITY_TITLES})\s+({CAPITALIZED_WORD}(?:\s+{CAPITALIZED_WORD}){{0,2}})"
        ))
        .context("Failed to compile person heuristic")?;

        let organization_suffix = Regex::new(&format!(
            r"\b((?:{ORG_WORD}\s+){{1,3}}(?:{LEGAL_FORMS}))\b"
        ))
        .context("Failed to compile organization suffix heuristic")?;

        let organization_prefix = Regex::new(&format!(
            r"\b(?:{ORG_PREFIXES})\s+({ORG_WORD}(?:\s+{ORG_WORD}){{0,2}})"
        ))
        .context("Failed to compile organization prefix heuristic")?;

        Ok(Self {
            person,
            organization_suffix,
            organization_prefix,
        })
    }

    fn collect(
        regex: &Regex,
        label: NameOrgLabel,
        text: &str,
        offsets: &OffsetMap,
        out: &mut Vec<RecognizedSpan>,
    ) -> Result<()> {
        for caps in regex.captures_iter(text) {
            let Some(group) = caps.get(1) else {
                continue;
            };
            let span = offsets
                .span_from_bytes(group.start(), group.end())
                .context("Heuristic match is not on a character boundary")?;
            out.push(RecognizedSpan {
                span,
                label,
                confidence: None,
            });
        }
        Ok(())
    }
}

impl NameOrgRecognizer for HeuristicRecognizer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>> {
        let offsets = OffsetMap::new(text);
        let mut found = Vec::new();

        Self::collect(&self.person, NameOrgLabel::Person, text, &offsets, &mut found)?;
        Self::collect(
            &self.organization_suffix,
            NameOrgLabel::Organization,
            text,
            &offsets,
            &mut found,
        )?;
        Self::collect(
            &self.organization_prefix,
            NameOrgLabel::Organization,
            text,
            &offsets,
            &mut found,
        )?;

        found.sort_by(|a, b| {
            a.span
                .start
                .cmp(&b.span.start)
                .then_with(|| b.span.len().cmp(&a.span.len()))
        });

        let mut accepted: Vec<RecognizedSpan> = Vec::with_capacity(found.len());
        for candidate in found {
            if accepted.iter().all(|a| !a.span.overlaps(&candidate.span)) {
                accepted.push(candidate);
            }
        }

        Ok(accepted)
    }
}

/// Per-call numbering for person and organization placeholders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderCounters {
    person: usize,
    organization: usize,
}

impl PlaceholderCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next person placeholder: `Personne A`, `Personne B`, ...
    pub fn next_person(&mut self) -> String {
        self.person += 1;
        format!("Personne {}", alphabetic_label(self.person))
    }

    /// Next organization placeholder: `Organisation A`, ...
    pub fn next_organization(&mut self) -> String {
        self.organization += 1;
        format!("Organisation {}", alphabetic_label(self.organization))
    }

    /// Placeholders handed out so far, as (persons, organizations)
    pub fn issued(&self) -> (usize, usize) {
        (self.person, self.organization)
    }
}

/// Spreadsheet-style label for a 1-based index: 1 → A, 26 → Z, 27 → AA
pub fn alphabetic_label(index: usize) -> String {
    let mut n = index.max(1);
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Entity detector backed by a [`NameOrgRecognizer`]
#[derive(Clone)]
pub struct NerDetector {
    recognizer: Arc<dyn NameOrgRecognizer>,
    person_confidence: f32,
    organization_confidence: f32,
}

impl std::fmt::Debug for NerDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NerDetector")
            .field("recognizer", &self.recognizer.name())
            .field("person_confidence", &self.person_confidence)
            .field("organization_confidence", &self.organization_confidence)
            .finish()
    }
}

impl NerDetector {
    pub fn new(recognizer: Arc<dyn NameOrgRecognizer>) -> Self {
        Self {
            recognizer,
            person_confidence: DEFAULT_PERSON_CONFIDENCE,
            organization_confidence: DEFAULT_ORGANIZATION_CONFIDENCE,
        }
    }

    /// Override the confidences used when the recognizer reports none
    pub fn with_confidences(mut self, person: f32, organization: f32) -> Self {
        self.person_confidence = person;
        self.organization_confidence = organization;
        self
    }

    pub fn is_available(&self) -> bool {
        self.recognizer.is_available()
    }

    pub fn recognizer_name(&self) -> &str {
        self.recognizer.name()
    }

    fn default_confidence(&self, label: NameOrgLabel) -> f32 {
        match label {
            NameOrgLabel::Person => self.person_confidence,
            NameOrgLabel::Organization => self.organization_confidence,
        }
    }
}

impl EntityDetector for NerDetector {
    fn name(&self) -> &str {
        "ner"
    }

    fn detect(&self, text: &str, ctx: &mut DetectionContext) -> Vec<Entity> {
        if !self.recognizer.is_available() {
            return Vec::new();
        }

        let spans = match self.recognizer.recognize(text) {
            Ok(spans) => spans,
            Err(e) => {
                tracing::warn!(
                    recognizer = self.recognizer.name(),
                    error = %e,
                    "Recognizer failed, no named entities for this call"
                );
                return Vec::new();
            }
        };

        // Validate everything before numbering so a bad span never leaves gaps
        let mut slices = Vec::with_capacity(spans.len());
        for recognized in &spans {
            let slice = (!recognized.span.is_empty())
                .then(|| ctx.offsets().slice(text, recognized.span))
                .flatten();
            match slice {
                Some(slice) => slices.push(slice),
                None => {
                    tracing::warn!(
                        recognizer = self.recognizer.name(),
                        start = recognized.span.start,
                        end = recognized.span.end,
                        "Recognizer returned an invalid span, discarding its output"
                    );
                    return Vec::new();
                }
            }
        }

        let entities: Vec<Entity> = spans
            .iter()
            .zip(slices)
            .map(|(recognized, slice)| {
                let replacement = match recognized.label {
                    NameOrgLabel::Person => ctx.counters_mut().next_person(),
                    NameOrgLabel::Organization => ctx.counters_mut().next_organization(),
                };
                let confidence = recognized
                    .confidence
                    .unwrap_or_else(|| self.default_confidence(recognized.label));

                Entity::new(
                    recognized.label.entity_type(),
                    EntitySource::StatisticalModel,
                    slice,
                    recognized.span,
                    replacement,
                )
                .with_confidence(confidence)
            })
            .collect();

        tracing::debug!(
            recognizer = self.recognizer.name(),
            count = entities.len(),
            "Named entities recognized"
        );

        entities
    }
}
