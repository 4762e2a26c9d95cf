//! Entity data models

use crate::domain::ids::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of sensitive information an entity carries
///
/// The aliases accept the names used by earlier front ends (`siret`, `ssn`,
/// `legal`) so that saved entity lists still deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// French telephone numbers
    Phone,
    /// Email addresses
    Email,
    /// SIRET business registry numbers (14 digits, Luhn)
    #[serde(alias = "siret")]
    BusinessId,
    /// NIR social-security numbers (15 digits)
    #[serde(alias = "ssn")]
    NationalId,
    /// Street addresses and postal code + locality
    Address,
    /// Docket numbers, case files and statute articles
    #[serde(alias = "legal")]
    LegalReference,
    /// Natural persons
    Person,
    /// Companies, firms and other legal persons
    Organization,
}

impl EntityType {
    /// All entity types, in pattern-rule order
    pub const ALL: [EntityType; 8] = [
        Self::Phone,
        Self::Email,
        Self::BusinessId,
        Self::NationalId,
        Self::Address,
        Self::LegalReference,
        Self::Person,
        Self::Organization,
    ];

    /// Get the machine label for the type
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::BusinessId => "business_id",
            Self::NationalId => "national_id",
            Self::Address => "address",
            Self::LegalReference => "legal_reference",
            Self::Person => "person",
            Self::Organization => "organization",
        }
    }

    /// Whether entities of this type come from name/organization recognition
    pub fn is_named_entity(&self) -> bool {
        matches!(self, Self::Person | Self::Organization)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            "business_id" | "siret" => Ok(Self::BusinessId),
            "national_id" | "ssn" | "nir" => Ok(Self::NationalId),
            "address" => Ok(Self::Address),
            "legal_reference" | "legal" => Ok(Self::LegalReference),
            "person" => Ok(Self::Person),
            "organization" | "organisation" => Ok(Self::Organization),
            _ => Err(format!("Unknown entity type: {s}")),
        }
    }
}

/// Which producer created an entity
///
/// Always set by the producing detector, never inferred afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitySource {
    /// Deterministic pattern rule
    #[serde(alias = "REGEX")]
    Pattern,
    /// Name/organization recognizer
    #[serde(alias = "NER")]
    StatisticalModel,
    /// Remote language model
    #[serde(alias = "OLLAMA")]
    RemoteModel,
    /// Added by the user
    #[serde(alias = "MANUAL")]
    Manual,
}

/// Half-open character interval `[start, end)` into the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Half-open overlap test: `a.start < b.end && b.start < a.end`
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

fn default_selected() -> bool {
    true
}

/// A candidate or confirmed piece of sensitive information
///
/// `text` and `positions` are anchored to the original, unmodified document.
/// Detectors never touch an entity after creating it; only the caller edits
/// `selected` and `replacement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique within one processing call
    #[serde(default)]
    pub id: EntityId,
    /// Exact matched substring
    pub text: String,
    /// Kind of information
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Producer of this entity
    pub source: EntitySource,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Literal text substituted on redaction
    pub replacement: String,
    /// Character spans, primary span first
    pub positions: Vec<Span>,
    /// Whether redaction applies this entity
    #[serde(default = "default_selected")]
    pub selected: bool,
}

impl Entity {
    /// Create a single-span entity with maximal confidence
    pub fn new(
        entity_type: EntityType,
        source: EntitySource,
        text: impl Into<String>,
        span: Span,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::generate(),
            text: text.into(),
            entity_type,
            source,
            confidence: 1.0,
            replacement: replacement.into(),
            positions: vec![span],
            selected: true,
        }
    }

    /// Set the confidence score, clamped to `[0, 1]`
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        self
    }

    /// First span, the one used for ordering and display
    pub fn primary_span(&self) -> Option<Span> {
        self.positions.first().copied()
    }

    /// True if any span of `self` overlaps any span of `other`
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.positions
            .iter()
            .any(|a| other.positions.iter().any(|b| a.overlaps(b)))
    }
}

/// Detection mode requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    /// Pattern rules only
    #[default]
    #[serde(alias = "standard")]
    Basic,
    /// Pattern rules plus name/organization recognition
    #[serde(alias = "advanced")]
    Enhanced,
    /// Pattern rules plus the remote model extractor
    #[serde(alias = "ollama")]
    Remote,
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => f.write_str("basic"),
            Self::Enhanced => f.write_str("enhanced"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

impl FromStr for ProcessingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" | "standard" => Ok(Self::Basic),
            "enhanced" | "advanced" => Ok(Self::Enhanced),
            "remote" | "ollama" => Ok(Self::Remote),
            _ => Err(format!(
                "Invalid processing mode: {s}. Must be one of: basic, enhanced, remote"
            )),
        }
    }
}
