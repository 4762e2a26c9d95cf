//! Overlap resolution between detector proposals
//!
//! A single greedy pass in input order. A candidate replaces the accepted
//! entities it overlaps only when its confidence is strictly higher than
//! every one of them; on ties the first-seen entity stays. The result is
//! span-disjoint but order-sensitive and not globally optimal.

use crate::anonymization::models::Entity;

/// Result of reconciling a candidate list
#[derive(Debug, Clone, Default)]
pub struct ReconciliationOutcome {
    /// Span-disjoint entities, in acceptance order
    pub entities: Vec<Entity>,
    /// Number of candidates dropped or evicted
    pub discarded: usize,
}

/// Resolve overlaps among `candidates`
pub fn reconcile(candidates: Vec<Entity>) -> ReconciliationOutcome {
    let mut accepted: Vec<Entity> = Vec::with_capacity(candidates.len());
    let mut discarded = 0;

    for candidate in candidates {
        let wins = accepted
            .iter()
            .filter(|existing| existing.overlaps(&candidate))
            .all(|existing| candidate.confidence > existing.confidence);

        if !wins {
            tracing::trace!(
                entity_type = %candidate.entity_type,
                confidence = candidate.confidence,
                "Candidate lost overlap resolution"
            );
            discarded += 1;
            continue;
        }

        let before = accepted.len();
        accepted.retain(|existing| !existing.overlaps(&candidate));
        discarded += before - accepted.len();
        accepted.push(candidate);
    }

    ReconciliationOutcome {
        entities: accepted,
        discarded,
    }
}
