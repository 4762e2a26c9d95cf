//! Caller-side entity editing
//!
//! Manual entities, replacement/selection edits and grouping. None of these
//! operations move an offset: spans always stay anchored to the original text.

use crate::anonymization::models::{Entity, EntitySource, EntityType, Span};
use crate::anonymization::offset::OffsetMap;
use crate::domain::{EntityId, LexanonError, RedactionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Create a user-defined entity over `span` of `original`
///
/// The entity text is captured from the original, so the span must lie
/// within it.
pub fn manual_entity(
    original: &str,
    entity_type: EntityType,
    span: Span,
    replacement: impl Into<String>,
) -> Result<Entity> {
    let id = EntityId::generate();
    if span.is_empty() {
        return Err(RedactionError::EmptySpan {
            entity_id: id,
            start: span.start,
            end: span.end,
        }
        .into());
    }

    let offsets = OffsetMap::new(original);
    let text = offsets
        .slice(original, span)
        .ok_or_else(|| RedactionError::SpanOutOfBounds {
            entity_id: id.clone(),
            start: span.start,
            end: span.end,
            len: offsets.char_len(),
        })?;

    let mut entity = Entity::new(entity_type, EntitySource::Manual, text, span, replacement);
    entity.id = id;
    Ok(entity)
}

/// Change to one entity's replacement or selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEdit {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl EntityEdit {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            replacement: None,
            selected: None,
        }
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }
}

/// Apply edits in order; an edit naming an unknown id fails the whole batch
pub fn apply_edits(entities: &mut [Entity], edits: &[EntityEdit]) -> Result<()> {
    let known: HashSet<&EntityId> = entities.iter().map(|e| &e.id).collect();
    if let Some(unknown) = edits.iter().find(|edit| !known.contains(&edit.id)) {
        return Err(LexanonError::Validation(format!(
            "Unknown entity id: {}",
            unknown.id
        )));
    }

    for edit in edits {
        if let Some(entity) = entities.iter_mut().find(|e| e.id == edit.id) {
            if let Some(replacement) = &edit.replacement {
                entity.replacement = replacement.clone();
            }
            if let Some(selected) = edit.selected {
                entity.selected = selected;
            }
        }
    }

    Ok(())
}

/// Merge the entities named by `ids` into one multi-span entity
///
/// The group takes the first member's id, type and text, the lowest member
/// confidence and the given replacement. Its positions are the union of the
/// members' spans, sorted. It sits where the first member was; other
/// entities keep their order.
pub fn group_entities(
    entities: Vec<Entity>,
    ids: &[EntityId],
    replacement: impl Into<String>,
) -> Result<Vec<Entity>> {
    if ids.is_empty() {
        return Err(LexanonError::Validation(
            "Cannot group an empty entity list".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LexanonError::Validation(format!(
                "Entity id listed twice in group: {id}"
            )));
        }
        if !entities.iter().any(|e| &e.id == id) {
            return Err(LexanonError::Validation(format!("Unknown entity id: {id}")));
        }
    }

    let first_id = &ids[0];
    let mut members: Vec<Entity> = Vec::with_capacity(ids.len());
    let mut rest: Vec<Entity> = Vec::with_capacity(entities.len());
    let mut insert_at = 0;

    for entity in entities {
        if seen.contains(&entity.id) {
            if &entity.id == first_id {
                insert_at = rest.len();
            }
            members.push(entity);
        } else {
            rest.push(entity);
        }
    }

    members.sort_by_key(|m| ids.iter().position(|id| id == &m.id));

    let mut positions: Vec<Span> = members
        .iter()
        .flat_map(|m| m.positions.iter().copied())
        .collect();
    positions.sort();
    positions.dedup();

    let confidence = members
        .iter()
        .map(|m| m.confidence)
        .fold(f32::INFINITY, f32::min);

    let mut group = members.swap_remove(0);
    group.positions = positions;
    group.replacement = replacement.into();
    group.confidence = confidence;
    group.selected = true;

    tracing::debug!(
        members = ids.len(),
        spans = group.positions.len(),
        "Entities grouped"
    );

    rest.insert(insert_at, group);
    Ok(rest)
}
