//! Redaction applier
//!
//! Substitutes the spans of selected entities with their replacement text.
//! All preconditions are checked before the first substitution, so a call
//! either returns the complete output or a [`RedactionError`] and nothing else.

use crate::anonymization::models::{Entity, Span};
use crate::anonymization::offset::OffsetMap;
use crate::domain::{EntityId, RedactionError};

/// Apply the selected entities of `entities` to `original`
///
/// Every span of every selected entity is replaced. Spans are applied from
/// the end of the text backwards so earlier offsets stay valid. Text outside
/// the selected spans is copied unchanged.
pub fn apply(original: &str, entities: &[Entity]) -> Result<String, RedactionError> {
    let offsets = OffsetMap::new(original);
    let char_len = offsets.char_len();

    let mut edits: Vec<(Span, &EntityId, &str)> = Vec::new();
    for entity in entities.iter().filter(|e| e.selected) {
        if entity.positions.is_empty() {
            return Err(RedactionError::MissingPositions(entity.id.clone()));
        }
        for span in &entity.positions {
            if span.is_empty() {
                return Err(RedactionError::EmptySpan {
                    entity_id: entity.id.clone(),
                    start: span.start,
                    end: span.end,
                });
            }
            if span.end > char_len {
                return Err(RedactionError::SpanOutOfBounds {
                    entity_id: entity.id.clone(),
                    start: span.start,
                    end: span.end,
                    len: char_len,
                });
            }
            edits.push((*span, &entity.id, entity.replacement.as_str()));
        }
    }

    edits.sort_by_key(|(span, _, _)| (span.start, span.end));
    for pair in edits.windows(2) {
        let (first, first_id, _) = pair[0];
        let (second, second_id, _) = pair[1];
        if first.overlaps(&second) {
            return Err(RedactionError::OverlappingSpans {
                first: first_id.clone(),
                first_start: first.start,
                first_end: first.end,
                second: second_id.clone(),
                second_start: second.start,
                second_end: second.end,
            });
        }
    }

    let mut output = original.to_string();
    for (span, entity_id, replacement) in edits.iter().rev() {
        let range = offsets
            .byte_range(*span)
            .ok_or_else(|| RedactionError::SpanOutOfBounds {
                entity_id: (*entity_id).clone(),
                start: span.start,
                end: span.end,
                len: char_len,
            })?;
        output.replace_range(range, replacement);
    }

    tracing::debug!(spans = edits.len(), "Redaction applied");

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::{EntitySource, EntityType};

    fn entity(start: usize, end: usize, replacement: &str) -> Entity {
        Entity::new(
            EntityType::Phone,
            EntitySource::Pattern,
            "",
            Span::new(start, end),
            replacement,
        )
    }

    #[test]
    fn test_identity_without_entities() {
        let text = "Aucune donnée à masquer.";
        assert_eq!(apply(text, &[]).unwrap(), text);
    }

    #[test]
    fn test_phone_and_email_scenario() {
        let text = "Contactez le 06 12 34 56 78 ou jean@test.fr";
        let entities = vec![
            entity(13, 27, "06 XX XX XX XX"),
            entity(31, 43, "email.anonymise@exemple.fr"),
        ];
        assert_eq!(
            apply(text, &entities).unwrap(),
            "Contactez le 06 XX XX XX XX ou email.anonymise@exemple.fr"
        );
    }

    #[test]
    fn test_unselected_entities_are_skipped() {
        let text = "Contactez le 06 12 34 56 78";
        let mut e = entity(13, 27, "06 XX XX XX XX");
        e.selected = false;
        assert_eq!(apply(text, &[e]).unwrap(), text);
    }

    #[test]
    fn test_unselected_entities_are_not_validated() {
        let text = "court";
        let mut e = entity(2, 99, "X");
        e.selected = false;
        assert_eq!(apply(text, &[e]).unwrap(), text);
    }

    #[test]
    fn test_multi_span_entity() {
        let text = "Dupont a vu Dupont.";
        let mut grouped = entity(0, 6, "Personne A");
        grouped.positions.push(Span::new(12, 18));
        assert_eq!(apply(text, &[grouped]).unwrap(), "Personne A a vu Personne A.");
    }

    #[test]
    fn test_accented_offsets() {
        let text = "Née à Besançon, tél 06 12 34 56 78.";
        let start = text.chars().position(|c| c == '0').unwrap();
        let e = entity(start, start + 14, "06 XX XX XX XX");
        assert_eq!(
            apply(text, &[e]).unwrap(),
            "Née à Besançon, tél 06 XX XX XX XX."
        );
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let text = "a b c";
        let forward = vec![entity(0, 1, "X"), entity(4, 5, "Z")];
        let backward = vec![entity(4, 5, "Z"), entity(0, 1, "X")];
        assert_eq!(apply(text, &forward), apply(text, &backward));
    }

    #[test]
    fn test_out_of_bounds() {
        let e = entity(2, 9, "X");
        let err = apply("court", &[e.clone()]).unwrap_err();
        assert_eq!(
            err,
            RedactionError::SpanOutOfBounds {
                entity_id: e.id,
                start: 2,
                end: 9,
                len: 5
            }
        );
    }

    #[test]
    fn test_empty_span() {
        let err = apply("texte", &[entity(3, 3, "X")]).unwrap_err();
        assert!(matches!(err, RedactionError::EmptySpan { start: 3, end: 3, .. }));
    }

    #[test]
    fn test_missing_positions() {
        let mut e = entity(0, 1, "X");
        e.positions.clear();
        let err = apply("texte", &[e]).unwrap_err();
        assert!(matches!(err, RedactionError::MissingPositions(_)));
    }

    #[test]
    fn test_overlapping_spans_rejected() {
        let err = apply("0123456789", &[entity(0, 5, "X"), entity(4, 8, "Y")]).unwrap_err();
        assert!(matches!(
            err,
            RedactionError::OverlappingSpans {
                first_start: 0,
                second_start: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_adjacent_spans_allowed() {
        assert_eq!(
            apply("abcdef", &[entity(0, 3, "X"), entity(3, 6, "Y")]).unwrap(),
            "XY"
        );
    }
}
