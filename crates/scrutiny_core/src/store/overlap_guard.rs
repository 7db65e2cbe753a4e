//! Overlap guard for candidate annotation ranges.

use crate::model::annotation::{Annotation, AnnotationId};
use crate::model::range::TextRange;

/// Returns `true` when `candidate` intersects none of `existing`.
///
/// Touching endpoints are accepted.
pub fn accepts<'a>(
    candidate: TextRange,
    existing: impl IntoIterator<Item = &'a Annotation>,
) -> bool {
    first_conflict(candidate, existing).is_none()
}

/// Returns the ID of the first annotation (in iteration order) whose range
/// intersects `candidate`.
pub fn first_conflict<'a>(
    candidate: TextRange,
    existing: impl IntoIterator<Item = &'a Annotation>,
) -> Option<AnnotationId> {
    existing
        .into_iter()
        .find(|annotation| candidate.overlaps(&annotation.range))
        .map(|annotation| annotation.id)
}

#[cfg(test)]
mod tests {
    use super::{accepts, first_conflict};
    use crate::model::annotation::Annotation;
    use crate::model::range::TextRange;
    use crate::model::taxonomy::CodeGroup;

    fn annotation(start: usize, end: usize) -> Annotation {
        Annotation::new(
            "FLOW",
            "Improve logical flow",
            CodeGroup::Structure.color(),
            TextRange::new(start, end),
        )
    }

    #[test]
    fn accepts_disjoint_and_touching_candidates() {
        let existing = vec![annotation(5, 10)];
        assert!(accepts(TextRange::new(0, 5), &existing));
        assert!(accepts(TextRange::new(10, 14), &existing));
        assert!(accepts(TextRange::new(20, 30), &existing));
    }

    #[test]
    fn rejects_any_intersection() {
        let existing = vec![annotation(5, 10)];
        assert!(!accepts(TextRange::new(7, 12), &existing));
        assert!(!accepts(TextRange::new(0, 6), &existing));
        assert!(!accepts(TextRange::new(6, 8), &existing));
        assert!(!accepts(TextRange::new(0, 20), &existing));
    }

    #[test]
    fn reports_first_conflicting_id() {
        let first = annotation(0, 4);
        let second = annotation(6, 9);
        let existing = vec![first.clone(), second.clone()];
        assert_eq!(
            first_conflict(TextRange::new(3, 7), &existing),
            Some(first.id)
        );
        assert_eq!(
            first_conflict(TextRange::new(5, 7), &existing),
            Some(second.id)
        );
        assert_eq!(first_conflict(TextRange::new(4, 6), &existing), None);
    }

    #[test]
    fn empty_set_accepts_everything() {
        let existing: Vec<Annotation> = Vec::new();
        assert!(accepts(TextRange::new(0, 1), &existing));
    }
}
