//! In-memory annotation store over one canonical source text.
//!
//! # Responsibility
//! - Own every annotation record for one document.
//! - Enforce range validity and the non-overlap invariant on create.
//!
//! # Invariants
//! - For any two records A, B: `A.start >= B.end || A.end <= B.start`.
//! - Records are kept in insertion order and are never removed or reordered.
//! - Only `text` is mutated after creation.

use crate::model::annotation::{Annotation, AnnotationId};
use crate::model::range::{RangeError, TextRange};
use crate::model::taxonomy::Color;
use crate::store::overlap_guard;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Reason a `create` call did not add a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationRejection {
    /// Range is empty, out of bounds or splits a UTF-8 sequence.
    InvalidRange(RangeError),
    /// Range intersects an existing record.
    Overlap {
        candidate: TextRange,
        conflicting: AnnotationId,
    },
}

impl Display for AnnotationRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange(err) => write!(f, "invalid annotation range: {err}"),
            Self::Overlap {
                candidate,
                conflicting,
            } => write!(
                f,
                "annotation range {candidate} overlaps existing annotation {conflicting}"
            ),
        }
    }
}

impl Error for AnnotationRejection {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRange(err) => Some(err),
            Self::Overlap { .. } => None,
        }
    }
}

impl From<RangeError> for AnnotationRejection {
    fn from(value: RangeError) -> Self {
        Self::InvalidRange(value)
    }
}

/// Single source of truth for the annotations of one document.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    source: Arc<str>,
    records: Vec<Annotation>,
}

impl AnnotationStore {
    /// Creates an empty store indexing `source`.
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            records: Vec::new(),
        }
    }

    /// Canonical source text every range indexes.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.records.iter()
    }

    /// Appends a new record with a fresh ID and empty note.
    ///
    /// # Errors
    /// - `InvalidRange` when `range` does not fit the source.
    /// - `Overlap` when `range` intersects an existing record; the store is
    ///   left unchanged.
    pub fn create(
        &mut self,
        code: impl Into<String>,
        description: impl Into<String>,
        color: Color,
        range: TextRange,
    ) -> Result<&Annotation, AnnotationRejection> {
        range.validate_against(&self.source)?;
        if let Some(conflicting) = overlap_guard::first_conflict(range, &self.records) {
            return Err(AnnotationRejection::Overlap {
                candidate: range,
                conflicting,
            });
        }

        let annotation = Annotation::new(code, description, color, range);
        debug!(
            "event=annotation_create module=store status=ok id={} start={} end={} code={}",
            annotation.id, range.start, range.end, annotation.code
        );
        self.records.push(annotation);
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Replaces the note of one record.
    ///
    /// Returns `false` and changes nothing when `id` is unknown.
    pub fn set_text(&mut self, id: AnnotationId, text: impl Into<String>) -> bool {
        match self.records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.text = text.into();
                debug!(
                    "event=annotation_set_text module=store status=ok id={} text_len={}",
                    id,
                    record.text.len()
                );
                true
            }
            None => {
                debug!("event=annotation_set_text module=store status=not_found id={id}");
                false
            }
        }
    }

    /// Looks up one record by ID.
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the record whose range covers `offset`, if any.
    pub fn annotation_at(&self, offset: usize) -> Option<&Annotation> {
        self.records
            .iter()
            .find(|record| record.range.contains(offset))
    }
}

impl<'a> IntoIterator for &'a AnnotationStore {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{AnnotationRejection, AnnotationStore};
    use crate::model::range::{RangeError, TextRange};
    use crate::model::taxonomy::CodeGroup;
    use uuid::Uuid;

    fn store() -> AnnotationStore {
        AnnotationStore::new("The quick brown fox")
    }

    #[test]
    fn create_appends_with_empty_text() {
        let mut store = store();
        let created = store
            .create(
                "FLOW",
                "Improve logical flow",
                CodeGroup::Structure.color(),
                TextRange::new(4, 9),
            )
            .expect("valid range")
            .clone();

        assert_eq!(created.text, "");
        assert_eq!(created.excerpt(store.source()), Some("quick"));
        assert_eq!(store.get(created.id), Some(&created));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_rejects_invalid_range_without_mutation() {
        let mut store = store();
        let err = store
            .create("FLOW", "d", CodeGroup::Structure.color(), TextRange::new(4, 99))
            .expect_err("range past end must fail");
        assert_eq!(
            err,
            AnnotationRejection::InvalidRange(RangeError::OutOfBounds { end: 99, len: 19 })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn set_text_unknown_id_is_noop() {
        let mut store = store();
        store
            .create("TONE", "Adjust tone", CodeGroup::Style.color(), TextRange::new(0, 3))
            .expect("valid range");
        let before = store.annotations().to_vec();

        assert!(!store.set_text(Uuid::new_v4(), "ignored"));
        assert_eq!(store.annotations(), before.as_slice());
    }

    #[test]
    fn set_text_keeps_range_and_code() {
        let mut store = store();
        let id = store
            .create("TONE", "Adjust tone", CodeGroup::Style.color(), TextRange::new(0, 3))
            .expect("valid range")
            .id;

        assert!(store.set_text(id, "too plain"));
        let record = store.get(id).expect("record exists");
        assert_eq!(record.text, "too plain");
        assert_eq!(record.range, TextRange::new(0, 3));
        assert_eq!(record.code, "TONE");
    }

    #[test]
    fn annotation_at_hit_tests_half_open_ranges() {
        let mut store = store();
        let id = store
            .create("FLOW", "d", CodeGroup::Structure.color(), TextRange::new(4, 9))
            .expect("valid range")
            .id;
        assert_eq!(store.annotation_at(4).map(|a| a.id), Some(id));
        assert_eq!(store.annotation_at(8).map(|a| a.id), Some(id));
        assert!(store.annotation_at(9).is_none());
        assert!(store.annotation_at(3).is_none());
    }
}
