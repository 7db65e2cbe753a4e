//! Display rows for the suggestions panel.
//!
//! Linked annotations are looked up in the store on every call, so note
//! edits show up here without the ledger being told.

use crate::model::annotation::Annotation;
use crate::model::suggestion::{Suggestion, SuggestionId};
use crate::store::annotation_store::AnnotationStore;
use crate::store::suggestion_ledger::SuggestionLedger;

/// Evidence column of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceSlot<'a> {
    /// No evidence yet: the surface offers "add evidence".
    AddAffordance,
    /// Evidence editor is open for this row with the staged value.
    Editing(&'a str),
    Shown(&'a str),
}

/// Annotation column of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationSlot<'a> {
    /// No link yet: the surface offers annotation selection.
    SelectAffordance,
    /// Linked annotation, resolved live.
    Linked(&'a Annotation),
    /// Linked, but the annotation no longer resolves. No re-selection is
    /// offered because links are one-shot.
    Missing,
}

/// One suggestion row as the panel draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionView<'a> {
    pub id: SuggestionId,
    pub text: &'a str,
    pub evidence: EvidenceSlot<'a>,
    pub annotation: AnnotationSlot<'a>,
}

impl<'a> SuggestionView<'a> {
    /// Builds one row, resolving the link against `store`.
    pub fn resolve(
        suggestion: &'a Suggestion,
        ledger: &'a SuggestionLedger,
        store: &'a AnnotationStore,
    ) -> Self {
        let evidence = match (ledger.evidence_draft(), suggestion.evidence.as_deref()) {
            (Some(draft), _) if draft.is_for(suggestion.id) => EvidenceSlot::Editing(draft.value()),
            (_, Some(evidence)) => EvidenceSlot::Shown(evidence),
            (_, None) => EvidenceSlot::AddAffordance,
        };
        let annotation = match suggestion.annotation_id {
            None => AnnotationSlot::SelectAffordance,
            Some(id) => store
                .get(id)
                .map(AnnotationSlot::Linked)
                .unwrap_or(AnnotationSlot::Missing),
        };
        Self {
            id: suggestion.id,
            text: suggestion.text.as_str(),
            evidence,
            annotation,
        }
    }
}

/// Rows for every suggestion, in ledger order.
pub fn suggestion_views<'a>(
    ledger: &'a SuggestionLedger,
    store: &'a AnnotationStore,
) -> impl Iterator<Item = SuggestionView<'a>> + 'a {
    ledger
        .suggestions()
        .iter()
        .map(move |suggestion| SuggestionView::resolve(suggestion, ledger, store))
}

#[cfg(test)]
mod tests {
    use super::{suggestion_views, AnnotationSlot, EvidenceSlot};
    use crate::model::range::TextRange;
    use crate::model::taxonomy::CodeGroup;
    use crate::store::annotation_store::AnnotationStore;
    use crate::store::suggestion_ledger::SuggestionLedger;
    use uuid::Uuid;

    #[test]
    fn unfilled_slots_offer_affordances() {
        let store = AnnotationStore::new("text");
        let mut ledger = SuggestionLedger::new();
        ledger.add("split paragraph").expect("add");

        let rows: Vec<_> = suggestion_views(&ledger, &store).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].evidence, EvidenceSlot::AddAffordance);
        assert_eq!(rows[0].annotation, AnnotationSlot::SelectAffordance);
    }

    #[test]
    fn linked_row_tracks_annotation_edits() {
        let mut store = AnnotationStore::new("The quick brown fox");
        let annotation_id = store
            .create("FLOW", "d", CodeGroup::Structure.color(), TextRange::new(4, 9))
            .expect("valid")
            .id;
        let mut ledger = SuggestionLedger::new();
        let suggestion_id = ledger.add("punch it up").expect("add").id;
        ledger.attach(suggestion_id, annotation_id).expect("attach");

        store.set_text(annotation_id, "needs more punch");
        let rows: Vec<_> = suggestion_views(&ledger, &store).collect();
        match rows[0].annotation {
            AnnotationSlot::Linked(annotation) => assert_eq!(annotation.text, "needs more punch"),
            other => panic!("expected linked annotation, got {other:?}"),
        }
    }

    #[test]
    fn dangling_link_renders_missing() {
        let store = AnnotationStore::new("text");
        let mut ledger = SuggestionLedger::new();
        let id = ledger.add("orphan").expect("add").id;
        ledger.attach(id, Uuid::new_v4()).expect("attach");

        let rows: Vec<_> = suggestion_views(&ledger, &store).collect();
        assert_eq!(rows[0].annotation, AnnotationSlot::Missing);
    }

    #[test]
    fn open_editor_shows_staged_value() {
        let store = AnnotationStore::new("text");
        let mut ledger = SuggestionLedger::new();
        let id = ledger.add("cite").expect("add").id;
        ledger.open_evidence_editor(id).expect("open");
        ledger.stage_evidence("para 3").expect("stage");

        let rows: Vec<_> = suggestion_views(&ledger, &store).collect();
        assert_eq!(rows[0].evidence, EvidenceSlot::Editing("para 3"));
    }
}
