//! Suggestions ledger.
//!
//! # Responsibility
//! - Own user-authored suggestion entries in creation order.
//! - Stage and commit evidence edits.
//! - Record at most one weak link per suggestion into the annotation store.
//!
//! # Invariants
//! - Suggestion text is trimmed and non-blank.
//! - Committed evidence is trimmed and non-blank.
//! - A link is set at most once and never cleared.
//! - The ledger never copies annotation fields; see `SuggestionView`.

use crate::model::annotation::AnnotationId;
use crate::model::suggestion::{Suggestion, SuggestionId};
use crate::store::draft::EditDraft;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ledger operation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    /// Suggestion text is blank after trim.
    EmptyText,
    /// Evidence is blank after trim.
    EmptyEvidence,
    /// Target suggestion does not exist.
    NotFound(SuggestionId),
    /// Suggestion already links to an annotation.
    AlreadyAttached {
        suggestion_id: SuggestionId,
        annotation_id: AnnotationId,
    },
    /// No evidence editor is open.
    NoOpenEditor,
}

impl Display for SuggestionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "suggestion text must not be blank"),
            Self::EmptyEvidence => write!(f, "evidence must not be blank"),
            Self::NotFound(id) => write!(f, "suggestion not found: {id}"),
            Self::AlreadyAttached {
                suggestion_id,
                annotation_id,
            } => write!(
                f,
                "suggestion {suggestion_id} already attached to annotation {annotation_id}"
            ),
            Self::NoOpenEditor => write!(f, "no evidence editor is open"),
        }
    }
}

impl Error for SuggestionError {}

/// Ordered collection of suggestions plus the evidence editor state.
#[derive(Debug, Clone, Default)]
pub struct SuggestionLedger {
    entries: Vec<Suggestion>,
    evidence_draft: Option<EditDraft<SuggestionId>>,
}

impl SuggestionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in creation order.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.entries
    }

    pub fn get(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Adds one suggestion from raw input.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank after trim.
    pub fn add(&mut self, text: &str) -> Result<&Suggestion, SuggestionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SuggestionError::EmptyText);
        }

        let suggestion = Suggestion::new(trimmed);
        debug!(
            "event=suggestion_add module=ledger status=ok id={} text_len={}",
            suggestion.id,
            trimmed.len()
        );
        self.entries.push(suggestion);
        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Commits evidence directly, bypassing the editor.
    ///
    /// # Errors
    /// - `EmptyEvidence` when `evidence` is blank after trim.
    /// - `NotFound` when `id` is unknown.
    pub fn set_evidence(
        &mut self,
        id: SuggestionId,
        evidence: &str,
    ) -> Result<(), SuggestionError> {
        let trimmed = evidence.trim();
        if trimmed.is_empty() {
            return Err(SuggestionError::EmptyEvidence);
        }
        let entry = self.entry_mut(id)?;
        entry.evidence = Some(trimmed.to_string());
        debug!(
            "event=suggestion_set_evidence module=ledger status=ok id={} evidence_len={}",
            id,
            trimmed.len()
        );
        Ok(())
    }

    /// Opens the evidence editor for `id`, prefilled with current evidence.
    ///
    /// Replaces any editor already open for another suggestion.
    pub fn open_evidence_editor(&mut self, id: SuggestionId) -> Result<(), SuggestionError> {
        let current = self
            .get(id)
            .ok_or(SuggestionError::NotFound(id))?
            .evidence
            .clone()
            .unwrap_or_default();
        self.evidence_draft = Some(EditDraft::open(id, current));
        Ok(())
    }

    /// Returns the open evidence editor, if any.
    pub fn evidence_draft(&self) -> Option<&EditDraft<SuggestionId>> {
        self.evidence_draft.as_ref()
    }

    /// Replaces the staged evidence value.
    pub fn stage_evidence(&mut self, value: impl Into<String>) -> Result<(), SuggestionError> {
        let draft = self
            .evidence_draft
            .as_mut()
            .ok_or(SuggestionError::NoOpenEditor)?;
        draft.stage(value);
        Ok(())
    }

    /// Commits the staged evidence and closes the editor.
    ///
    /// On `EmptyEvidence` the editor stays open with its staged value so the
    /// user can keep typing.
    pub fn commit_evidence(&mut self) -> Result<SuggestionId, SuggestionError> {
        let draft = self
            .evidence_draft
            .as_ref()
            .ok_or(SuggestionError::NoOpenEditor)?;
        let target = draft.target();
        let staged = draft.value().to_string();

        match self.set_evidence(target, staged.as_str()) {
            Ok(()) => {
                self.evidence_draft = None;
                Ok(target)
            }
            Err(SuggestionError::NotFound(id)) => {
                self.evidence_draft = None;
                Err(SuggestionError::NotFound(id))
            }
            Err(err) => Err(err),
        }
    }

    /// Discards the staged evidence without touching the suggestion.
    pub fn cancel_evidence(&mut self) {
        self.evidence_draft = None;
    }

    /// Links `id` to `annotation_id`. One-shot: a second attach fails.
    ///
    /// The ledger does not check that the annotation exists; callers decide
    /// whether a dangling link is acceptable.
    pub fn attach(
        &mut self,
        id: SuggestionId,
        annotation_id: AnnotationId,
    ) -> Result<(), SuggestionError> {
        let entry = self.entry_mut(id)?;
        if let Some(existing) = entry.annotation_id {
            return Err(SuggestionError::AlreadyAttached {
                suggestion_id: id,
                annotation_id: existing,
            });
        }
        entry.annotation_id = Some(annotation_id);
        debug!(
            "event=suggestion_attach module=ledger status=ok id={} annotation_id={}",
            id, annotation_id
        );
        Ok(())
    }

    fn entry_mut(&mut self, id: SuggestionId) -> Result<&mut Suggestion, SuggestionError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(SuggestionError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::{SuggestionError, SuggestionLedger};
    use uuid::Uuid;

    #[test]
    fn add_trims_and_rejects_blank() {
        let mut ledger = SuggestionLedger::new();
        let created = ledger.add("  tighten the intro  ").expect("non-blank text");
        assert_eq!(created.text, "tighten the intro");
        assert_eq!(created.evidence, None);
        assert_eq!(created.annotation_id, None);

        assert_eq!(ledger.add("   ").unwrap_err(), SuggestionError::EmptyText);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn cancel_discards_staged_evidence() {
        let mut ledger = SuggestionLedger::new();
        let id = ledger.add("cite sources").expect("add").id;

        ledger.open_evidence_editor(id).expect("open editor");
        ledger.stage_evidence("paragraph 2").expect("stage");
        ledger.cancel_evidence();

        assert!(ledger.evidence_draft().is_none());
        assert_eq!(ledger.get(id).expect("entry").evidence, None);
    }

    #[test]
    fn commit_requires_non_blank_and_keeps_editor_open() {
        let mut ledger = SuggestionLedger::new();
        let id = ledger.add("cite sources").expect("add").id;

        ledger.open_evidence_editor(id).expect("open editor");
        ledger.stage_evidence("  ").expect("stage");
        assert_eq!(
            ledger.commit_evidence().unwrap_err(),
            SuggestionError::EmptyEvidence
        );
        assert!(ledger.evidence_draft().is_some());

        ledger.stage_evidence(" see paragraph 2 ").expect("stage");
        assert_eq!(ledger.commit_evidence().expect("commit"), id);
        assert!(ledger.evidence_draft().is_none());
        assert_eq!(
            ledger.get(id).expect("entry").evidence.as_deref(),
            Some("see paragraph 2")
        );
    }

    #[test]
    fn editor_prefills_existing_evidence() {
        let mut ledger = SuggestionLedger::new();
        let id = ledger.add("cite sources").expect("add").id;
        ledger.set_evidence(id, "first").expect("set");

        ledger.open_evidence_editor(id).expect("open editor");
        assert_eq!(ledger.evidence_draft().expect("draft").value(), "first");
    }

    #[test]
    fn attach_is_one_shot() {
        let mut ledger = SuggestionLedger::new();
        let id = ledger.add("cite sources").expect("add").id;
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        ledger.attach(id, first).expect("first attach");
        let err = ledger.attach(id, second).expect_err("second attach fails");
        assert_eq!(
            err,
            SuggestionError::AlreadyAttached {
                suggestion_id: id,
                annotation_id: first,
            }
        );
        assert_eq!(ledger.get(id).expect("entry").annotation_id, Some(first));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut ledger = SuggestionLedger::new();
        let missing = Uuid::new_v4();
        assert_eq!(
            ledger.attach(missing, Uuid::new_v4()).unwrap_err(),
            SuggestionError::NotFound(missing)
        );
        assert_eq!(
            ledger.set_evidence(missing, "x").unwrap_err(),
            SuggestionError::NotFound(missing)
        );
        assert_eq!(
            ledger.open_evidence_editor(missing).unwrap_err(),
            SuggestionError::NotFound(missing)
        );
    }
}
