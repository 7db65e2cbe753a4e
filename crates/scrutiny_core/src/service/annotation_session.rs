//! Annotation session: one document, its annotations and suggestions.
//!
//! # Responsibility
//! - Run the selection flow: resolve, guard, create.
//! - Apply the silent-reject policy: store/ledger errors are logged and
//!   swallowed; the caller learns only what the surface must do next.
//! - Own hover popup, note editor and provider notice state explicitly so
//!   surfaces receive it by reference instead of as ambient globals.
//!
//! # Invariants
//! - A completed selection always clears the pending code, whether or not an
//!   annotation was created.
//! - Replacing the document resets annotations; suggestions survive and their
//!   links resolve to absent.

use crate::config::ViewerConfig;
use crate::model::annotation::AnnotationId;
use crate::model::suggestion::SuggestionId;
use crate::model::taxonomy::{find_code, CodeEntry};
use crate::render::popup::{HoverPopup, PopupView};
use crate::render::segment::{render_segments, Segment, Segments};
use crate::render::suggestion_view::{suggestion_views, SuggestionView};
use crate::selection::{self, SelectionInput};
use crate::service::essay_service::EssayError;
use crate::store::annotation_store::{AnnotationRejection, AnnotationStore};
use crate::store::draft::EditDraft;
use crate::store::suggestion_ledger::SuggestionLedger;
use log::debug;

/// Result of completing a user selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Created(AnnotationId),
    /// No code was pending; the selection is left alone.
    NoPendingCode,
    /// Selection was empty, collapsed, or not found in the source.
    Unresolved,
    Rejected(AnnotationRejection),
}

impl SelectionOutcome {
    /// Whether the surface should clear its live text selection.
    pub fn clears_live_selection(&self) -> bool {
        !matches!(self, Self::NoPendingCode)
    }

    pub fn created(&self) -> Option<AnnotationId> {
        match self {
            Self::Created(id) => Some(*id),
            _ => None,
        }
    }
}

/// What the document area shows.
#[derive(Debug, Clone)]
pub enum DocumentView<'a> {
    Segments(Segments<'a>),
    /// Provider failure message shown in place of the document.
    Notice(&'a str),
}

/// Explicitly owned state for one annotated document.
#[derive(Debug, Clone)]
pub struct AnnotationSession {
    store: AnnotationStore,
    ledger: SuggestionLedger,
    pending_code: Option<&'static CodeEntry>,
    popup: HoverPopup,
    note_draft: Option<EditDraft<AnnotationId>>,
    notice: Option<String>,
}

impl AnnotationSession {
    pub fn new(source: impl Into<String>, viewer: &ViewerConfig) -> Self {
        Self {
            store: AnnotationStore::new(source.into()),
            ledger: SuggestionLedger::new(),
            pending_code: None,
            popup: HoverPopup::new(viewer.hover_grace()),
            note_draft: None,
            notice: None,
        }
    }

    pub fn source(&self) -> &str {
        self.store.source()
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn ledger(&self) -> &SuggestionLedger {
        &self.ledger
    }

    // Document lifecycle.

    /// Replaces the document text. Annotations, pending code, popup, note
    /// editor and notice are reset.
    pub fn load_document(&mut self, text: impl Into<String>) {
        let text = text.into();
        debug!(
            "event=document_load module=session status=ok source_len={} dropped_annotations={}",
            text.len(),
            self.store.len()
        );
        self.store = AnnotationStore::new(text);
        self.pending_code = None;
        self.popup.close();
        self.note_draft = None;
        self.notice = None;
    }

    /// Applies an essay generation result.
    ///
    /// On success the essay becomes the document. On provider failure the
    /// document and annotations are kept and the user message becomes the
    /// notice. A blank topic changes nothing. Returns whether the document
    /// was replaced.
    pub fn apply_generation(&mut self, result: Result<String, EssayError>) -> bool {
        match result {
            Ok(essay) => {
                self.load_document(essay);
                true
            }
            Err(EssayError::EmptyTopic) => {
                debug!("event=essay_apply module=session status=ignored reason=empty_topic");
                false
            }
            Err(err @ EssayError::Provider(_)) => {
                self.notice = Some(err.user_message().to_string());
                false
            }
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn document_view(&self) -> DocumentView<'_> {
        match self.notice.as_deref() {
            Some(message) => DocumentView::Notice(message),
            None => DocumentView::Segments(self.segments()),
        }
    }

    /// Fresh segment partition of the current document.
    pub fn segments(&self) -> Segments<'_> {
        render_segments(self.store.source(), &self.store)
    }

    // Selection flow.

    /// Toggles the pending annotation code. Selecting the pending code again
    /// clears it. Unknown codes clear the pending code.
    pub fn select_code(&mut self, code: &str) -> Option<&'static CodeEntry> {
        let entry = find_code(code);
        self.pending_code = match (self.pending_code, entry) {
            (Some(current), Some(next)) if current.code == next.code => None,
            (_, next) => next,
        };
        self.pending_code
    }

    pub fn pending_code(&self) -> Option<&'static CodeEntry> {
        self.pending_code
    }

    /// Completes a user selection with the pending code.
    pub fn complete_selection(&mut self, input: &SelectionInput) -> SelectionOutcome {
        let Some(entry) = self.pending_code.take() else {
            return SelectionOutcome::NoPendingCode;
        };

        let resolved = {
            let segments: Vec<Segment<'_>> = self.segments().collect();
            selection::resolve(self.store.source(), &segments, input)
        };
        let Some(range) = resolved else {
            debug!(
                "event=selection_resolve module=session status=unresolved code={}",
                entry.code
            );
            return SelectionOutcome::Unresolved;
        };

        match self
            .store
            .create(entry.code, entry.description, entry.color(), range)
        {
            Ok(annotation) => SelectionOutcome::Created(annotation.id),
            Err(rejection) => {
                debug!(
                    "event=selection_create module=session status=rejected code={} reason={}",
                    entry.code, rejection
                );
                SelectionOutcome::Rejected(rejection)
            }
        }
    }

    // Annotation note editor.

    /// Opens the note editor for `id`, prefilled with its current text.
    /// Returns `false` when `id` is unknown.
    pub fn begin_edit(&mut self, id: AnnotationId) -> bool {
        match self.store.get(id) {
            Some(annotation) => {
                self.note_draft = Some(EditDraft::open(id, annotation.text.as_str()));
                true
            }
            None => false,
        }
    }

    pub fn note_draft(&self) -> Option<&EditDraft<AnnotationId>> {
        self.note_draft.as_ref()
    }

    /// Replaces the staged note. Returns `false` when no editor is open.
    pub fn stage_edit(&mut self, text: impl Into<String>) -> bool {
        match self.note_draft.as_mut() {
            Some(draft) => {
                draft.stage(text);
                true
            }
            None => false,
        }
    }

    /// Writes the staged note through `setText` and closes the editor.
    ///
    /// Returns the edited ID, or `None` when no editor was open or the
    /// annotation no longer exists.
    pub fn save_edit(&mut self) -> Option<AnnotationId> {
        let draft = self.note_draft.take()?;
        let id = draft.target();
        self.store.set_text(id, draft.into_value()).then_some(id)
    }

    pub fn cancel_edit(&mut self) {
        self.note_draft = None;
    }

    // Hover popup.

    pub fn popup(&self) -> &HoverPopup {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut HoverPopup {
        &mut self.popup
    }

    pub fn popup_view(&self) -> Option<PopupView<'_>> {
        self.popup.view(&self.store)
    }

    // Suggestions.

    /// Adds a suggestion. Blank input is ignored.
    pub fn add_suggestion(&mut self, text: &str) -> Option<SuggestionId> {
        match self.ledger.add(text) {
            Ok(suggestion) => Some(suggestion.id),
            Err(err) => {
                debug!("event=suggestion_add module=session status=ignored reason={err}");
                None
            }
        }
    }

    /// Commits evidence directly. Blank evidence and unknown IDs are ignored.
    pub fn set_evidence(&mut self, id: SuggestionId, evidence: &str) -> bool {
        self.ledger
            .set_evidence(id, evidence)
            .map_err(|err| {
                debug!("event=suggestion_evidence module=session status=ignored reason={err}")
            })
            .is_ok()
    }

    pub fn open_evidence_editor(&mut self, id: SuggestionId) -> bool {
        self.ledger.open_evidence_editor(id).is_ok()
    }

    pub fn stage_evidence(&mut self, value: impl Into<String>) -> bool {
        self.ledger.stage_evidence(value).is_ok()
    }

    /// Commits the staged evidence; on blank input the editor stays open.
    pub fn commit_evidence(&mut self) -> Option<SuggestionId> {
        match self.ledger.commit_evidence() {
            Ok(id) => Some(id),
            Err(err) => {
                debug!("event=suggestion_evidence module=session status=ignored reason={err}");
                None
            }
        }
    }

    pub fn cancel_evidence(&mut self) {
        self.ledger.cancel_evidence();
    }

    /// Links a suggestion to an annotation that currently resolves.
    ///
    /// No-op (returns `false`) for unknown suggestion or annotation IDs and
    /// for suggestions that are already linked.
    pub fn attach_suggestion(
        &mut self,
        suggestion_id: SuggestionId,
        annotation_id: AnnotationId,
    ) -> bool {
        if !self.store.contains(annotation_id) {
            debug!(
                "event=suggestion_attach module=session status=ignored reason={} annotation_id={}",
                "annotation_not_found", annotation_id
            );
            return false;
        }
        self.ledger
            .attach(suggestion_id, annotation_id)
            .map_err(|err| {
                debug!("event=suggestion_attach module=session status=ignored reason={err}")
            })
            .is_ok()
    }

    /// Suggestion rows with links resolved against the current store.
    pub fn suggestion_views(&self) -> impl Iterator<Item = SuggestionView<'_>> + '_ {
        suggestion_views(&self.ledger, &self.store)
    }
}
