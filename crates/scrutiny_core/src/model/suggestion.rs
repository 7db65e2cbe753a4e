//! Suggestion domain model.
//!
//! # Invariants
//! - `text` is non-blank and fixed at creation.
//! - `evidence`, once committed, is non-blank.
//! - `annotation_id` is a weak link: the annotation may be gone, and readers
//!   must resolve it through the annotation store every time.

use crate::model::annotation::AnnotationId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one suggestion entry.
pub type SuggestionId = Uuid;

/// User-authored suggestion, optionally evidenced and linked to one
/// annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub text: String,
    pub evidence: Option<String>,
    pub annotation_id: Option<AnnotationId>,
}

impl Suggestion {
    /// Creates an entry with a fresh ID, no evidence and no link.
    ///
    /// Callers are expected to pass already-trimmed, non-blank text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            evidence: None,
            annotation_id: None,
        }
    }
}
