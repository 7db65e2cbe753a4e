//! Annotation domain model.
//!
//! # Responsibility
//! - Define the categorized comment bound to an immutable source range.
//!
//! # Invariants
//! - `id` is assigned at creation and never reused.
//! - `range`, `code`, `description` and `color` never change after creation.
//! - Only `text` (the free-text note) is mutable, through the store.

use crate::model::range::TextRange;
use crate::model::taxonomy::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one annotation record.
pub type AnnotationId = Uuid;

/// Categorized note bound to `[start, end)` of the canonical source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    /// Short taxonomy tag, e.g. `FLOW`.
    pub code: String,
    /// Label paired with `code` at selection time; kept on the record so
    /// display does not depend on the taxonomy table.
    pub description: String,
    pub color: Color,
    #[serde(flatten)]
    pub range: TextRange,
    /// Free-text note. Empty until the user saves one.
    pub text: String,
}

impl Annotation {
    /// Creates a record with a fresh ID and an empty note.
    ///
    /// Does not validate `range`; the store does that against its source.
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        color: Color,
        range: TextRange,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            description: description.into(),
            color,
            range,
            text: String::new(),
        }
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Returns the highlighted excerpt of `source`, if the range fits it.
    pub fn excerpt<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.range.slice(source)
    }
}
