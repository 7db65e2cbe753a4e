//! Selection resolver: maps a live user selection to source offsets.
//!
//! # Responsibility
//! - Turn surface selections (raw text, or anchor/focus points inside
//!   rendered segments) into a `TextRange` over the canonical source.
//!
//! # Invariants
//! - Resolution always searches the canonical source, never rendered output.
//! - The first occurrence of the selected text wins. A selection of a
//!   repeated phrase resolves to its earliest occurrence, even if the user
//!   selected a later one.
//! - Empty, collapsed or unmatched selections resolve to `None`.

use crate::model::range::TextRange;
use crate::render::segment::Segment;
use std::cmp::Ordering;

/// Position inside the rendered segment sequence.
///
/// `offset` is a byte offset into the segment's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPoint {
    pub segment: usize,
    pub offset: usize,
}

impl SegmentPoint {
    pub fn new(segment: usize, offset: usize) -> Self {
        Self { segment, offset }
    }
}

impl PartialOrd for SegmentPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SegmentPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.segment, self.offset).cmp(&(other.segment, other.offset))
    }
}

/// Anchor/focus pair as reported by the surface. Focus may precede anchor
/// for backward selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedSelection {
    pub anchor: SegmentPoint,
    pub focus: SegmentPoint,
}

impl RenderedSelection {
    pub fn new(anchor: SegmentPoint, focus: SegmentPoint) -> Self {
        Self { anchor, focus }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Returns `(start, end)` in document order.
    pub fn ordered(&self) -> (SegmentPoint, SegmentPoint) {
        if self.anchor <= self.focus {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        }
    }
}

/// Selection as handed over by a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionInput {
    /// Selected display text, verbatim.
    Text(String),
    /// Anchor/focus points inside the segments last rendered.
    Points(RenderedSelection),
}

/// Resolves selected display text to its first occurrence in `source`.
pub fn resolve_text(source: &str, selected: &str) -> Option<TextRange> {
    if selected.is_empty() {
        return None;
    }
    source
        .find(selected)
        .map(|start| TextRange::new(start, start + selected.len()))
}

/// Collects the display text between the selection's points.
///
/// Returns `None` for collapsed selections and for points that fall outside
/// the segment list or inside a UTF-8 sequence.
pub fn selected_text(segments: &[Segment<'_>], selection: &RenderedSelection) -> Option<String> {
    if selection.is_collapsed() {
        return None;
    }
    let (start, end) = selection.ordered();
    let first = segments.get(start.segment)?.text();
    let last = segments.get(end.segment)?.text();
    if !first.is_char_boundary(start.offset) || !last.is_char_boundary(end.offset) {
        return None;
    }

    if start.segment == end.segment {
        return first.get(start.offset..end.offset).map(str::to_string);
    }

    let mut text = String::new();
    text.push_str(first.get(start.offset..)?);
    for segment in &segments[start.segment + 1..end.segment] {
        text.push_str(segment.text());
    }
    text.push_str(last.get(..end.offset)?);
    Some(text)
}

/// Resolves anchor/focus points to source offsets.
///
/// The selected display text is extracted from `segments`, then matched
/// against `source` with first-occurrence semantics.
pub fn resolve_points(
    source: &str,
    segments: &[Segment<'_>],
    selection: &RenderedSelection,
) -> Option<TextRange> {
    let text = selected_text(segments, selection)?;
    resolve_text(source, text.as_str())
}

/// Resolves any surface selection against `source`.
pub fn resolve(
    source: &str,
    segments: &[Segment<'_>],
    input: &SelectionInput,
) -> Option<TextRange> {
    match input {
        SelectionInput::Text(text) => resolve_text(source, text.as_str()),
        SelectionInput::Points(selection) => resolve_points(source, segments, selection),
    }
}
