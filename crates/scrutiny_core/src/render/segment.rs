//! Segment renderer: partitions the source around annotations.
//!
//! # Responsibility
//! - Produce the ordered plain/highlighted runs a surface draws.
//!
//! # Invariants
//! - Concatenating all segment texts reproduces the source exactly.
//! - Output depends only on `(source, annotations)`; rendering twice yields
//!   identical sequences.
//! - Annotations are ordered by `start`, ties by insertion order.

use crate::model::annotation::{Annotation, AnnotationId};
use crate::model::range::TextRange;
use serde::Serialize;

/// One contiguous run of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain {
        range: TextRange,
        text: &'a str,
    },
    Highlighted {
        annotation: &'a Annotation,
        text: &'a str,
    },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Self::Plain { text, .. } | Self::Highlighted { text, .. } => text,
        }
    }

    /// Source range this segment covers.
    pub fn range(&self) -> TextRange {
        match self {
            Self::Plain { range, .. } => *range,
            Self::Highlighted { annotation, .. } => annotation.range,
        }
    }

    pub fn annotation(&self) -> Option<&'a Annotation> {
        match self {
            Self::Plain { .. } => None,
            Self::Highlighted { annotation, .. } => Some(annotation),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Self::Highlighted { .. })
    }

    /// Owned, serializable projection for presentation layers.
    pub fn to_rendered(&self) -> RenderedSegment {
        let range = self.range();
        let (annotation_id, code, color) = match self.annotation() {
            Some(annotation) => (
                Some(annotation.id),
                Some(annotation.code.clone()),
                Some(annotation.color.to_string()),
            ),
            None => (None, None, None),
        };
        RenderedSegment {
            start: range.start,
            end: range.end,
            text: self.text().to_string(),
            annotation_id,
            code,
            color,
        }
    }
}

/// Serializable segment row for a drawing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSegment {
    pub start: usize,
    pub end: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_id: Option<AnnotationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Lazy segment sequence. Clone it to restart from the beginning.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    source: &'a str,
    ordered: Vec<&'a Annotation>,
    next_annotation: usize,
    cursor: usize,
}

/// Partitions `source` into plain and highlighted segments.
///
/// Annotations that do not fit `source`, or that overlap an earlier one
/// after ordering, are skipped so coverage still holds.
pub fn render_segments<'a>(
    source: &'a str,
    annotations: impl IntoIterator<Item = &'a Annotation>,
) -> Segments<'a> {
    let mut ordered: Vec<&'a Annotation> = annotations.into_iter().collect();
    // Stable: equal starts keep insertion order.
    ordered.sort_by_key(|annotation| annotation.range.start);
    Segments {
        source,
        ordered,
        next_annotation: 0,
        cursor: 0,
    }
}

impl<'a> Segments<'a> {
    fn plain(&self, start: usize, end: usize) -> Segment<'a> {
        let range = TextRange::new(start, end);
        Segment::Plain {
            range,
            text: range.slice(self.source).unwrap_or_default(),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(annotation) = self.ordered.get(self.next_annotation).copied() {
            let range = annotation.range;
            if range.start < self.cursor || range.validate_against(self.source).is_err() {
                self.next_annotation += 1;
                continue;
            }

            if range.start > self.cursor {
                let gap = self.plain(self.cursor, range.start);
                self.cursor = range.start;
                return Some(gap);
            }

            self.next_annotation += 1;
            self.cursor = range.end;
            return Some(Segment::Highlighted {
                annotation,
                text: range.slice(self.source).unwrap_or_default(),
            });
        }

        if self.cursor < self.source.len() {
            let tail = self.plain(self.cursor, self.source.len());
            self.cursor = self.source.len();
            return Some(tail);
        }
        None
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

#[cfg(test)]
mod tests {
    use super::{render_segments, Segment};
    use crate::model::annotation::Annotation;
    use crate::model::range::TextRange;
    use crate::model::taxonomy::CodeGroup;

    fn annotation(code: &str, start: usize, end: usize) -> Annotation {
        Annotation::new(
            code,
            "desc",
            CodeGroup::Clarity.color(),
            TextRange::new(start, end),
        )
    }

    fn texts(segments: &[Segment<'_>]) -> Vec<String> {
        segments
            .iter()
            .map(|segment| match segment {
                Segment::Plain { text, .. } => text.to_string(),
                Segment::Highlighted { text, .. } => format!("[{text}]"),
            })
            .collect()
    }

    #[test]
    fn no_annotations_yields_single_plain_segment() {
        let none: Vec<Annotation> = Vec::new();
        let segments: Vec<_> = render_segments("hello", &none).collect();
        assert_eq!(texts(&segments), vec!["hello"]);
    }

    #[test]
    fn empty_source_yields_nothing() {
        let none: Vec<Annotation> = Vec::new();
        assert_eq!(render_segments("", &none).count(), 0);
    }

    #[test]
    fn orders_by_start_and_fills_gaps() {
        let source = "The quick brown fox";
        let annotations = vec![annotation("B", 10, 15), annotation("A", 4, 9)];
        let segments: Vec<_> = render_segments(source, &annotations).collect();
        assert_eq!(
            texts(&segments),
            vec!["The ", "[quick]", " ", "[brown]", " fox"]
        );
    }

    #[test]
    fn adjacent_highlights_have_no_empty_gap() {
        let source = "abcdef";
        let annotations = vec![annotation("A", 0, 3), annotation("B", 3, 6)];
        let segments: Vec<_> = render_segments(source, &annotations).collect();
        assert_eq!(texts(&segments), vec!["[abc]", "[def]"]);
    }

    #[test]
    fn skips_ranges_that_do_not_fit() {
        let source = "abcdef";
        let annotations = vec![
            annotation("A", 1, 4),
            annotation("B", 2, 5),
            annotation("C", 4, 40),
        ];
        let segments: Vec<_> = render_segments(source, &annotations).collect();
        let joined: String = segments.iter().map(|segment| segment.text()).collect();
        assert_eq!(joined, source);
        assert_eq!(segments.iter().filter(|s| s.is_highlighted()).count(), 1);
    }

    #[test]
    fn clone_restarts_sequence() {
        let source = "one two";
        let annotations = vec![annotation("A", 4, 7)];
        let segments = render_segments(source, &annotations);
        let first: Vec<_> = segments.clone().collect();
        let second: Vec<_> = segments.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn rendered_projection_carries_annotation_fields() {
        let source = "one two";
        let annotations = vec![annotation("TERM", 4, 7)];
        let rendered: Vec<_> = render_segments(source, &annotations)
            .map(|segment| segment.to_rendered())
            .collect();
        assert_eq!(rendered[0].annotation_id, None);
        assert_eq!(rendered[1].code.as_deref(), Some("TERM"));
        assert_eq!(rendered[1].color.as_deref(), Some("#50E3C2"));
        assert_eq!((rendered[1].start, rendered[1].end), (4, 7));
    }
}
