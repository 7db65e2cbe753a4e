//! Half-open offset ranges over the canonical source text.
//!
//! # Responsibility
//! - Represent `[start, end)` byte ranges into an immutable source string.
//! - Provide the overlap predicate used by the overlap guard.
//!
//! # Invariants
//! - A valid range satisfies `start < end <= source.len()`.
//! - Both offsets fall on UTF-8 char boundaries of the source they index.
//! - Touching endpoints (`a.end == b.start`) do not overlap.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Half-open byte range `[start, end)` into a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Byte length of the range. Zero for inverted ranges.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns whether both ranges share at least one byte position.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns whether `offset` lies inside `[start, end)`.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Checks this range against the source it is meant to index.
    ///
    /// # Errors
    /// - `Empty` when `start >= end`.
    /// - `OutOfBounds` when `end` exceeds the source length.
    /// - `NotCharBoundary` when either offset splits a UTF-8 sequence.
    pub fn validate_against(&self, source: &str) -> Result<(), RangeError> {
        if self.is_empty() {
            return Err(RangeError::Empty {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > source.len() {
            return Err(RangeError::OutOfBounds {
                end: self.end,
                len: source.len(),
            });
        }
        for offset in [self.start, self.end] {
            if !source.is_char_boundary(offset) {
                return Err(RangeError::NotCharBoundary(offset));
            }
        }
        Ok(())
    }

    /// Slices `source` by this range, or `None` when the range is not valid
    /// for it.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl Display for TextRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Range validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    Empty { start: usize, end: usize },
    OutOfBounds { end: usize, len: usize },
    NotCharBoundary(usize),
}

impl Display for RangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { start, end } => {
                write!(f, "range is empty: start ({start}) must be < end ({end})")
            }
            Self::OutOfBounds { end, len } => {
                write!(f, "range end ({end}) exceeds source length ({len})")
            }
            Self::NotCharBoundary(offset) => {
                write!(f, "offset {offset} is not on a char boundary")
            }
        }
    }
}

impl Error for RangeError {}
