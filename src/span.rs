use std::fmt;
use std::ops::Range;

use serde::Serialize;

use text_cursor::Position;

// ---

/// Start and end bounds of a match, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Number of characters covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.offset + 1 - self.start.offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Covered character offsets as an exclusive range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start.offset..self.end.offset + 1
    }

    #[inline]
    pub fn contains(&self, other: &Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }

    /// Smallest span covering both spans.
    #[inline]
    pub fn union(self, other: Span) -> Span {
        Span {
            start: if other.start.offset < self.start.offset { other.start } else { self.start },
            end: if other.end.offset > self.end.offset { other.end } else { self.end },
        }
    }

    /// Unions an optional accumulated span with another span.
    #[inline]
    pub fn merge(acc: Option<Span>, other: Span) -> Span {
        match acc {
            Some(acc) => acc.union(other),
            None => other,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<Span> for Range<usize> {
    #[inline]
    fn from(span: Span) -> Self {
        span.range()
    }
}

#[cfg(test)]
mod tests;
