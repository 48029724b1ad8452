//! A bidirectional character cursor over an in-memory text.
//!
//! The cursor reads one character at a time, supports non-consuming look-ahead,
//! stepping back, and checkpoint based rewinding. Every character has a [`Position`]
//! with a 0-based character offset and 1-based line and column numbers.
//!
//! ```
//! use text_cursor::TextCursor;
//!
//! let mut cursor = TextCursor::new("ab\ncd");
//! let checkpoint = cursor.mark();
//! assert_eq!(cursor.next_char(), Some('a'));
//! assert_eq!(cursor.next_char(), Some('b'));
//! cursor.restore(checkpoint);
//! assert_eq!(cursor.peek(), Some('a'));
//! assert_eq!(cursor.position_at(3).line, 2);
//! ```

use std::fmt;

// ---

/// Location of a single character in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// 0-based character offset.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Position {
    pub const ORIGIN: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    #[inline]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self { offset, line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ---

/// Saved cursor state, see [`TextCursor::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

// ---

/// Character cursor over an owned text.
#[derive(Debug, Clone)]
pub struct TextCursor {
    chars: Vec<char>,
    lines: Vec<usize>,
    next: usize,
}

impl TextCursor {
    pub fn new(text: impl AsRef<str>) -> Self {
        let chars: Vec<char> = text.as_ref().chars().collect();
        let mut lines = vec![0];
        lines.extend(
            chars
                .iter()
                .enumerate()
                .filter(|(_, ch)| **ch == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { chars, lines, next: 0 }
    }

    /// Total number of characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of characters read so far.
    #[inline]
    pub fn offset(&self) -> usize {
        self.next
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.next < self.chars.len()
    }

    #[inline]
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.get(self.next).copied()?;
        self.next += 1;
        Some(ch)
    }

    /// Returns the next character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    /// Returns the character `n` positions after the next one without consuming anything.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.next + n).copied()
    }

    /// Steps back `n` characters.
    #[inline]
    pub fn unread(&mut self, n: usize) {
        debug_assert!(n <= self.next, "unread {} characters at offset {}", n, self.next);
        self.next = self.next.saturating_sub(n);
    }

    #[inline]
    pub fn mark(&self) -> Checkpoint {
        Checkpoint(self.next)
    }

    #[inline]
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.next = checkpoint.0.min(self.chars.len());
    }

    /// The last character read.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.next.checked_sub(1).map(|i| self.chars[i])
    }

    /// The character preceding the last character read.
    #[inline]
    pub fn prev_char(&self) -> Option<char> {
        self.next.checked_sub(2).map(|i| self.chars[i])
    }

    #[inline]
    pub fn has_prev_char(&self) -> bool {
        self.next >= 2
    }

    /// Position of the last character read, or [`Position::ORIGIN`] before the first read.
    pub fn position(&self) -> Position {
        match self.next {
            0 => Position::ORIGIN,
            n => self.position_at(n - 1),
        }
    }

    /// Line and column lookup for an absolute character offset.
    pub fn position_at(&self, offset: usize) -> Position {
        let line = match self.lines.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        Position::new(offset, line + 1, offset - self.lines[line] + 1)
    }

    /// Human-readable description of the current position.
    pub fn position_display(&self) -> String {
        let pos = self.position();
        format!("line {}, column {}, offset {}", pos.line, pos.column, pos.offset)
    }

    /// Characters in the given offset range, clamped to the text.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }
}
