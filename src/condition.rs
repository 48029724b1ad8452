//! Incremental character conditions.
//!
//! A condition is offered one character at a time through [`Condition::accept_next`]
//! and eventually reaches one of two terminal states, complete or failed. Every
//! condition keeps an output buffer with the characters it accepted and the span
//! of its match.
//!
//! The condition families form the closed enumeration [`Cond`]:
//! - [`CharCondition`] matches single characters against character sets
//! - [`StringCondition`] matches candidate strings position by position
//! - [`Filter`] is an alternation of conditions
//! - [`Pipe`] sequences condition sets
//! - [`CustomCondition`] is implemented outside of this crate

// std imports
use std::fmt;

// workspace imports
use text_cursor::{Position, TextCursor};

// local imports
use crate::charset::CharSet;
use crate::compound::Filter;
use crate::pipe::Pipe;
use crate::span::Span;

mod chars;
mod strings;

pub use chars::{CharCondition, CharKind};
pub use strings::{StringCondition, StringKind};

// ---

/// Common interface of all conditions.
pub trait Condition: fmt::Debug {
    fn name(&self) -> &str;

    /// Offers the next character, which has just been read from `cursor`.
    ///
    /// Returns `false` if the character was rejected. Conditions may look ahead using
    /// the cursor but always leave it where they found it.
    fn accept_next(&mut self, ch: char, cursor: &mut TextCursor) -> bool;

    /// At least one full match has been recognized and the condition has not failed since.
    fn is_complete(&self) -> bool;

    /// No further input can succeed.
    fn is_failed(&self) -> bool;

    /// Span of the matched characters, meaningful once the condition is complete.
    fn span(&self) -> Option<Span>;

    /// Characters accepted into the result.
    fn text(&self) -> &str;

    /// Discards all progress keeping the configuration.
    fn reset(&mut self);

    /// Whether [`Condition::reset`] fully restores the initial state of the condition,
    /// including every nested condition.
    fn can_recycle(&self) -> bool {
        true
    }

    /// Characters which may start a match, if known.
    fn first_chars(&self) -> Option<CharSet>;
}

/// A condition implemented outside of this crate.
pub trait CustomCondition: Condition {
    /// Creates an independent condition with the same configuration and no progress.
    fn boxed_copy(&self) -> Box<dyn CustomCondition>;
}

// ---

/// Any condition.
#[derive(Debug)]
pub enum Cond {
    Char(CharCondition),
    Str(StringCondition),
    Filter(Filter),
    Pipe(Pipe),
    Custom(Box<dyn CustomCondition>),
}

impl Cond {
    /// Creates an independent condition with the same configuration and no progress.
    pub fn copy(&self) -> Cond {
        match self {
            Cond::Char(c) => Cond::Char(c.copy()),
            Cond::Str(c) => Cond::Str(c.copy()),
            Cond::Filter(c) => Cond::Filter(c.copy()),
            Cond::Pipe(c) => Cond::Pipe(c.copy()),
            Cond::Custom(c) => Cond::Custom(c.boxed_copy()),
        }
    }

    /// Prepares the condition for another run, in place if possible.
    pub fn recycle(&mut self) {
        if self.can_recycle() {
            self.reset();
        } else {
            *self = self.copy();
        }
    }

    fn inner(&self) -> &dyn Condition {
        match self {
            Cond::Char(c) => c,
            Cond::Str(c) => c,
            Cond::Filter(c) => c,
            Cond::Pipe(c) => c,
            Cond::Custom(c) => c.as_ref(),
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Condition {
        match self {
            Cond::Char(c) => c,
            Cond::Str(c) => c,
            Cond::Filter(c) => c,
            Cond::Pipe(c) => c,
            Cond::Custom(c) => c.as_mut(),
        }
    }
}

impl Condition for Cond {
    fn name(&self) -> &str {
        self.inner().name()
    }

    #[inline]
    fn accept_next(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        match self {
            Cond::Char(c) => c.accept_next(ch, cursor),
            Cond::Str(c) => c.accept_next(ch, cursor),
            Cond::Filter(c) => c.accept_next(ch, cursor),
            Cond::Pipe(c) => c.accept_next(ch, cursor),
            Cond::Custom(c) => c.accept_next(ch, cursor),
        }
    }

    #[inline]
    fn is_complete(&self) -> bool {
        self.inner().is_complete()
    }

    #[inline]
    fn is_failed(&self) -> bool {
        self.inner().is_failed()
    }

    fn span(&self) -> Option<Span> {
        self.inner().span()
    }

    fn text(&self) -> &str {
        self.inner().text()
    }

    fn reset(&mut self) {
        self.inner_mut().reset()
    }

    fn can_recycle(&self) -> bool {
        self.inner().can_recycle()
    }

    fn first_chars(&self) -> Option<CharSet> {
        self.inner().first_chars()
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<CharCondition> for Cond {
    fn from(c: CharCondition) -> Self {
        Cond::Char(c)
    }
}

impl From<StringCondition> for Cond {
    fn from(c: StringCondition) -> Self {
        Cond::Str(c)
    }
}

impl From<Filter> for Cond {
    fn from(c: Filter) -> Self {
        Cond::Filter(c)
    }
}

impl From<Pipe> for Cond {
    fn from(c: Pipe) -> Self {
        Cond::Pipe(c)
    }
}

impl From<Box<dyn CustomCondition>> for Cond {
    fn from(c: Box<dyn CustomCondition>) -> Self {
        Cond::Custom(c)
    }
}

// ---

/// Progress of a single run, shared by the leaf condition families.
#[derive(Debug, Clone, Default)]
pub(crate) struct Progress {
    pub complete: bool,
    pub failed: bool,
    /// Accepted characters which are part of a completed match.
    pub accepted: usize,
    /// All characters appended to the output buffer.
    pub matched: usize,
    pub start: Option<Position>,
    pub end: Option<Position>,
    pub text: String,
}

impl Progress {
    pub fn reset(&mut self) {
        self.complete = false;
        self.failed = false;
        self.accepted = 0;
        self.matched = 0;
        self.start = None;
        self.end = None;
        self.text.clear();
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete && !self.failed
    }

    #[inline]
    pub fn span(&self) -> Option<Span> {
        Some(Span::new(self.start?, self.end?))
    }

    /// Records a character which is part of the match on its own.
    #[inline]
    pub fn push_completed(&mut self, ch: char, pos: Position) {
        if self.matched == 0 {
            self.start = Some(pos);
        }
        self.text.push(ch);
        self.accepted += 1;
        self.matched += 1;
    }

    /// Records a character which extends the match, completing it if `complete` is already set.
    #[inline]
    pub fn push_matched(&mut self, ch: char, pos: Position) {
        if self.matched == 0 {
            self.start = Some(pos);
        }
        if self.complete {
            self.accepted += 1;
            self.end = Some(pos);
        }
        self.text.push(ch);
        self.matched += 1;
    }
}

#[cfg(test)]
pub(crate) mod testing;
