//! Sequencing of condition sets.
//!
//! A [`Pipe`] holds an ordered list of condition sets, each being an ordered list of
//! conditions. Characters are always offered to a single current condition and the pipe
//! advances to the next condition once the current one completes. The first set is
//! required, the meaning of the remaining sets depends on the [`PipeKind`].

// std imports
use std::fmt;

// workspace imports
use text_cursor::TextCursor;

// local imports
use crate::charset::CharSet;
use crate::condition::{Cond, Condition};
use crate::error::{Error, Result};
use crate::span::Span;

// ---

/// Sequencing strategy of a [`Pipe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    /// Every condition of every set must complete in order.
    AllRequired,
    /// The first set is required, each following set is entered only if its first
    /// condition accepts the next character. Once a set is skipped the pipe is complete.
    OptionalSuffix,
    /// Like [`PipeKind::OptionalSuffix`], but each completed condition is fed further
    /// characters for as long as it accepts them, and an optional condition rejecting
    /// the next character is skipped in favor of the following one.
    OptionalSuffixesAny,
    /// An element set and an optional separator set, repeated in a cycle. The pipe is
    /// complete each time an element completes.
    RepeatableSeparator,
}

/// Condition sequencing condition sets.
#[derive(Debug)]
pub struct Pipe {
    name: String,
    kind: PipeKind,
    sets: Vec<Vec<Cond>>,
    set_idx: usize,
    cond_idx: usize,
    active: bool,
    complete: bool,
    failed: bool,
    skip_first_span: bool,
    span: Option<Span>,
    text: String,
    look_ahead: Option<char>,
    // span and text length of the last point where the pipe was complete
    last_complete: Option<(Option<Span>, usize)>,
}

impl Pipe {
    pub fn new(name: impl Into<String>, kind: PipeKind, sets: Vec<Vec<Cond>>) -> Result<Self> {
        let name = name.into();
        if sets.is_empty() {
            return Err(Error::NoConditionSets { name });
        }
        if let Some(index) = sets.iter().position(|set| set.is_empty()) {
            return Err(Error::EmptyConditionSet { name, index });
        }
        if kind == PipeKind::RepeatableSeparator && sets.len() > 2 {
            return Err(Error::TooManyConditionSets {
                name,
                count: sets.len(),
            });
        }
        Ok(Self {
            name,
            kind,
            sets,
            set_idx: 0,
            cond_idx: 0,
            active: true,
            complete: false,
            failed: false,
            skip_first_span: false,
            span: None,
            text: String::new(),
            look_ahead: None,
            last_complete: None,
        })
    }

    pub fn all_required(name: impl Into<String>, sets: Vec<Vec<Cond>>) -> Result<Self> {
        Self::new(name, PipeKind::AllRequired, sets)
    }

    pub fn optional_suffix(name: impl Into<String>, required: Vec<Cond>, optional: Vec<Vec<Cond>>) -> Result<Self> {
        Self::new(name, PipeKind::OptionalSuffix, chain(required, optional))
    }

    pub fn optional_suffixes_any(
        name: impl Into<String>,
        required: Vec<Cond>,
        optional: Vec<Vec<Cond>>,
    ) -> Result<Self> {
        Self::new(name, PipeKind::OptionalSuffixesAny, chain(required, optional))
    }

    pub fn repeatable_separator(
        name: impl Into<String>,
        element: Vec<Cond>,
        separator: Option<Vec<Cond>>,
    ) -> Result<Self> {
        Self::new(name, PipeKind::RepeatableSeparator, chain(element, separator))
    }

    /// Excludes the span of the very first condition from the span of the pipe.
    pub fn skip_first_span(mut self, value: bool) -> Self {
        self.skip_first_span = value;
        self
    }

    pub fn kind(&self) -> PipeKind {
        self.kind
    }

    pub fn sets(&self) -> &[Vec<Cond>] {
        &self.sets
    }

    /// Creates a pipe with copies of all conditions and no progress.
    pub fn copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            sets: self.sets.iter().map(|set| set.iter().map(Cond::copy).collect()).collect(),
            set_idx: 0,
            cond_idx: 0,
            active: true,
            complete: false,
            failed: false,
            skip_first_span: self.skip_first_span,
            span: None,
            text: String::new(),
            look_ahead: None,
            last_complete: None,
        }
    }

    #[inline]
    fn current(&mut self) -> &mut Cond {
        &mut self.sets[self.set_idx][self.cond_idx]
    }

    fn commit_span(&mut self) {
        if self.skip_first_span && self.set_idx == 0 && self.cond_idx == 0 {
            return;
        }
        let span = self.sets[self.set_idx][self.cond_idx].span();
        if let Some(span) = span {
            self.span = Some(Span::merge(self.span, span));
        }
    }

    /// Drops the progress of the current optional set and goes back to the last point
    /// where the pipe was complete.
    fn fall_back(&mut self) -> bool {
        self.current().recycle();
        match self.last_complete {
            Some((span, len)) => {
                self.span = span;
                self.text.truncate(len);
                self.complete = true;
                self.active = false;
            }
            None => self.failed = true,
        }
        false
    }

    fn finish(&mut self, accepted: bool, ch: char) -> bool {
        if accepted {
            self.text.push(ch);
        } else {
            self.failed = true;
        }
        accepted
    }

    fn accept_all_required(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        let accepted = self.current().accept_next(ch, cursor);
        if self.current().is_complete() {
            self.commit_span();
            if self.cond_idx + 1 < self.sets[self.set_idx].len() {
                self.cond_idx += 1;
            } else if self.set_idx + 1 < self.sets.len() {
                self.set_idx += 1;
                self.cond_idx = 0;
            } else {
                self.complete = true;
                self.active = false;
            }
        }
        self.finish(accepted, ch)
    }

    /// Shared by [`PipeKind::OptionalSuffix`] and [`PipeKind::RepeatableSeparator`].
    ///
    /// Only the first set can fail the pipe, a failure in a later set falls back to
    /// the last completed state.
    fn accept_multiple(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        let accepted = self.current().accept_next(ch, cursor);
        if self.set_idx > 0 && (!accepted || self.current().is_failed()) {
            return self.fall_back();
        }
        if self.current().is_complete() {
            self.commit_span();
            self.next_condition();
            if self.complete {
                self.last_complete = Some((self.span, self.text.len() + ch.len_utf8()));
            }

            if self.set_idx > 0 {
                if self.active && cursor.has_next() {
                    // enter the optional set only if it accepts the next character
                    let checkpoint = cursor.mark();
                    let taken = match cursor.next_char() {
                        Some(next) => self.current().accept_next(next, cursor),
                        None => false,
                    };
                    cursor.restore(checkpoint);
                    self.current().recycle();
                    if taken {
                        self.complete = false;
                    } else {
                        self.complete = true;
                        self.active = false;
                    }
                } else if self.kind == PipeKind::OptionalSuffix {
                    self.complete = true;
                    self.active = false;
                }
            }
        }
        self.finish(accepted, ch)
    }

    fn accept_optional_suffixes_any(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        // a character taken during look-ahead was already fed to the current condition
        let initial = self.look_ahead.take() == Some(ch) || self.current().accept_next(ch, cursor);
        let mut accepted = initial;
        let complete = self.current().is_complete();
        if complete || self.current().is_failed() {
            if complete {
                self.commit_span();
            }

            if !initial || cursor.has_next() {
                let checkpoint = cursor.mark();
                let next = if initial { cursor.next_char() } else { Some(ch) };
                let mut taken = false;

                if let Some(next) = next {
                    if complete {
                        taken = self.current().accept_next(next, cursor);
                        if taken {
                            self.complete = false;
                            if initial {
                                self.look_ahead = Some(next);
                            }
                            accepted = true;
                        }
                    }
                    if !taken {
                        let mut entered = self.next_condition();
                        while entered {
                            let next_taken = self.current().accept_next(next, cursor);
                            if initial {
                                self.current().recycle();
                            }
                            if next_taken {
                                self.complete = false;
                                accepted = true;
                                if !initial && self.current().is_complete() {
                                    // completed by `ch` itself, there is nothing to look ahead for
                                    self.commit_span();
                                    self.next_condition();
                                }
                                break;
                            }
                            entered = self.next_condition();
                        }
                    }
                }
                cursor.restore(checkpoint);
            } else if complete {
                self.complete = true;
                self.active = false;
            }
        }
        self.finish(accepted, ch)
    }

    /// Moves to the condition following the current one, recycling the current one.
    ///
    /// Returns `false` and deactivates the pipe if there are no more conditions.
    fn next_condition(&mut self) -> bool {
        self.current().recycle();
        self.cond_idx += 1;
        if self.cond_idx < self.sets[self.set_idx].len() {
            return true;
        }

        if self.kind == PipeKind::RepeatableSeparator {
            if self.set_idx == 0 {
                self.complete = true;
                self.set_idx = 1 % self.sets.len();
            } else {
                self.set_idx = 0;
            }
            self.cond_idx = 0;
            for cond in &mut self.sets[self.set_idx] {
                cond.recycle();
            }
            return true;
        }

        self.complete = true;
        if self.set_idx + 1 < self.sets.len() {
            self.set_idx += 1;
            self.cond_idx = 0;
            true
        } else {
            self.cond_idx = 0;
            self.active = false;
            false
        }
    }
}

impl Condition for Pipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept_next(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        if !self.active {
            self.failed = true;
            return false;
        }
        match self.kind {
            PipeKind::AllRequired => self.accept_all_required(ch, cursor),
            PipeKind::OptionalSuffix | PipeKind::RepeatableSeparator => self.accept_multiple(ch, cursor),
            PipeKind::OptionalSuffixesAny => self.accept_optional_suffixes_any(ch, cursor),
        }
    }

    #[inline]
    fn is_complete(&self) -> bool {
        self.complete && !self.failed
    }

    #[inline]
    fn is_failed(&self) -> bool {
        self.failed
    }

    fn span(&self) -> Option<Span> {
        self.span
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn reset(&mut self) {
        for set in &mut self.sets {
            for cond in set {
                cond.recycle();
            }
        }
        self.set_idx = 0;
        self.cond_idx = 0;
        self.active = true;
        self.complete = false;
        self.failed = false;
        self.span = None;
        self.text.clear();
        self.look_ahead = None;
        self.last_complete = None;
    }

    fn can_recycle(&self) -> bool {
        self.sets.iter().flatten().all(|c| c.can_recycle())
    }

    fn first_chars(&self) -> Option<CharSet> {
        self.sets[0][0].first_chars()
    }
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joiner = match self.kind {
            PipeKind::AllRequired => ", then ",
            PipeKind::OptionalSuffix | PipeKind::OptionalSuffixesAny => ", optional then ",
            PipeKind::RepeatableSeparator => ", separator ",
        };
        write!(f, "{}", self.name)?;
        for (i, set) in self.sets.iter().enumerate() {
            if i != 0 {
                f.write_str(joiner)?;
            }
            f.write_str("(")?;
            for (j, cond) in set.iter().enumerate() {
                if j != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", cond)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

fn chain(first: Vec<Cond>, rest: impl IntoIterator<Item = Vec<Cond>>) -> Vec<Vec<Cond>> {
    std::iter::once(first).chain(rest).collect()
}
