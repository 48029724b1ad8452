//! Alternation of conditions.

// std imports
use std::fmt;

// workspace imports
use text_cursor::TextCursor;

// local imports
use crate::charset::CharSet;
use crate::condition::{Cond, Condition, Progress};
use crate::error::{Error, Result};
use crate::span::Span;

// ---

/// Matching strategy of a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Matches as long as at least one alternative still accepts the input.
    Any,
    /// Skips input until one of the alternatives matches, then completes exclusively.
    End,
}

/// Condition offering each character to every alternative which is still alive.
#[derive(Debug)]
pub struct Filter {
    name: String,
    kind: FilterKind,
    conds: Vec<Cond>,
    alive: Vec<usize>,
    progress: Progress,
}

impl Filter {
    pub fn new(name: impl Into<String>, kind: FilterKind, conds: Vec<Cond>) -> Result<Self> {
        let name = name.into();
        if conds.is_empty() {
            return Err(Error::EmptyFilter { name });
        }
        Ok(Self {
            name,
            kind,
            alive: (0..conds.len()).collect(),
            conds,
            progress: Progress::default(),
        })
    }

    pub fn any(name: impl Into<String>, conds: Vec<Cond>) -> Result<Self> {
        Self::new(name, FilterKind::Any, conds)
    }

    pub fn end(name: impl Into<String>, conds: Vec<Cond>) -> Result<Self> {
        Self::new(name, FilterKind::End, conds)
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn conditions(&self) -> &[Cond] {
        &self.conds
    }

    /// Creates a filter with copies of the alternatives and no progress.
    pub fn copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            conds: self.conds.iter().map(Cond::copy).collect(),
            alive: (0..self.conds.len()).collect(),
            progress: Progress::default(),
        }
    }

    /// Offers `ch` to the alive alternatives, dropping the ones which failed or rejected it.
    ///
    /// Returns whether some remaining alternative is complete.
    fn update(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        let mut complete = false;
        for i in (0..self.alive.len()).rev() {
            let cond = &mut self.conds[self.alive[i]];
            if cond.is_failed() || !cond.accept_next(ch, cursor) {
                self.alive.swap_remove(i);
            } else if cond.is_complete() {
                complete = true;
            }
        }
        complete
    }

    fn push(&mut self, ch: char, complete: bool, cursor: &TextCursor) {
        let pos = cursor.position();
        let p = &mut self.progress;
        if p.start.is_none() {
            p.start = Some(pos);
        }
        p.text.push(ch);
        p.matched += 1;
        p.complete = complete;
        if complete {
            p.end = Some(pos);
        }
    }
}

impl Condition for Filter {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept_next(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        if self.progress.failed {
            return false;
        }
        match self.kind {
            FilterKind::Any => {
                let complete = self.update(ch, cursor);
                if self.alive.is_empty() {
                    self.progress.complete = false;
                    self.progress.failed = true;
                    return false;
                }
                self.push(ch, complete, cursor);
                true
            }
            FilterKind::End => {
                if self.progress.complete {
                    self.progress.failed = true;
                    return false;
                }
                let mut complete = self.update(ch, cursor);
                if self.alive.is_empty() && self.progress.matched != 0 {
                    // the character ending a partial match may start a new one
                    self.reset();
                    complete = self.update(ch, cursor);
                }
                if self.alive.is_empty() {
                    self.reset();
                } else {
                    self.push(ch, complete, cursor);
                }
                true
            }
        }
    }

    #[inline]
    fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    #[inline]
    fn is_failed(&self) -> bool {
        self.progress.failed
    }

    fn span(&self) -> Option<Span> {
        self.progress.span()
    }

    fn text(&self) -> &str {
        &self.progress.text
    }

    fn reset(&mut self) {
        for cond in &mut self.conds {
            cond.recycle();
        }
        self.alive.clear();
        self.alive.extend(0..self.conds.len());
        self.progress.reset();
    }

    fn can_recycle(&self) -> bool {
        self.conds.iter().all(|c| c.can_recycle())
    }

    fn first_chars(&self) -> Option<CharSet> {
        let mut result = CharSet::default();
        for cond in &self.conds {
            result = result.union(&cond.first_chars()?);
        }
        Some(result)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            FilterKind::Any => "|",
            FilterKind::End => "..|",
        };
        write!(f, "{}(", self.name)?;
        for (i, cond) in self.conds.iter().enumerate() {
            if i != 0 {
                f.write_str(op)?;
            }
            write!(f, "{}", cond)?;
        }
        f.write_str(")")
    }
}
