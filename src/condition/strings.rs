use std::fmt;

use text_cursor::TextCursor;

use super::{Condition, Progress};
use crate::charset::CharSet;
use crate::error::{Error, Result};
use crate::span::Span;

// ---

/// Matching strategy of a [`StringCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    /// The first candidate to match, nothing is accepted after it.
    Start,
    /// One of the candidates, a longer candidate may continue after a shorter one matched.
    Literal,
    /// Any characters up to and including one of the candidates.
    End,
}

/// Condition matching a set of candidate strings, position by position.
#[derive(Debug, Clone)]
pub struct StringCondition {
    name: String,
    kind: StringKind,
    candidates: Vec<Vec<char>>,
    first_chars: CharSet,
    alive: Vec<usize>,
    progress: Progress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Found {
    None,
    Partial,
    Complete,
}

impl StringCondition {
    pub fn new<S>(name: impl Into<String>, kind: StringKind, candidates: impl IntoIterator<Item = S>) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let name = name.into();
        let candidates: Vec<Vec<char>> = candidates.into_iter().map(|s| s.as_ref().chars().collect()).collect();
        if candidates.is_empty() || candidates.iter().any(|c| c.is_empty()) {
            return Err(Error::EmptyCandidates { name });
        }
        let first_chars = candidates.iter().map(|c| c[0]).collect();
        Ok(Self {
            name,
            kind,
            alive: (0..candidates.len()).collect(),
            candidates,
            first_chars,
            progress: Progress::default(),
        })
    }

    pub fn start<S: AsRef<str>>(name: impl Into<String>, candidates: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::new(name, StringKind::Start, candidates)
    }

    pub fn literal<S: AsRef<str>>(name: impl Into<String>, candidates: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::new(name, StringKind::Literal, candidates)
    }

    pub fn end<S: AsRef<str>>(name: impl Into<String>, candidates: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::new(name, StringKind::End, candidates)
    }

    pub fn kind(&self) -> StringKind {
        self.kind
    }

    pub fn candidates(&self) -> impl Iterator<Item = String> + '_ {
        self.candidates.iter().map(|c| c.iter().collect())
    }

    /// Creates a condition with the same configuration and no progress.
    pub fn copy(&self) -> Self {
        let mut copy = self.clone();
        copy.reset();
        copy
    }

    fn restart(&mut self) {
        self.alive.clear();
        self.alive.extend(0..self.candidates.len());
    }

    /// Drops the candidates not having `ch` at `offset`.
    fn update(&mut self, ch: char, offset: usize) -> Found {
        let mut found = Found::None;
        for i in (0..self.alive.len()).rev() {
            let candidate = &self.candidates[self.alive[i]];
            match candidate.get(offset) {
                Some(&c) if c == ch => {
                    let state = if candidate.len() == offset + 1 {
                        Found::Complete
                    } else {
                        Found::Partial
                    };
                    found = found.max(state);
                }
                _ => {
                    self.alive.swap_remove(i);
                }
            }
        }
        found
    }

    fn accept_literal(&mut self, ch: char, cursor: &TextCursor) -> bool {
        let exclusive = self.kind == StringKind::Start;
        if self.progress.failed || (exclusive && self.progress.complete) {
            self.progress.failed = true;
            return false;
        }
        let found = self.update(ch, self.progress.accepted);
        let p = &mut self.progress;
        if found == Found::None {
            p.failed = true;
            return false;
        }
        let pos = cursor.position();
        p.push_completed(ch, pos);
        p.complete = found == Found::Complete;
        if p.complete {
            p.end = Some(pos);
        }
        true
    }

    fn accept_end(&mut self, ch: char, cursor: &TextCursor) -> bool {
        if self.progress.failed {
            return false;
        }
        if self.progress.complete {
            if self.shift(ch, cursor) {
                return true;
            }
            // the terminator is broken, `ch` may start a new one
            self.reset();
        }

        let found = self.update(ch, self.progress.accepted);
        if found == Found::None {
            if !self.shift(ch, cursor) {
                self.reset();
            }
            return true;
        }

        let pos = cursor.position();
        let p = &mut self.progress;
        p.push_completed(ch, pos);
        if found == Found::Complete {
            p.complete = true;
            p.end = Some(pos);
        }
        true
    }

    /// Looks for a candidate matching a suffix of the accepted text followed by `ch`,
    /// preferring the longest suffix, and restarts the match from there.
    ///
    /// A completed match is only shifted within its own text, otherwise `ch` alone may
    /// start a new match.
    fn shift(&mut self, ch: char, cursor: &TextCursor) -> bool {
        let text: Vec<char> = self.progress.text.chars().collect();
        let size = text.len();
        if size == 0 {
            return false;
        }
        let last = if self.progress.complete {
            (size - 1).max(1)
        } else {
            size
        };
        for skip in 1..=last {
            self.restart();
            for (offset, &c) in text[skip..].iter().enumerate() {
                self.update(c, offset);
            }
            let found = self.update(ch, size - skip);
            if !self.alive.is_empty() {
                let p = &mut self.progress;
                p.text = text[skip..].iter().copied().chain([ch]).collect();
                p.accepted = size - skip + 1;
                p.matched = p.accepted;
                p.start = p.start.map(|start| cursor.position_at(start.offset + skip));
                p.complete = found == Found::Complete;
                p.failed = false;
                p.end = p.complete.then(|| cursor.position());
                return true;
            }
        }
        false
    }
}

impl Condition for StringCondition {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept_next(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        match self.kind {
            StringKind::Start | StringKind::Literal => self.accept_literal(ch, cursor),
            StringKind::End => self.accept_end(ch, cursor),
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
        self.progress.reset();
        self.restart();
    }

    fn first_chars(&self) -> Option<CharSet> {
        Some(self.first_chars.clone())
    }
}

impl fmt::Display for StringCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            StringKind::Start | StringKind::Literal => "",
            StringKind::End => "..",
        };
        write!(f, "{}{}{:?}", self.name, prefix, self.candidates().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests;
