use std::fmt;

use text_cursor::TextCursor;

use super::{Condition, Progress};
use crate::charset::CharSet;
use crate::span::Span;

// ---

/// Matching strategy of a [`CharCondition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharKind {
    /// Exactly one character from the set.
    Literal(CharSet),
    /// A maximal run of characters, the first one from `first` and the rest from `body`.
    Contains { first: CharSet, body: CharSet },
    /// Any characters up to and including one from the set. Once complete, further
    /// terminators extend the match and other characters are rejected without failing.
    End(CharSet),
    /// Like [`CharKind::End`], but a terminator directly preceded by a character from
    /// `not_preceded_by` does not count.
    EndNotPrecededBy { end: CharSet, not_preceded_by: CharSet },
    /// A maximal run like [`CharKind::Contains`] which may contain single `separator`
    /// characters between body characters.
    Identifier {
        first: CharSet,
        body: CharSet,
        separator: char,
    },
}

/// Condition matching characters against character sets.
#[derive(Debug, Clone)]
pub struct CharCondition {
    name: String,
    kind: CharKind,
    progress: Progress,
    escaped: bool,
}

impl CharCondition {
    pub fn new(name: impl Into<String>, kind: CharKind) -> Self {
        Self {
            name: name.into(),
            kind,
            progress: Progress::default(),
            escaped: false,
        }
    }

    pub fn literal(name: impl Into<String>, chars: impl Into<CharSet>) -> Self {
        Self::new(name, CharKind::Literal(chars.into()))
    }

    pub fn contains(name: impl Into<String>, chars: impl Into<CharSet>) -> Self {
        let chars = chars.into();
        Self::new(
            name,
            CharKind::Contains {
                first: chars.clone(),
                body: chars,
            },
        )
    }

    pub fn contains_first(name: impl Into<String>, first: impl Into<CharSet>, body: impl Into<CharSet>) -> Self {
        Self::new(
            name,
            CharKind::Contains {
                first: first.into(),
                body: body.into(),
            },
        )
    }

    pub fn end(name: impl Into<String>, chars: impl Into<CharSet>) -> Self {
        Self::new(name, CharKind::End(chars.into()))
    }

    pub fn end_not_preceded_by(
        name: impl Into<String>,
        end: impl Into<CharSet>,
        not_preceded_by: impl Into<CharSet>,
    ) -> Self {
        Self::new(
            name,
            CharKind::EndNotPrecededBy {
                end: end.into(),
                not_preceded_by: not_preceded_by.into(),
            },
        )
    }

    pub fn identifier(
        name: impl Into<String>,
        first: impl Into<CharSet>,
        body: impl Into<CharSet>,
        separator: char,
    ) -> Self {
        Self::new(
            name,
            CharKind::Identifier {
                first: first.into(),
                body: body.into(),
                separator,
            },
        )
    }

    pub fn kind(&self) -> &CharKind {
        &self.kind
    }

    /// Creates a condition with the same configuration and no progress.
    pub fn copy(&self) -> Self {
        Self::new(self.name.clone(), self.kind.clone())
    }
}

impl Condition for CharCondition {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept_next(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        let p = &mut self.progress;
        match &self.kind {
            CharKind::Literal(set) => accept_literal(p, set, ch, cursor),
            CharKind::Contains { first, body } => accept_contains(p, first, body, ch, cursor),
            CharKind::End(set) => accept_end(p, set, ch, cursor),
            CharKind::EndNotPrecededBy { end, not_preceded_by } => {
                accept_end_not_preceded_by(p, &mut self.escaped, end, not_preceded_by, ch, cursor)
            }
            CharKind::Identifier { first, body, separator } => {
                accept_identifier(p, first, body, *separator, ch, cursor)
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
        self.progress.reset();
        self.escaped = false;
    }

    fn first_chars(&self) -> Option<CharSet> {
        Some(match &self.kind {
            CharKind::Literal(set) => set.clone(),
            CharKind::Contains { first, .. } => first.clone(),
            CharKind::End(set) => set.clone(),
            CharKind::EndNotPrecededBy { end, .. } => end.clone(),
            CharKind::Identifier { first, .. } => first.clone(),
        })
    }
}

impl fmt::Display for CharCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CharKind::Literal(set) => write!(f, "{}[{}]", self.name, set),
            CharKind::Contains { first, body } => write!(f, "{}[{}][{}]*", self.name, first, body),
            CharKind::End(set) => write!(f, "{}..[{}]", self.name, set),
            CharKind::EndNotPrecededBy { end, not_preceded_by } => {
                write!(f, "{}..[^{}][{}]", self.name, not_preceded_by, end)
            }
            CharKind::Identifier { first, body, separator } => {
                write!(f, "{}[{}][{}{}]*", self.name, first, body, separator)
            }
        }
    }
}

// ---

fn accept_literal(p: &mut Progress, set: &CharSet, ch: char, cursor: &TextCursor) -> bool {
    if p.complete || p.failed || !set.contains(ch) {
        p.failed = true;
        return false;
    }
    let pos = cursor.position();
    p.complete = true;
    p.push_completed(ch, pos);
    p.end = Some(pos);
    true
}

fn accept_contains(p: &mut Progress, first: &CharSet, body: &CharSet, ch: char, cursor: &TextCursor) -> bool {
    if p.complete {
        p.failed = true;
        return false;
    }
    let set = if p.matched == 0 { first } else { body };
    if !set.contains(ch) {
        return false;
    }
    let pos = cursor.position();
    p.push_completed(ch, pos);
    if !cursor.peek().is_some_and(|next| body.contains(next)) {
        p.complete = true;
        p.end = Some(pos);
    }
    true
}

fn accept_identifier(
    p: &mut Progress,
    first: &CharSet,
    body: &CharSet,
    separator: char,
    ch: char,
    cursor: &TextCursor,
) -> bool {
    if p.complete {
        p.failed = true;
        return false;
    }
    let accepted = if p.matched == 0 {
        first.contains(ch)
    } else if body.contains(ch) {
        true
    } else {
        // a separator is only taken when a body character follows
        ch == separator && cursor.peek().is_some_and(|next| body.contains(next))
    };
    if !accepted {
        return false;
    }
    let pos = cursor.position();
    p.push_completed(ch, pos);
    let continues = match cursor.peek() {
        Some(next) if body.contains(next) => true,
        Some(next) if next == separator => cursor.peek_nth(1).is_some_and(|after| body.contains(after)),
        _ => false,
    };
    if !continues {
        p.complete = true;
        p.end = Some(pos);
    }
    true
}

fn accept_end(p: &mut Progress, set: &CharSet, ch: char, cursor: &TextCursor) -> bool {
    if p.failed {
        return false;
    }
    let pos = cursor.position();
    if p.complete {
        // further terminators extend the match
        if set.contains(ch) {
            p.push_matched(ch, pos);
            return true;
        }
        return false;
    }
    p.complete = set.contains(ch);
    p.push_matched(ch, pos);
    true
}

fn accept_end_not_preceded_by(
    p: &mut Progress,
    escaped: &mut bool,
    end: &CharSet,
    not_preceded_by: &CharSet,
    ch: char,
    cursor: &TextCursor,
) -> bool {
    if p.failed || p.complete {
        return accept_end(p, end, ch, cursor);
    }
    if p.matched == 0 && cursor.prev_char().is_some_and(|prev| not_preceded_by.contains(prev)) {
        *escaped = true;
    }
    if not_preceded_by.contains(ch) {
        *escaped = true;
        return true;
    }
    if *escaped {
        p.reset();
        *escaped = false;
        return true;
    }
    accept_end(p, end, ch, cursor)
}
