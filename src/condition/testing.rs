use text_cursor::{Position, TextCursor};

use super::{Cond, Condition, CustomCondition};
use crate::charset::CharSet;
use crate::span::Span;

// ---

/// Outcome of feeding a whole input to a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub complete: bool,
    pub failed: bool,
    pub text: String,
    pub range: Option<(usize, usize)>,
}

/// Feeds every character of `input` to `cond`, stopping after the first rejected character.
pub fn feed(cond: &mut Cond, input: &str) -> Outcome {
    let mut cursor = TextCursor::new(input);
    while let Some(ch) = cursor.next_char() {
        if !cond.accept_next(ch, &mut cursor) {
            break;
        }
    }
    Outcome {
        complete: cond.is_complete(),
        failed: cond.is_failed(),
        text: cond.text().to_string(),
        range: cond.span().map(|s| (s.start.offset, s.end.offset)),
    }
}

/// Runs `input` through a fresh copy of `cond` and through `cond` itself after recycling,
/// checking that both runs agree.
pub fn check(cond: &mut Cond, input: &str) -> Outcome {
    let mut copy = cond.copy();
    let first = feed(&mut copy, input);
    cond.recycle();
    let second = feed(cond, input);
    assert_eq!(first, second, "copy and recycled condition disagree on {input:?}");
    first
}

// ---

/// Matches any `len` characters, cannot be reset in place.
#[derive(Debug)]
pub struct Fixed {
    len: usize,
    text: String,
    start: Option<Position>,
    end: Option<Position>,
    spent: bool,
}

impl Fixed {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            text: String::new(),
            start: None,
            end: None,
            spent: false,
        }
    }
}

impl Condition for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn accept_next(&mut self, ch: char, cursor: &mut TextCursor) -> bool {
        if self.spent || self.text.chars().count() == self.len {
            self.spent = true;
            return false;
        }
        if self.start.is_none() {
            self.start = Some(cursor.position());
        }
        self.text.push(ch);
        if self.text.chars().count() == self.len {
            self.end = Some(cursor.position());
        }
        true
    }

    fn is_complete(&self) -> bool {
        !self.spent && self.end.is_some()
    }

    fn is_failed(&self) -> bool {
        self.spent
    }

    fn span(&self) -> Option<Span> {
        Some(Span::new(self.start?, self.end?))
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn reset(&mut self) {}

    fn can_recycle(&self) -> bool {
        false
    }

    fn first_chars(&self) -> Option<CharSet> {
        None
    }
}

impl CustomCondition for Fixed {
    fn boxed_copy(&self) -> Box<dyn CustomCondition> {
        Box::new(Fixed::new(self.len))
    }
}
