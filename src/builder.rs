//! Convenience construction of factories from markers.
//!
//! ```
//! use chartok::builder::FactoryBuilder;
//!
//! let factory = FactoryBuilder::new("markup")
//!     .compound(true)
//!     .start_end("tag", '<', "/>")
//!     .start_end("block", "{{", "}}")
//!     .build()
//!     .unwrap();
//! assert!(factory.is_match('<'));
//! assert!(factory.is_match('{'));
//! ```

// local imports
use crate::charset::CharSet;
use crate::condition::{CharCondition, Cond, StringCondition};
use crate::error::Result;
use crate::factory::Factory;
use crate::pipe::Pipe;

// ---

/// Start or end delimiter of a bounded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Char(char),
    Str(String),
}

impl Marker {
    fn start(self, name: String) -> Result<Cond> {
        Ok(match self {
            Marker::Char(ch) => CharCondition::literal(name, ch).into(),
            Marker::Str(s) => StringCondition::start(name, [s])?.into(),
        })
    }

    fn end(self, name: String) -> Result<Cond> {
        Ok(match self {
            Marker::Char(ch) => CharCondition::end(name, ch).into(),
            Marker::Str(s) => StringCondition::end(name, [s])?.into(),
        })
    }
}

impl From<char> for Marker {
    fn from(ch: char) -> Self {
        Marker::Char(ch)
    }
}

impl From<&str> for Marker {
    fn from(s: &str) -> Self {
        Marker::Str(s.to_string())
    }
}

impl From<String> for Marker {
    fn from(s: String) -> Self {
        Marker::Str(s)
    }
}

// ---

/// Collects conditions for a single [`Factory`].
///
/// Construction errors are reported by [`FactoryBuilder::build`].
#[derive(Debug)]
pub struct FactoryBuilder {
    name: String,
    compound: bool,
    first_chars: Option<CharSet>,
    conds: Vec<Result<Cond>>,
}

impl FactoryBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compound: false,
            first_chars: None,
            conds: Vec::new(),
        }
    }

    /// Compound factories produce tokens which may contain other tokens.
    pub fn compound(mut self, compound: bool) -> Self {
        self.compound = compound;
        self
    }

    /// Overrides the first characters reported by the conditions.
    pub fn first_chars(mut self, chars: impl Into<CharSet>) -> Self {
        self.first_chars = Some(chars.into());
        self
    }

    /// Adds a token starting with `start` and ending with the first `end` after it.
    pub fn start_end(self, name: &str, start: impl Into<Marker>, end: impl Into<Marker>) -> Self {
        let cond = start_end(name, start.into(), end.into());
        self.push(cond)
    }

    /// Adds a token starting with `start` and ending with an `end` character which is not
    /// directly preceded by `escape`.
    pub fn start_end_not_preceded_by(self, name: &str, start: char, escape: char, end: char) -> Self {
        let cond = bounded(
            name,
            CharCondition::literal(format!("{name}-start"), start).into(),
            CharCondition::end_not_preceded_by(format!("{name}-end"), end, escape).into(),
        );
        self.push(cond)
    }

    /// Adds a token equal to one of the strings.
    pub fn string_literal<S: AsRef<str>>(self, name: &str, values: impl IntoIterator<Item = S>) -> Self {
        let cond = StringCondition::literal(name, values).map(Cond::from);
        self.push(cond)
    }

    /// Adds a single character token.
    pub fn char_literal(self, name: &str, chars: impl Into<CharSet>) -> Self {
        self.push(Ok(CharCondition::literal(name, chars).into()))
    }

    /// Adds a token made of a run of the characters.
    pub fn char_matcher(self, name: &str, chars: impl Into<CharSet>) -> Self {
        self.push(Ok(CharCondition::contains(name, chars).into()))
    }

    /// Adds an identifier with body characters optionally joined by single `separator` characters.
    pub fn identifier(self, name: &str, first: impl Into<CharSet>, body: impl Into<CharSet>, separator: char) -> Self {
        self.push(Ok(CharCondition::identifier(name, first, body, separator).into()))
    }

    /// Adds an arbitrary condition.
    pub fn condition(self, cond: impl Into<Cond>) -> Self {
        self.push(Ok(cond.into()))
    }

    pub fn build(self) -> Result<Factory> {
        let conds = self.conds.into_iter().collect::<Result<Vec<_>>>()?;
        match self.first_chars {
            Some(chars) => Factory::with_first_chars(self.name, self.compound, chars, conds),
            None => Factory::new(self.name, self.compound, conds),
        }
    }

    fn push(mut self, cond: Result<Cond>) -> Self {
        self.conds.push(cond);
        self
    }
}

fn start_end(name: &str, start: Marker, end: Marker) -> Result<Cond> {
    bounded(name, start.start(format!("{name}-start"))?, end.end(format!("{name}-end"))?)
}

fn bounded(name: &str, start: Cond, end: Cond) -> Result<Cond> {
    Ok(Pipe::all_required(name, vec![vec![start, end]])?.into())
}

#[cfg(test)]
mod tests;
