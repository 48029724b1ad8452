// std imports
use std::fmt;

// local imports
use crate::charset::CharSet;
use crate::compound::Filter;
use crate::condition::{Cond, Condition};
use crate::error::{Error, Result};

// ---

const MAX_POOLED: usize = 16;

/// Named producer of condition instances, consulted by the driver for every character.
///
/// A factory combines one or more conditions, several conditions are wrapped into an
/// [`Any`](crate::compound::FilterKind::Any) filter. Compound factories produce matchers
/// which may contain other tokens.
#[derive(Debug)]
pub struct Factory {
    name: String,
    compound: bool,
    first_chars: CharSet,
    prototype: Cond,
    pool: Vec<Cond>,
}

impl Factory {
    /// Creates a factory using the first characters reported by the conditions.
    pub fn new(name: impl Into<String>, compound: bool, conds: Vec<Cond>) -> Result<Self> {
        let name = name.into();
        let mut first_chars = CharSet::default();
        for cond in &conds {
            let chars = cond.first_chars().ok_or_else(|| Error::MissingFirstChars {
                name: cond.name().to_string(),
            })?;
            first_chars = first_chars.union(&chars);
        }
        Self::with_first_chars(name, compound, first_chars, conds)
    }

    /// Creates a factory with an explicit first character pre-filter.
    pub fn with_first_chars(
        name: impl Into<String>,
        compound: bool,
        first_chars: CharSet,
        mut conds: Vec<Cond>,
    ) -> Result<Self> {
        let name = name.into();
        let prototype = match conds.len() {
            0 => return Err(Error::EmptyFactory { name }),
            1 => conds.remove(0),
            _ => Filter::any(name.clone(), conds)?.into(),
        };
        Ok(Self {
            name,
            compound,
            first_chars,
            prototype,
            pool: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_compound(&self) -> bool {
        self.compound
    }

    pub fn first_chars(&self) -> &CharSet {
        &self.first_chars
    }

    /// Condition instances are created as copies of the prototype.
    pub fn prototype(&self) -> &Cond {
        &self.prototype
    }

    /// Checks whether a match may start with the character.
    #[inline]
    pub fn is_match(&self, ch: char) -> bool {
        self.first_chars.contains(ch)
    }

    /// Returns a condition without progress, reusing a released one if available.
    pub fn create(&mut self) -> Cond {
        self.pool.pop().unwrap_or_else(|| self.prototype.copy())
    }

    /// Takes back a condition which is no longer in use.
    pub fn release(&mut self, mut cond: Cond) {
        if cond.can_recycle() && self.pool.len() < MAX_POOLED {
            cond.reset();
            self.pool.push(cond);
        }
    }
}

impl fmt::Display for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.compound {
            f.write_str("compound ")?;
        }
        write!(f, "{}", self.name)
    }
}
