//! Character sets used by condition predicates.
//!
//! A set is written as a list of characters where `a-z` denotes an inclusive range
//! and `\` escapes the following character:
//! - `abc` matches `a`, `b` or `c`
//! - `a-zA-Z_` matches ASCII letters and `_`
//! - `\-\\` matches `-` and `\`
//! - `\s\t\n\r` matches whitespace characters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

// ---

/// An immutable set of characters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct CharSet {
    chars: Vec<char>,
    ranges: Vec<(char, char)>,
}

impl CharSet {
    /// Creates a set from individual characters.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut chars: Vec<char> = chars.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        Self {
            chars,
            ranges: Vec::new(),
        }
    }

    pub fn of(ch: char) -> Self {
        Self {
            chars: vec![ch],
            ranges: Vec::new(),
        }
    }

    /// Creates a set from a single inclusive range.
    pub fn range(first: char, last: char) -> Self {
        Self::default().with_range(first, last)
    }

    pub fn with_range(mut self, first: char, last: char) -> Self {
        let (first, last) = if first <= last { (first, last) } else { (last, first) };
        self.ranges.push((first, last));
        self
    }

    pub fn with_chars(self, chars: impl IntoIterator<Item = char>) -> Self {
        self.union(&Self::new(chars))
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        match self.chars.len() {
            0 => {}
            1 => {
                if self.chars[0] == ch {
                    return true;
                }
            }
            _ => {
                if self.chars.binary_search(&ch).is_ok() {
                    return true;
                }
            }
        }
        self.ranges.iter().any(|&(first, last)| first <= ch && ch <= last)
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut chars = self.chars.clone();
        chars.extend_from_slice(&other.chars);
        chars.sort_unstable();
        chars.dedup();
        let mut ranges = self.ranges.clone();
        for range in &other.ranges {
            if !ranges.contains(range) {
                ranges.push(*range);
            }
        }
        Self { chars, ranges }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.ranges.is_empty()
    }

    /// Explicitly listed characters, ranges excluded.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<char> for CharSet {
    fn from(ch: char) -> Self {
        Self::of(ch)
    }
}

impl From<&[char]> for CharSet {
    fn from(chars: &[char]) -> Self {
        Self::new(chars.iter().copied())
    }
}

impl<const N: usize> From<[char; N]> for CharSet {
    fn from(chars: [char; N]) -> Self {
        Self::new(chars)
    }
}

impl FromStr for CharSet {
    type Err = CharSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut items = Vec::new();
        let mut it = s.chars();
        while let Some(ch) = it.next() {
            let ch = match ch {
                '\\' => unescape(it.next().ok_or_else(|| CharSetError::DanglingEscape(s.to_string()))?),
                '-' if !items.is_empty() && it.clone().next().is_some() => {
                    items.push(Item::Dash);
                    continue;
                }
                ch => ch,
            };
            items.push(Item::Char(ch));
        }

        let mut set = CharSet::default();
        let mut chars = Vec::new();
        let mut i = 0;
        while i < items.len() {
            match (items[i], items.get(i + 1), items.get(i + 2)) {
                (Item::Char(first), Some(Item::Dash), Some(Item::Char(last))) => {
                    if first > *last {
                        return Err(CharSetError::ReversedRange {
                            first,
                            last: *last,
                        });
                    }
                    set.ranges.push((first, *last));
                    i += 3;
                }
                (Item::Char(ch), _, _) => {
                    chars.push(ch);
                    i += 1;
                }
                (Item::Dash, _, _) => {
                    chars.push('-');
                    i += 1;
                }
            }
        }

        let set = set.with_chars(chars);
        if set.is_empty() {
            return Err(CharSetError::Empty);
        }
        Ok(set)
    }
}

#[derive(Debug, Clone, Copy)]
enum Item {
    Char(char),
    Dash,
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        's' => ' ',
        ch => ch,
    }
}

fn escape(ch: char, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ch {
        '\n' => write!(f, "\\n"),
        '\t' => write!(f, "\\t"),
        '\r' => write!(f, "\\r"),
        ' ' => write!(f, "\\s"),
        '\\' | '-' => write!(f, "\\{}", ch),
        ch => write!(f, "{}", ch),
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(first, last) in &self.ranges {
            escape(first, f)?;
            write!(f, "-")?;
            escape(last, f)?;
        }
        for &ch in &self.chars {
            escape(ch, f)?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for CharSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---

/// Error type for character set parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharSetError {
    #[error("character set is empty")]
    Empty,
    #[error("character set {0:?} ends with a dangling escape")]
    DanglingEscape(String),
    #[error("character range {first:?}-{last:?} is reversed")]
    ReversedRange { first: char, last: char },
}
