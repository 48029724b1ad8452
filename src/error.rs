// third-party imports
use config::ConfigError;
use thiserror::Error;

// workspace imports
use text_cursor::Position;

// local imports
use crate::charset::CharSetError;

// ---

/// Error is an error which may occur while building or running a tokenizer.
///
/// Rejected characters are not errors, conditions report them through their state.
#[derive(Error, Debug)]
pub enum Error {
    #[error("pipe condition {name:?} has no condition sets")]
    NoConditionSets { name: String },
    #[error("condition set {index} of pipe condition {name:?} is empty")]
    EmptyConditionSet { name: String, index: usize },
    #[error(
        "repeatable separator {name:?} accepts at most 2 condition sets, the element set and the separator set, got {count}"
    )]
    TooManyConditionSets { name: String, count: usize },
    #[error("filter condition {name:?} has no alternatives")]
    EmptyFilter { name: String },
    #[error("factory {name:?} has no conditions")]
    EmptyFactory { name: String },
    #[error("string condition {name:?} requires at least one non-empty candidate string")]
    EmptyCandidates { name: String },
    #[error("condition {name:?} does not provide first characters, an explicit first character set is required")]
    MissingFirstChars { name: String },
    #[error("bounded marker {name:?} has an escape character, its start and end markers must be single characters")]
    EscapedStringMarker { name: String },
    #[error(transparent)]
    CharacterReused(#[from] Box<CharacterReused>),
    #[error(transparent)]
    CharSet(#[from] CharSetError),
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result is an alias for standard result with bound Error type.
pub type Result<T> = std::result::Result<T, Error>;

// ---

/// A character completed a compound token and was then used by an earlier in-flight
/// compound matcher to complete or fail as well.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "compound matcher {matcher:?} (started at {matcher_start}) used {ch:?} ({position}) to {outcome} but the character had already been used by {owner:?} (started at {owner_start}) to complete a token"
)]
pub struct CharacterReused {
    pub matcher: String,
    pub matcher_start: Position,
    pub outcome: Outcome,
    pub ch: char,
    pub position: String,
    pub owner: String,
    pub owner_start: Position,
}

/// Terminal state reached by a matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Complete,
    Fail,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Complete => write!(f, "complete"),
            Outcome::Fail => write!(f, "fail"),
        }
    }
}
