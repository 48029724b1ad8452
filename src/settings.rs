// std imports
use std::include_str;
use std::path::Path;

// third-party imports
use config::{Config, File, FileFormat};
use serde::Deserialize;

// local imports
use crate::builder::{FactoryBuilder, Marker};
use crate::charset::CharSet;
use crate::condition::CharCondition;
use crate::error::{Error, Result};
use crate::factory::Factory;
use crate::tokenizer::Tokenizer;

// ---

static DEFAULT_SETTINGS: &str = include_str!("../etc/defaults/tokenizer.yaml");

// ---

/// Tokenizer rules, in priority order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub rules: Vec<RuleSettings>,
}

impl Settings {
    /// Loads the embedded default settings.
    pub fn embedded() -> Result<Self> {
        Self::build(Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Yaml)))
    }

    /// Loads settings from a file layered over the embedded defaults.
    ///
    /// The file format is detected by the file extension. Rules in the file replace the default rules.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Yaml))
                .add_source(File::from(path)),
        )?;
        log::debug!("loaded {} tokenizer rules from {}", settings.rules.len(), path.display());
        Ok(settings)
    }

    /// Parses settings from a string, without defaults.
    pub fn from_source(source: &str, format: FileFormat) -> Result<Self> {
        Self::build(Config::builder().add_source(File::from_str(source, format)))
    }

    /// Creates factories for the rules, in the same order.
    pub fn build_factories(&self) -> Result<Vec<Factory>> {
        self.rules.iter().map(RuleSettings::build).collect()
    }

    pub fn tokenizer(&self) -> Result<Tokenizer> {
        Ok(Tokenizer::new(self.build_factories()?))
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}

// ---

/// A single factory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleSettings {
    pub name: String,
    #[serde(default)]
    pub compound: bool,
    #[serde(default)]
    pub first_chars: Option<CharSet>,
    pub markers: Vec<MarkerSettings>,
}

impl RuleSettings {
    pub fn build(&self) -> Result<Factory> {
        let mut builder = FactoryBuilder::new(&self.name).compound(self.compound);
        if let Some(chars) = &self.first_chars {
            builder = builder.first_chars(chars.clone());
        }
        for marker in &self.markers {
            builder = marker.apply(builder)?;
        }
        builder.build()
    }
}

// ---

/// A single alternative of a factory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MarkerSettings {
    /// One of the strings.
    Literal { name: String, values: Vec<String> },
    /// A single character from the set.
    Chars { name: String, chars: CharSet },
    /// A run of characters, optionally with a different set for the first one.
    Contains {
        name: String,
        chars: CharSet,
        #[serde(default)]
        first: Option<CharSet>,
    },
    Identifier {
        name: String,
        first: CharSet,
        body: CharSet,
        separator: char,
    },
    /// Text between start and end markers, both included.
    Bounded {
        name: String,
        start: String,
        end: String,
        #[serde(default)]
        escape: Option<char>,
    },
}

impl MarkerSettings {
    fn apply(&self, builder: FactoryBuilder) -> Result<FactoryBuilder> {
        Ok(match self {
            Self::Literal { name, values } => builder.string_literal(name, values),
            Self::Chars { name, chars } => builder.char_literal(name, chars.clone()),
            Self::Contains { name, chars, first: None } => builder.char_matcher(name, chars.clone()),
            Self::Contains {
                name,
                chars,
                first: Some(first),
            } => builder.condition(CharCondition::contains_first(name.as_str(), first.clone(), chars.clone())),
            Self::Identifier {
                name,
                first,
                body,
                separator,
            } => builder.identifier(name, first.clone(), body.clone(), *separator),
            Self::Bounded {
                name,
                start,
                end,
                escape: None,
            } => builder.start_end(name, marker(start), marker(end)),
            Self::Bounded {
                name,
                start,
                end,
                escape: Some(escape),
            } => match (single(start), single(end)) {
                (Some(start), Some(end)) => builder.start_end_not_preceded_by(name, start, *escape, end),
                _ => return Err(Error::EscapedStringMarker { name: name.clone() }),
            },
        })
    }
}

fn single(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

fn marker(s: &str) -> Marker {
    match single(s) {
        Some(ch) => Marker::Char(ch),
        None => Marker::Str(s.to_string()),
    }
}

#[cfg(test)]
mod tests;
