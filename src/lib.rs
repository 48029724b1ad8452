//! Composable character-level tokenizer.
//!
//! Text is fed one character at a time to an ordered list of [`Factory`] instances.
//! Each factory produces [`Cond`] matchers built from character conditions, string
//! conditions, alternations and pipes. Simple tokens are read ahead to completion,
//! compound tokens stay in flight and may contain other tokens.
//!
//! ```
//! use chartok::builder::FactoryBuilder;
//! use chartok::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new(vec![
//!     FactoryBuilder::new("group").compound(true).start_end("group", '(', ')').build().unwrap(),
//!     FactoryBuilder::new("word").char_matcher("word", chartok::CharSet::range('a', 'z')).build().unwrap(),
//! ]);
//! let tokens = tokenizer.tokenize("(ab cd)").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind.as_str()).collect();
//! assert_eq!(kinds, ["word", "word", "group"]);
//! ```

// public modules
pub mod builder;
pub mod charset;
pub mod compound;
pub mod condition;
pub mod driver;
pub mod error;
pub mod factory;
pub mod pipe;
pub mod settings;
pub mod span;
pub mod token;
pub mod tokenizer;

// public uses
pub use charset::CharSet;
pub use condition::{Cond, Condition, CustomCondition};
pub use driver::MultiConditionParser;
pub use error::{Error, Result};
pub use factory::Factory;
pub use settings::Settings;
pub use span::Span;
pub use text_cursor::{Position, TextCursor};
pub use token::{Token, TokenConsumer, TokenTree};
pub use tokenizer::Tokenizer;
