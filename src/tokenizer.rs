// workspace imports
use text_cursor::TextCursor;

// local imports
use crate::driver::MultiConditionParser;
use crate::error::Result;
use crate::factory::Factory;
use crate::token::{Token, TokenConsumer, TokenTree};

// ---

/// Splits whole texts into tokens using an ordered list of factories.
#[derive(Debug)]
pub struct Tokenizer {
    parser: MultiConditionParser,
}

impl Tokenizer {
    pub fn new(factories: Vec<Factory>) -> Self {
        Self {
            parser: MultiConditionParser::new(factories),
        }
    }

    pub fn parser(&self) -> &MultiConditionParser {
        &self.parser
    }

    /// Returns the tokens found in the text in the order they completed.
    ///
    /// Characters which are not part of any token are skipped. Compound matchers still
    /// open at the end of the text are discarded.
    pub fn tokenize(&mut self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let result = self.run(text, &mut |_: usize, token: Token| tokens.push(token));
        let dropped = self.parser.finish();
        if dropped != 0 {
            log::debug!("{} unfinished compound matchers dropped at end of input", dropped);
        }
        result?;
        log::debug!("{} tokens found in {} characters", tokens.len(), text.chars().count());
        Ok(tokens)
    }

    /// Returns the tokens found in the text nested by span containment.
    pub fn tokenize_tree(&mut self, text: &str) -> Result<Vec<TokenTree>> {
        Ok(TokenTree::build(self.tokenize(text)?))
    }

    fn run<C: TokenConsumer>(&mut self, text: &str, consumer: &mut C) -> Result<()> {
        let mut cursor = TextCursor::new(text);
        while let Some(ch) = cursor.next_char() {
            self.parser.parse(ch, &mut cursor, consumer)?;
        }
        Ok(())
    }
}
