//! Multi-condition driver.
//!
//! The driver is fed one character at a time. Simple factories are driven to completion
//! right away by reading ahead, compound factories produce matchers which stay in flight
//! until they complete or fail and may contain other tokens.

// workspace imports
use text_cursor::{Position, TextCursor};

// local imports
use crate::condition::{Cond, Condition};
use crate::error::{CharacterReused, Outcome, Result};
use crate::factory::Factory;
use crate::span::Span;
use crate::token::{Token, TokenConsumer};

// ---

/// A compound condition in flight.
#[derive(Debug)]
pub struct Matcher {
    start: Position,
    factory: usize,
    cond: Cond,
}

impl Matcher {
    /// Position of the character which started the matcher.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Index of the factory which created the matcher.
    pub fn factory(&self) -> usize {
        self.factory
    }

    pub fn condition(&self) -> &Cond {
        &self.cond
    }
}

// ---

/// Feeds characters to an ordered list of factories and the compound matchers they started.
#[derive(Debug)]
pub struct MultiConditionParser {
    factories: Vec<Factory>,
    in_flight: Vec<Matcher>,
}

impl MultiConditionParser {
    /// Creates a driver, factories listed first take priority.
    pub fn new(factories: Vec<Factory>) -> Self {
        let compound = factories.iter().filter(|f| f.is_compound()).count();
        Self {
            factories,
            in_flight: Vec::with_capacity(compound.min(10)),
        }
    }

    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    /// Compound matchers in the order they were started.
    pub fn in_flight(&self) -> &[Matcher] {
        &self.in_flight
    }

    /// Processes the character which has just been read from `cursor`.
    ///
    /// If a simple factory completes a token starting with `ch`, the cursor is left after the
    /// token and the number of characters it covers is returned. Otherwise the cursor is left
    /// where it was, `ch` is offered to the compound matchers in flight, and zero is returned.
    ///
    /// Fails with [`Error::CharacterReused`](crate::error::Error::CharacterReused) if a single
    /// character token completed by a compound matcher also completes or fails an enclosing one.
    pub fn parse<C>(&mut self, ch: char, cursor: &mut TextCursor, consumer: &mut C) -> Result<usize>
    where
        C: TokenConsumer + ?Sized,
    {
        for index in 0..self.factories.len() {
            let factory = &mut self.factories[index];
            if !factory.is_match(ch) {
                continue;
            }

            if factory.is_compound() {
                let start = cursor.position();
                log::trace!("compound matcher {} started at {}", factory.name(), start);
                self.in_flight.push(Matcher {
                    start,
                    factory: index,
                    cond: factory.create(),
                });
                continue;
            }

            let start = cursor.position();
            let checkpoint = cursor.mark();
            let mut cond = factory.create();
            cursor.unread(1);
            let mut read = 0;
            while let Some(next) = cursor.next_char() {
                read += 1;
                if !cond.accept_next(next, cursor) || cond.is_failed() || cond.is_complete() {
                    break;
                }
            }
            if cond.is_complete() {
                let token = make_token(factory.name(), &cond, start, cursor);
                log::trace!("simple token {} completed at {}", factory.name(), token.span);
                factory.release(cond);
                consumer.consume(index, token);
                return Ok(read);
            }
            cursor.restore(checkpoint);
            factory.release(cond);
        }

        self.offer(ch, cursor, consumer)?;
        Ok(0)
    }

    /// Offers the character to the matchers in flight, most recently started first.
    fn offer<C>(&mut self, ch: char, cursor: &mut TextCursor, consumer: &mut C) -> Result<()>
    where
        C: TokenConsumer + ?Sized,
    {
        let mut i = self.in_flight.len();
        while i > 0 {
            i -= 1;
            let cond = &mut self.in_flight[i].cond;
            cond.accept_next(ch, cursor);
            let complete = cond.is_complete();
            if !complete && !cond.is_failed() {
                continue;
            }

            let matcher = self.in_flight.remove(i);
            let factory = &mut self.factories[matcher.factory];
            if !complete {
                log::trace!("compound matcher {} started at {} failed", factory.name(), matcher.start);
                factory.release(matcher.cond);
                continue;
            }

            let token = make_token(factory.name(), &matcher.cond, matcher.start, cursor);
            log::trace!("compound token {} completed at {}", factory.name(), token.span);
            factory.release(matcher.cond);
            let owner_start = token.span.start;
            let owner = token.kind.clone();
            let single = token.len() == 1;
            consumer.consume(matcher.factory, token);

            if single {
                // enclosing matchers may see the character but must not be finished by it
                for k in (0..i).rev() {
                    let other = &mut self.in_flight[k];
                    other.cond.accept_next(ch, cursor);
                    let outcome = if other.cond.is_complete() {
                        Outcome::Complete
                    } else if other.cond.is_failed() {
                        Outcome::Fail
                    } else {
                        continue;
                    };
                    return Err(Box::new(CharacterReused {
                        matcher: self.factories[other.factory].name().to_string(),
                        matcher_start: other.start,
                        outcome,
                        ch,
                        position: cursor.position_display(),
                        owner,
                        owner_start,
                    })
                    .into());
                }
            }
            break;
        }
        Ok(())
    }

    /// Discards the matchers still in flight, returning how many there were.
    pub fn finish(&mut self) -> usize {
        let count = self.in_flight.len();
        for matcher in self.in_flight.drain(..) {
            let factory = &mut self.factories[matcher.factory];
            log::debug!("dropping unfinished {} started at {}", factory.name(), matcher.start);
            factory.release(matcher.cond);
        }
        count
    }
}

fn make_token(kind: &str, cond: &Cond, start: Position, cursor: &TextCursor) -> Token {
    let span = cond.span().unwrap_or_else(|| Span::new(start, cursor.position()));
    Token::new(kind, cond.text(), span)
}
