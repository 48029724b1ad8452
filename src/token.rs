// third-party imports
use serde::Serialize;

// local imports
use crate::span::Span;

// ---

/// A completed match reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Name of the factory which produced the token.
    pub kind: String,
    /// Characters accepted by the condition, which may differ from the source text covered by the span.
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: impl Into<String>, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            span,
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.span.start.offset
    }

    /// Number of source characters covered by the token.
    #[inline]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    pub fn start_line(&self) -> usize {
        self.span.start.line
    }

    pub fn start_column(&self) -> usize {
        self.span.start.column
    }

    pub fn end_line(&self) -> usize {
        self.span.end.line
    }

    pub fn end_column(&self) -> usize {
        self.span.end.column
    }
}

// ---

/// Receives tokens as soon as they complete.
pub trait TokenConsumer {
    /// Called with the index of the factory which produced the token.
    fn consume(&mut self, factory: usize, token: Token);
}

impl<F> TokenConsumer for F
where
    F: FnMut(usize, Token),
{
    #[inline]
    fn consume(&mut self, factory: usize, token: Token) {
        self(factory, token)
    }
}

// ---

/// Tokens nested by span containment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenTree {
    pub token: Token,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TokenTree>,
}

impl TokenTree {
    pub fn leaf(token: Token) -> Self {
        Self {
            token,
            children: Vec::new(),
        }
    }

    /// Builds a forest where each token is a child of the innermost token covering it.
    ///
    /// Siblings are ordered by start offset, a token sharing the span of another one
    /// becomes its child.
    pub fn build(tokens: impl IntoIterator<Item = Token>) -> Vec<TokenTree> {
        let mut tokens: Vec<Token> = tokens.into_iter().collect();
        tokens.sort_by(|a, b| a.offset().cmp(&b.offset()).then(b.len().cmp(&a.len())));

        let mut roots = Vec::new();
        let mut stack: Vec<TokenTree> = Vec::new();
        for token in tokens {
            while stack.last().is_some_and(|top| !top.token.span.contains(&token.span)) {
                if let Some(done) = stack.pop() {
                    attach(&mut stack, &mut roots, done);
                }
            }
            stack.push(TokenTree::leaf(token));
        }
        while let Some(done) = stack.pop() {
            attach(&mut stack, &mut roots, done);
        }
        roots
    }

    /// Total number of tokens in the tree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TokenTree::size).sum::<usize>()
    }
}

fn attach(stack: &mut [TokenTree], roots: &mut Vec<TokenTree>, node: TokenTree) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}
