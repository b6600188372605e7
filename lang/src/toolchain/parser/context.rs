use super::error::MAX_NESTING;
use super::ParseError;
use crate::toolchain::ast::{Name, Span};
use crate::toolchain::lexer::{Symbol, Token, TokenIndex, TokenizedBuffer};

/// Cursor over a [TokenizedBuffer] with one token of lookahead.
///
/// Tracks where the last consumed token ended so that nodes can compute their spans. The buffer
/// always ends with [Symbol::EndOfFile], which is never consumed past.
pub struct Context<'t, 's> {
    tokens: &'t TokenizedBuffer<'s>,
    token_index: TokenIndex,
    previous_end: u32,
    depth: u32,
}

impl<'t, 's> Context<'t, 's> {
    pub fn new(tokens: &'t TokenizedBuffer<'s>) -> Context<'t, 's> {
        Context { tokens, token_index: 0, previous_end: 0, depth: 0 }
    }

    pub fn token(&self) -> Token {
        self.peek(0)
    }

    pub fn token_kind(&self) -> Symbol {
        self.token().kind
    }

    /// The token `offset` places after the current one, or the final end of file.
    pub fn peek(&self, offset: usize) -> Token {
        let tokens = self.tokens.tokens();
        tokens
            .get(self.token_index + offset)
            .or_else(|| tokens.last())
            .copied()
            .unwrap_or(Token::new(Symbol::EndOfFile, 0, 0))
    }

    pub fn peek_kind(&self, offset: usize) -> Symbol {
        self.peek(offset).kind
    }

    /// Start position of the current token, where a node beginning here starts.
    pub fn start(&self) -> u32 {
        self.token().start
    }

    /// Span from `start` to the end of the last consumed token. Nodes that consumed nothing get
    /// an empty span at `start`.
    pub fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.previous_end.max(start))
    }

    // Returns the current token before advancing to the next one.
    pub fn consume(&mut self) -> Token {
        let token = self.token();
        if token.kind != Symbol::EndOfFile {
            self.token_index += 1;
        }
        self.previous_end = token.end;
        token
    }

    // Same as consume but debug_asserts on the current token being the expected kind.
    pub fn consume_checked(&mut self, expected: Symbol) -> Token {
        debug_assert_eq!(self.token_kind(), expected);
        self.consume()
    }

    /// Consumes the current token if it is of kind `optional`.
    pub fn consume_if(&mut self, optional: Symbol) -> Option<Token> {
        if self.token_kind() == optional {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Consumes a token the grammar requires at this point.
    pub fn expect(&mut self, expected: Symbol, rule: &'static str) -> Result<Token, ParseError> {
        if self.token_kind() == expected {
            Ok(self.consume())
        } else {
            Err(ParseError::UnexpectedToken { found: self.token(), expected, rule })
        }
    }

    /// Consumes an identifier along with its text.
    pub fn expect_name(&mut self, rule: &'static str) -> Result<Name, ParseError> {
        let text = self.text();
        let token = self.expect(Symbol::Ident, rule)?;
        Ok(Name::new(token, text))
    }

    /// Opens one nesting level for `rule`, failing past [MAX_NESTING].
    pub fn enter(&mut self, rule: &'static str) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { found: self.token(), rule });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        debug_assert!(self.depth > 0);
        self.depth = self.depth.saturating_sub(1);
    }

    /// Text collected for the current token.
    pub fn text(&self) -> &'t str {
        let tokens: &'t TokenizedBuffer<'s> = self.tokens;
        tokens.text_at(self.token_index)
    }
}
