//! An Active Oberon scanner, which splits source text into tokens for parsing.
//!
//! The [scanner::Scanner] hands out light-weight [Token] values on demand. Tokens carry their
//! [Symbol] and a span of character offsets only; the text of identifiers and literals comes
//! through a separate side channel that the next scan overwrites. [TokenizedBuffer] runs the
//! scanner over a whole source buffer, keeps each token's text alongside it and reports lexical
//! problems as diagnostics.
//!
//! Scanning is tolerant. Malformed literals still produce tokens, while an unrecognized character
//! ends the stream with [Symbol::EndOfFile].

pub mod scanner;
pub mod token;
pub mod tokenized_buffer;

pub use token::Symbol;
pub use token::Token;
pub use tokenized_buffer::TokenizedBuffer;

use crate::toolchain::diagnostics::DiagnosticEmitter;

pub type TokenIndex = usize;
pub type TokenDiagnosticEmitter<'c, 's> = DiagnosticEmitter<'c, 's, Token>;

#[cfg(test)]
mod scanner_unittests;
