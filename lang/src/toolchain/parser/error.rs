use std::fmt;

use crate::toolchain::diagnostics::diagnostic_emitter::{Diagnostic, DiagnosticLevel};
use crate::toolchain::diagnostics::diagnostic_kind::{DiagnosticKind, SyntaxDiagnosticKind};
use crate::toolchain::lexer::{Symbol, Token, TokenDiagnosticEmitter};

/// Open expression, statement, type and declaration levels the parser allows before giving up,
/// which keeps malformed input from exhausting the stack.
pub const MAX_NESTING: u32 = 32;

/// A grammar violation. Parsing stops at the first one, there is no recovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A required keyword or punctuation token is missing, like the `END` of a block.
    UnexpectedToken { found: Token, expected: Symbol, rule: &'static str },

    /// The lookahead starts none of the primary expression alternatives.
    UnexpectedPrimary { found: Token, rule: &'static str },

    /// The lookahead matches none of several keyword alternatives, as in a type or port
    /// direction.
    UnexpectedAlternative { found: Token, expected: &'static [Symbol], rule: &'static str },

    /// The token at which nesting went past [MAX_NESTING] levels.
    NestingTooDeep { found: Token, rule: &'static str },
}

impl ParseError {
    pub fn found(&self) -> Token {
        match self {
            ParseError::UnexpectedToken { found, .. }
            | ParseError::UnexpectedPrimary { found, .. }
            | ParseError::UnexpectedAlternative { found, .. }
            | ParseError::NestingTooDeep { found, .. } => *found,
        }
    }

    /// Name of the grammar rule in progress.
    pub fn rule(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { rule, .. }
            | ParseError::UnexpectedPrimary { rule, .. }
            | ParseError::UnexpectedAlternative { rule, .. }
            | ParseError::NestingTooDeep { rule, .. } => rule,
        }
    }

    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        let kind = match self {
            ParseError::NestingTooDeep { .. } => SyntaxDiagnosticKind::NestingTooDeep,
            _ if self.found().kind == Symbol::EndOfFile => {
                SyntaxDiagnosticKind::UnexpectedEndOfInput
            }
            ParseError::UnexpectedToken { .. } => SyntaxDiagnosticKind::MissingToken,
            _ => SyntaxDiagnosticKind::UnexpectedToken,
        };
        DiagnosticKind::SyntaxError { kind }
    }

    /// Renders the error as a diagnostic located at the offending token.
    pub fn to_diagnostic<'s>(&self, emitter: &TokenDiagnosticEmitter<'_, 's>) -> Diagnostic<'s> {
        emitter
            .build(DiagnosticLevel::Error, self.diagnostic_kind(), &self.found(), self.to_string())
            .emit()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { found, expected, rule } => {
                write!(f, "Expected {} in {}, found {}.", expected, rule, found.kind)
            }
            ParseError::UnexpectedPrimary { found, rule } => {
                write!(f, "Unexpected {} in {}, expected an operand.", found.kind, rule)
            }
            ParseError::UnexpectedAlternative { found, expected, rule } => {
                write!(f, "Unexpected {} in {}, expected one of ", found.kind, rule)?;
                for (i, symbol) in expected.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", symbol)?;
                }
                f.write_str(".")
            }
            ParseError::NestingTooDeep { found, rule } => {
                write!(
                    f,
                    "Nesting deeper than {} levels in {}, at {}.",
                    MAX_NESTING, rule, found.kind
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
