//! Recursive-descent parser for Active Oberon.
//!
//! The [Parser] reads a [TokenizedBuffer] with one token of lookahead and builds
//! [crate::toolchain::ast] nodes, one public method per grammar rule so any rule can be parsed on
//! its own. The rules are grouped by area in the `handle_*` modules. The first grammar violation
//! aborts the parse with a [ParseError].

pub mod error;

mod context;
mod handle_declaration;
mod handle_expression;
mod handle_statement;
mod handle_type;

pub use error::{ParseError, MAX_NESTING};

use context::Context;

use crate::toolchain::ast::Module;
use crate::toolchain::diagnostics::diagnostic_emitter::DiagnosticConsumer;
use crate::toolchain::diagnostics::DiagnosticEmitter;
use crate::toolchain::lexer::{Symbol, TokenDiagnosticEmitter, TokenizedBuffer};

pub struct Parser<'t, 's> {
    context: Context<'t, 's>,
}

impl<'t, 's> Parser<'t, 's> {
    pub fn new(tokens: &'t TokenizedBuffer<'s>) -> Parser<'t, 's> {
        Parser { context: Context::new(tokens) }
    }

    /// Parses a complete module, which must be followed by the end of input. A failure is also
    /// reported to `diags`.
    pub fn parse(
        tokens: &'t TokenizedBuffer<'s>,
        diags: &mut impl DiagnosticConsumer,
    ) -> Result<Module, ParseError> {
        let mut parser = Parser::new(tokens);
        let result = parser.parse_module().and_then(|module| {
            parser.finish()?;
            Ok(module)
        });
        if let Err(error) = &result {
            let mut emitter: TokenDiagnosticEmitter = DiagnosticEmitter::new(diags, tokens);
            let diagnostic = error.to_diagnostic(&emitter);
            emitter.emit(&diagnostic);
        }
        result
    }

    // Runs `parse` one nesting level deeper. The level is closed again on failure too.
    fn nested<T>(
        &mut self,
        rule: &'static str,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.context.enter(rule)?;
        let result = parse(self);
        self.context.leave();
        result
    }

    /// Checks that all input has been consumed.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.context.expect(Symbol::EndOfFile, "end of input")?;
        Ok(())
    }
}
