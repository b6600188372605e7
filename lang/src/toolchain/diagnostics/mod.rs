//! Tools for the production and management of diagnostic feedback from the toolchain.
//!
//! This design loosely follows the Carbon toolchain design. Toolchain code normally constructs a
//! [diagnostic_emitter::Diagnostic] with a [DiagnosticEmitter], which translates domain-specific
//! locations (a [Token](crate::toolchain::lexer::Token) for the lexer and parser) into file, line
//! and column with a [DiagnosticLocationTranslator], then hands the finished diagnostic to a
//! [diagnostic_emitter::DiagnosticConsumer] that delivers it to the user.
//!
//! Formatting beyond a single `file:line:column: message` line is left to consumers.

pub mod diagnostic_emitter;
pub mod diagnostic_kind;

pub use diagnostic_emitter::DiagnosticCollector;
pub use diagnostic_emitter::DiagnosticEmitter;
pub use diagnostic_emitter::DiagnosticLocation;
pub use diagnostic_emitter::DiagnosticLocationTranslator;
pub use diagnostic_emitter::NullDiagnosticConsumer;
pub use diagnostic_kind::DiagnosticKind;

#[cfg(test)]
mod diagnostic_emitter_unittests;
