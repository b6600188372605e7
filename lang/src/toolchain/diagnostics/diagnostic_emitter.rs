use std::fmt;
use std::io::Write;

use super::DiagnosticKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiagnosticLevel {
    Note,
    Warning,
    Error,
}

/// A location in code referred to by the diagnostic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiagnosticLocation<'s> {
    pub file_name: &'s str,
    /// 1-based line number, 0 if unknown.
    pub line_number: u32,
    /// 1-based column in characters, 0 if unknown.
    pub column_number: u32,

    /// Text of the whole line containing the location, without the line break.
    pub line: String,
}

impl<'s> fmt::Display for DiagnosticLocation<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name)?;
        if self.line_number > 0 {
            write!(f, ":{}", self.line_number)?;
        }
        if self.column_number > 0 {
            write!(f, ":{}", self.column_number)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiagnosticMessage<'s> {
    pub kind: DiagnosticKind,
    pub location: DiagnosticLocation<'s>,
    pub body: String,
}

impl<'s> fmt::Display for DiagnosticMessage<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The "alternate" flag asks for the message to be printed as an error.
        let infix = if f.alternate() { "ERROR: " } else { "" };
        write!(f, "{}: {}{}", self.location, infix, self.body)
    }
}

/// A complete Diagnostic, including a main message and optional notes, plus the level.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic<'s> {
    pub level: DiagnosticLevel,
    pub message: DiagnosticMessage<'s>,
    pub notes: Vec<DiagnosticMessage<'s>>,
}

impl<'s> Diagnostic<'s> {
    /// Builds a new diagnostic. Normally called by a [DiagnosticBuilder].
    pub fn new(
        level: DiagnosticLevel,
        message: DiagnosticMessage<'s>,
        notes: Vec<DiagnosticMessage<'s>>,
    ) -> Diagnostic<'s> {
        Diagnostic { level, message, notes }
    }
}

impl<'s> fmt::Display for Diagnostic<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.level == DiagnosticLevel::Error {
            writeln!(f, "{:#}", self.message)?;
        } else {
            writeln!(f, "{}", self.message)?;
        }
        for note in &self.notes {
            writeln!(f, "{}", note)?;
        }
        Ok(())
    }
}

/// An interface for an object that can receive diagnostics from the toolchain as they are emitted.
pub trait DiagnosticConsumer {
    fn handle_diagnostic(&mut self, diag: &Diagnostic);
    fn flush(&mut self);
}

pub trait DiagnosticLocationTranslator<'s, LocationT> {
    fn get_location(&self, loc: &LocationT) -> DiagnosticLocation<'s>;
}

// This is an adaptor between subsystems (like the lexer/parser) and the diagnostic consumer. It
// holds the consumer and translator and facilitates creating Diagnostics, and ultimately
// provides the completed diagnostics to the DiagnosticConsumer.
pub struct DiagnosticEmitter<'c, 's, LocationT> {
    consumer: &'c mut dyn DiagnosticConsumer,
    translator: &'s dyn DiagnosticLocationTranslator<'s, LocationT>,
}

impl<'c, 's, LocationT> DiagnosticEmitter<'c, 's, LocationT> {
    pub fn new(
        consumer: &'c mut dyn DiagnosticConsumer,
        translator: &'s dyn DiagnosticLocationTranslator<'s, LocationT>,
    ) -> DiagnosticEmitter<'c, 's, LocationT> {
        DiagnosticEmitter { consumer, translator }
    }

    pub fn build(
        &self,
        level: DiagnosticLevel,
        kind: DiagnosticKind,
        location: &LocationT,
        body: String,
    ) -> DiagnosticBuilder<'s, LocationT> {
        DiagnosticBuilder::new(level, kind, location, body, self.translator)
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        self.consumer.handle_diagnostic(diagnostic);
    }
}

pub struct DiagnosticBuilder<'s, LocationT> {
    level: DiagnosticLevel,
    message: DiagnosticMessage<'s>,
    notes: Vec<DiagnosticMessage<'s>>,

    translator: &'s dyn DiagnosticLocationTranslator<'s, LocationT>,
}

impl<'s, LocationT> DiagnosticBuilder<'s, LocationT> {
    fn new(
        level: DiagnosticLevel,
        kind: DiagnosticKind,
        location: &LocationT,
        body: String,
        translator: &'s dyn DiagnosticLocationTranslator<'s, LocationT>,
    ) -> DiagnosticBuilder<'s, LocationT> {
        let location = translator.get_location(location);
        let message = DiagnosticMessage { kind, location, body };
        DiagnosticBuilder { level, message, notes: Vec::new(), translator }
    }

    pub fn note(
        mut self,
        kind: DiagnosticKind,
        location: &LocationT,
        body: String,
    ) -> DiagnosticBuilder<'s, LocationT> {
        let location = self.translator.get_location(location);
        self.notes.push(DiagnosticMessage { kind, location, body });
        self
    }

    pub fn emit(self) -> Diagnostic<'s> {
        Diagnostic { level: self.level, message: self.message, notes: self.notes }
    }
}

pub struct StreamDiagnosticConsumer<W: Write> {
    stream: std::io::BufWriter<W>,
}

impl<W: Write> StreamDiagnosticConsumer<W> {
    pub fn new(stream: W) -> StreamDiagnosticConsumer<W> {
        StreamDiagnosticConsumer { stream: std::io::BufWriter::new(stream) }
    }
}

impl<W: Write> DiagnosticConsumer for StreamDiagnosticConsumer<W> {
    // A diagnostic that can't be written has nowhere else to go, so write errors are dropped.
    fn handle_diagnostic(&mut self, diag: &Diagnostic) {
        let _ = write!(self.stream, "{}", diag);
    }

    fn flush(&mut self) {
        let _ = self.stream.flush();
    }
}

/// Discards every diagnostic.
pub struct NullDiagnosticConsumer {}

impl DiagnosticConsumer for NullDiagnosticConsumer {
    fn handle_diagnostic(&mut self, _diag: &Diagnostic) {}
    fn flush(&mut self) {}
}

/// Keeps the kind, level and rendered text of every diagnostic it receives.
#[derive(Default)]
pub struct DiagnosticCollector {
    pub diagnostics: Vec<(DiagnosticLevel, DiagnosticKind, String)>,
}

impl DiagnosticCollector {
    pub fn new() -> DiagnosticCollector {
        DiagnosticCollector::default()
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.diagnostics.iter().map(|(_, kind, _)| *kind).collect()
    }
}

impl DiagnosticConsumer for DiagnosticCollector {
    fn handle_diagnostic(&mut self, diag: &Diagnostic) {
        self.diagnostics.push((diag.level, diag.message.kind, diag.to_string()));
    }
    fn flush(&mut self) {}
}
