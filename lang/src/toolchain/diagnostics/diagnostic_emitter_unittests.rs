#[cfg(test)]
mod tests {
    use crate::toolchain::diagnostics::diagnostic_emitter::{
        DiagnosticConsumer, DiagnosticLevel, StreamDiagnosticConsumer,
    };
    use crate::toolchain::diagnostics::diagnostic_kind::{LexerDiagnosticKind, SyntaxDiagnosticKind};
    use crate::toolchain::diagnostics::{
        DiagnosticCollector, DiagnosticEmitter, DiagnosticKind, DiagnosticLocation,
        DiagnosticLocationTranslator,
    };

    // Locations are plain line numbers here.
    struct LineTranslator {}

    impl<'s> DiagnosticLocationTranslator<'s, u32> for LineTranslator {
        fn get_location(&self, loc: &u32) -> DiagnosticLocation<'s> {
            DiagnosticLocation {
                file_name: "test.Mod",
                line_number: *loc,
                column_number: 3,
                line: String::from("x := 1"),
            }
        }
    }

    #[test]
    fn location_display() {
        let mut location = DiagnosticLocation {
            file_name: "a.Mod",
            line_number: 4,
            column_number: 7,
            line: String::new(),
        };
        assert_eq!(location.to_string(), "a.Mod:4:7");
        location.column_number = 0;
        assert_eq!(location.to_string(), "a.Mod:4");
        location.line_number = 0;
        assert_eq!(location.to_string(), "a.Mod");
    }

    #[test]
    fn emit_error_with_note() {
        let translator = LineTranslator {};
        let mut collector = DiagnosticCollector::new();
        let mut emitter = DiagnosticEmitter::new(&mut collector, &translator);
        let diag = emitter
            .build(
                DiagnosticLevel::Error,
                DiagnosticKind::SyntaxError { kind: SyntaxDiagnosticKind::MissingToken },
                &2,
                String::from("expected END"),
            )
            .note(
                DiagnosticKind::SyntaxError { kind: SyntaxDiagnosticKind::MissingToken },
                &1,
                String::from("to close this block"),
            )
            .emit();
        emitter.emit(&diag);

        assert_eq!(collector.diagnostics.len(), 1);
        let (level, kind, text) = &collector.diagnostics[0];
        assert_eq!(*level, DiagnosticLevel::Error);
        assert_eq!(*kind, DiagnosticKind::SyntaxError { kind: SyntaxDiagnosticKind::MissingToken });
        assert_eq!(text, "test.Mod:2:3: ERROR: expected END\ntest.Mod:1:3: to close this block\n");
    }

    #[test]
    fn stream_consumer_writes_warnings_plain() {
        let translator = LineTranslator {};
        let mut out = Vec::new();
        {
            let mut consumer = StreamDiagnosticConsumer::new(&mut out);
            let mut emitter = DiagnosticEmitter::new(&mut consumer, &translator);
            let diag = emitter
                .build(
                    DiagnosticLevel::Warning,
                    DiagnosticKind::LexerError { kind: LexerDiagnosticKind::UnknownCharacter },
                    &9,
                    String::from("odd character"),
                )
                .emit();
            emitter.emit(&diag);
            consumer.flush();
        }
        assert_eq!(String::from_utf8_lossy(&out), "test.Mod:9:3: odd character\n");
    }
}
