/// The enumerated type of all diagnostics the toolchain emits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiagnosticKind {
    LexerError { kind: LexerDiagnosticKind },
    SyntaxError { kind: SyntaxDiagnosticKind },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LexerDiagnosticKind {
    /// A character that starts no token. Scanning stops there.
    UnknownCharacter,

    /// Invalid utf-8 sequence in the input, which also stops scanning.
    InvalidUtf8,

    /// A `(*` comment without its matching `*)`.
    UnterminatedComment,

    /// A string literal running into the end of input.
    UnterminatedString,

    /// A numeric literal that breaks the digit rules, `12AF` without an `H` suffix for example.
    MalformedNumber,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyntaxDiagnosticKind {
    /// We were expecting one particular token and didn't encounter it.
    MissingToken,

    /// We've encountered something that starts none of the alternatives of a grammar rule.
    UnexpectedToken,

    /// Unexpected end of input, we were in the middle of parsing something.
    UnexpectedEndOfInput,

    /// Expressions, statements, types or declarations nested past the parser's limit.
    NestingTooDeep,
}
