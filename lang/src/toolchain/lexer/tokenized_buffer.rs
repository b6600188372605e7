use super::scanner::{ScanIssue, Scanner};
use super::{Symbol, Token, TokenDiagnosticEmitter, TokenIndex};
use crate::toolchain::diagnostics::diagnostic_emitter::{DiagnosticConsumer, DiagnosticLevel};
use crate::toolchain::diagnostics::diagnostic_kind::LexerDiagnosticKind;
use crate::toolchain::diagnostics::{
    DiagnosticEmitter, DiagnosticKind, DiagnosticLocation, DiagnosticLocationTranslator,
};
use crate::toolchain::source;

/// The complete token stream of a source buffer, ending with a single [Symbol::EndOfFile].
///
/// The text the scanner collects for each identifier and literal is captured right after that
/// token is scanned, so it stays available to the parser for the life of the buffer.
pub struct TokenizedBuffer<'s> {
    tokens: Vec<Token>,
    texts: Vec<String>,
    chars: Vec<char>,
    // Character offset of the start of every line.
    line_starts: Vec<u32>,
    source: &'s source::SourceBuffer<'s>,
}

impl<'s> TokenizedBuffer<'s> {
    pub fn tokenize(
        source: &'s source::SourceBuffer,
        diags: &mut impl DiagnosticConsumer,
    ) -> TokenizedBuffer<'s> {
        let mut scanner = Scanner::from_source(source);
        let mut tokens = Vec::new();
        let mut texts = Vec::new();
        loop {
            let token = scanner.next_token();
            texts.push(scanner.collected_text().iter().collect::<String>());
            tokens.push(token);
            if token.kind == Symbol::EndOfFile {
                break;
            }
        }

        let issues = scanner.issues().to_vec();
        let chars = scanner.into_buffer();
        let mut line_starts = vec![0];
        line_starts.extend(
            chars.iter().enumerate().filter(|(_, c)| **c == '\n').map(|(i, _)| i as u32 + 1),
        );

        let buffer = TokenizedBuffer { tokens, texts, chars, line_starts, source };
        buffer.report_issues(&issues, diags);
        buffer
    }

    fn report_issues(&self, issues: &[ScanIssue], diags: &mut impl DiagnosticConsumer) {
        let mut emitter: TokenDiagnosticEmitter = DiagnosticEmitter::new(diags, self);
        for issue in issues {
            let body = match issue.kind {
                LexerDiagnosticKind::UnknownCharacter => {
                    let c = self.chars.get(issue.token.start as usize).copied().unwrap_or(' ');
                    format!("Unrecognized character '{}', input truncated.", c.escape_debug())
                }
                LexerDiagnosticKind::InvalidUtf8 => {
                    String::from("Invalid utf-8 sequence, input truncated.")
                }
                LexerDiagnosticKind::UnterminatedComment => String::from("Unterminated comment."),
                LexerDiagnosticKind::UnterminatedString => {
                    String::from("Unterminated string literal.")
                }
                LexerDiagnosticKind::MalformedNumber => {
                    format!("Malformed number '{}'.", self.source_text(&issue.token))
                }
            };
            let diag = emitter
                .build(
                    DiagnosticLevel::Error,
                    DiagnosticKind::LexerError { kind: issue.kind },
                    &issue.token,
                    body,
                )
                .emit();
            emitter.emit(&diag);
        }
    }

    pub fn token_at(&self, i: TokenIndex) -> Option<&Token> {
        self.tokens.get(i)
    }

    /// Collected text of the token at `i`, empty for tokens without text.
    pub fn text_at(&self, i: TokenIndex) -> &str {
        self.texts.get(i).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The characters a token's span covers.
    pub fn source_text(&self, token: &Token) -> String {
        let end = (token.end as usize).min(self.chars.len());
        let start = (token.start as usize).min(end);
        self.chars[start..end].iter().collect()
    }

    pub fn source(&self) -> &'s source::SourceBuffer<'s> {
        self.source
    }

    fn line_of(&self, offset: u32) -> usize {
        self.line_starts.partition_point(|start| *start <= offset).saturating_sub(1)
    }
}

impl<'a, 's: 'a> DiagnosticLocationTranslator<'a, Token> for TokenizedBuffer<'s> {
    fn get_location(&self, token: &Token) -> DiagnosticLocation<'a> {
        let line_index = self.line_of(token.start);
        let line_start = self.line_starts[line_index] as usize;
        let line_end = self
            .line_starts
            .get(line_index + 1)
            .map(|next| *next as usize - 1)
            .unwrap_or(self.chars.len());
        let line: String = self.chars[line_start..line_end].iter().collect();
        DiagnosticLocation {
            file_name: self.source.file_name(),
            line_number: line_index as u32 + 1,
            column_number: token.start - line_start as u32 + 1,
            line: line.trim_end_matches('\r').to_string(),
        }
    }
}
