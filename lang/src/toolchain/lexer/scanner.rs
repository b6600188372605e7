use bstr::ByteSlice;

use crate::toolchain::diagnostics::diagnostic_kind::LexerDiagnosticKind;
use crate::toolchain::source::SourceBuffer;

use super::token::{Symbol, Token};

/// A lexical problem noticed while scanning, together with the token produced at that point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanIssue {
    pub kind: LexerDiagnosticKind,
    pub token: Token,
}

/// Demand-driven tokenizer over a fully buffered sequence of code points.
///
/// Tokens carry only their kind and span. The text of the most recent identifier, literal or
/// inline assembler token is available from [Scanner::collected_text] until the next call to
/// [Scanner::next_token], which recycles the buffer.
///
/// Design roughly inspired by the rustc lexer Cursor.
pub struct Scanner {
    chars: Vec<char>,
    index: usize,
    text: Vec<char>,
    issues: Vec<ScanIssue>,
    // Set after a CODE keyword, the next token is the raw assembler text.
    in_code: bool,
}

impl Scanner {
    pub const EOF: char = '\0';

    /// The bstr::Chars iterator substitutes invalid utf-8 sequences with the utf-8 placeholder
    /// U+FFFD. We treat the presence of this character as a signifier that the source has
    /// invalid utf-8, which stops scanning.
    pub const BAD: char = '\u{fffd}';

    pub fn new(chars: Vec<char>) -> Scanner {
        Scanner { chars, index: 0, text: Vec::new(), issues: Vec::new(), in_code: false }
    }

    pub fn from_source(source: &SourceBuffer) -> Scanner {
        Scanner::new(source.code().chars().collect())
    }

    /// Scans and returns the next token. Once input is exhausted every call returns
    /// [Symbol::EndOfFile] at the end position.
    pub fn next_token(&mut self) -> Token {
        self.text.clear();

        if self.in_code {
            self.in_code = false;
            return self.inline_assembler();
        }

        if !self.skip_blanks_and_comments() {
            let token = self.token(Symbol::EndOfFile, self.index);
            self.issues.push(ScanIssue { kind: LexerDiagnosticKind::UnterminatedComment, token });
            return token;
        }

        let start = self.index;
        if self.is_eof() {
            return self.token(Symbol::EndOfFile, start);
        }

        let symbol = match self.bump() {
            '(' => Symbol::LeftParen,
            ')' => Symbol::RightParen,
            '[' => Symbol::LeftBracket,
            ']' => Symbol::RightBracket,
            '{' => Symbol::LeftBrace,
            '}' => Symbol::RightBrace,
            '|' => Symbol::Bar,
            '#' => Symbol::NotEqual,
            '&' => Symbol::And,
            ',' => Symbol::Comma,
            '-' => Symbol::Minus,
            '/' => Symbol::Slash,
            ';' => Symbol::SemiColon,
            '=' => Symbol::Equal,
            '^' => Symbol::Arrow,
            '~' => Symbol::Not,
            '`' => Symbol::Transpose,

            '\\' => {
                if self.first() == '"' {
                    self.escaped_string(start)
                } else {
                    Symbol::BackSlash
                }
            }

            '*' => self.pick('*', Symbol::TimesTimes, Symbol::Times),
            '+' => self.pick('*', Symbol::PlusTimes, Symbol::Plus),
            ':' => self.pick('=', Symbol::Becomes, Symbol::Colon),
            '?' => self.pick('?', Symbol::QuestionMarks, Symbol::QuestionMark),
            '!' => self.pick('!', Symbol::ExclaimMarks, Symbol::ExclaimMark),

            '<' => match self.first() {
                '=' => {
                    self.bump();
                    Symbol::LessEqual
                }
                '<' => {
                    self.bump();
                    self.pick('?', Symbol::LessLessQ, Symbol::LessLess)
                }
                _ => Symbol::Less,
            },

            '>' => match self.first() {
                '=' => {
                    self.bump();
                    Symbol::GreaterEqual
                }
                '>' => {
                    self.bump();
                    self.pick('?', Symbol::GreaterGreaterQ, Symbol::GreaterGreater)
                }
                _ => Symbol::Greater,
            },

            '.' => {
                let symbol = match self.first() {
                    '*' => Symbol::DotTimes,
                    '/' => Symbol::DotSlash,
                    '=' => Symbol::DotEqual,
                    '#' => Symbol::DotUnEqual,
                    '.' => Symbol::Upto,
                    '<' => {
                        self.bump();
                        let symbol = self.pick('=', Symbol::DotLessEqual, Symbol::DotLess);
                        return self.finish(start, symbol);
                    }
                    '>' => {
                        self.bump();
                        let symbol = self.pick('=', Symbol::DotGreaterEqual, Symbol::DotGreater);
                        return self.finish(start, symbol);
                    }
                    _ => return self.finish(start, Symbol::Period),
                };
                self.bump();
                symbol
            }

            '"' => self.quoted_string(start, '"'),
            '\'' => self.quoted_string(start, '\''),

            '0'..='9' => self.number(start),

            c if is_ident_start(c) => {
                self.eat_while(is_ident_continue);
                let word: String = self.chars[start..self.index].iter().collect();
                match Symbol::reserved_word(&word) {
                    Some(Symbol::Code) => {
                        self.in_code = true;
                        Symbol::Code
                    }
                    Some(keyword) => keyword,
                    None => Symbol::Ident,
                }
            }

            c => {
                // Unrecognized input ends the token stream without advancing.
                self.index = start;
                let token = self.token(Symbol::EndOfFile, start);
                let kind = if c == Self::BAD {
                    LexerDiagnosticKind::InvalidUtf8
                } else {
                    LexerDiagnosticKind::UnknownCharacter
                };
                self.issues.push(ScanIssue { kind, token });
                return token;
            }
        };

        self.finish(start, symbol)
    }

    /// Text of the most recently scanned identifier, literal or inline assembler token. Empty
    /// after any other token. Must be read before the next call to [Scanner::next_token].
    pub fn collected_text(&self) -> &[char] {
        &self.text
    }

    pub fn issues(&self) -> &[ScanIssue] {
        &self.issues
    }

    pub fn into_buffer(self) -> Vec<char> {
        self.chars
    }

    fn finish(&mut self, start: usize, symbol: Symbol) -> Token {
        if symbol.has_text() {
            self.text.extend_from_slice(&self.chars[start..self.index]);
        }
        self.token(symbol, start)
    }

    fn token(&self, kind: Symbol, start: usize) -> Token {
        Token::new(kind, start as u32, self.index as u32)
    }

    fn is_eof(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn first(&self) -> char {
        self.chars.get(self.index).copied().unwrap_or(Self::EOF)
    }

    fn second(&self) -> char {
        self.chars.get(self.index + 1).copied().unwrap_or(Self::EOF)
    }

    fn bump(&mut self) -> char {
        let c = self.first();
        if !self.is_eof() {
            self.index += 1;
        }
        c
    }

    fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while !self.is_eof() && predicate(self.first()) {
            self.index += 1;
        }
    }

    // Consumes `next` if it is the current character and returns `two`, otherwise `one`.
    fn pick(&mut self, next: char, two: Symbol, one: Symbol) -> Symbol {
        if self.first() == next {
            self.bump();
            two
        } else {
            one
        }
    }

    // Returns false if input ended inside a comment.
    fn skip_blanks_and_comments(&mut self) -> bool {
        loop {
            self.eat_while(is_blank_space);
            if self.first() != '(' || self.second() != '*' {
                return true;
            }
            self.index += 2;
            let mut depth = 1usize;
            while depth > 0 {
                if self.is_eof() {
                    return false;
                }
                match (self.bump(), self.first()) {
                    ('(', '*') => {
                        self.bump();
                        depth += 1;
                    }
                    ('*', ')') => {
                        self.bump();
                        depth -= 1;
                    }
                    _ => (),
                }
            }
        }
    }

    fn number(&mut self, start: usize) -> Symbol {
        if self.chars[start] == '0' && self.first() == 'x' {
            self.bump();
            if !self.digit_groups(|c| c.is_ascii_hexdigit()) {
                self.malformed_number(start);
            }
            return Symbol::Integer;
        }
        if self.chars[start] == '0' && self.first() == 'b' {
            self.bump();
            if !self.digit_groups(|c| c == '0' || c == '1') || self.first().is_ascii_digit() {
                self.eat_while(|c| c.is_ascii_digit());
                self.malformed_number(start);
            }
            return Symbol::Integer;
        }

        // The first digit is already consumed, so the group loop may see no digit at all.
        self.index -= 1;
        let mut found_hex = false;
        let well_formed = self.digit_groups(|c| {
            if c.is_ascii_digit() {
                true
            } else if c.is_ascii_hexdigit() {
                found_hex = true;
                true
            } else {
                false
            }
        });

        let symbol = match (self.first(), self.second()) {
            ('H', _) => {
                self.bump();
                return self.checked_number(start, well_formed, Symbol::Integer);
            }
            ('X', _) => {
                self.bump();
                return self.checked_number(start, well_formed, Symbol::Character);
            }
            ('.', c) if c != '.' => {
                self.bump();
                self.eat_while(|c| c.is_ascii_digit());
                let mut scaled = true;
                if matches!(self.first(), 'E' | 'D') {
                    self.bump();
                    if matches!(self.first(), '+' | '-') {
                        self.bump();
                    }
                    scaled = self.first().is_ascii_digit();
                    self.eat_while(|c| c.is_ascii_digit());
                }
                let well_formed = well_formed && scaled && !found_hex;
                return self.checked_number(start, well_formed, Symbol::Real);
            }
            _ => Symbol::Integer,
        };
        self.checked_number(start, well_formed && !found_hex, symbol)
    }

    // Digits with optional backtick group separators. False if no digit leads or a separator
    // isn't followed by a digit.
    fn digit_groups(&mut self, mut is_digit: impl FnMut(char) -> bool) -> bool {
        if !is_digit(self.first()) {
            return false;
        }
        loop {
            match self.first() {
                '`' => {
                    self.bump();
                    if !is_digit(self.first()) {
                        return false;
                    }
                }
                c if is_digit(c) => {
                    self.bump();
                }
                _ => return true,
            }
        }
    }

    fn checked_number(&mut self, start: usize, well_formed: bool, symbol: Symbol) -> Symbol {
        if !well_formed {
            self.malformed_number(start);
        }
        symbol
    }

    fn malformed_number(&mut self, start: usize) {
        let token = self.token(Symbol::Integer, start);
        self.issues.push(ScanIssue { kind: LexerDiagnosticKind::MalformedNumber, token });
    }

    // A single-quoted string of exactly one character is a character literal.
    fn quoted_string(&mut self, start: usize, delimiter: char) -> Symbol {
        self.eat_while(|c| c != delimiter);
        if self.is_eof() {
            return self.unterminated_string(start);
        }
        self.bump();
        if delimiter == '\'' && self.index - start == 3 {
            Symbol::Character
        } else {
            Symbol::String
        }
    }

    // `\"...\"`, in which a backslash not followed by a quote is kept verbatim.
    fn escaped_string(&mut self, start: usize) -> Symbol {
        self.bump();
        loop {
            if self.is_eof() {
                return self.unterminated_string(start);
            }
            if self.bump() == '\\' && self.first() == '"' {
                self.bump();
                return Symbol::String;
            }
        }
    }

    fn unterminated_string(&mut self, start: usize) -> Symbol {
        let token = self.token(Symbol::String, start);
        self.issues.push(ScanIssue { kind: LexerDiagnosticKind::UnterminatedString, token });
        Symbol::String
    }

    // Everything up to the next END word, less surrounding blank space.
    fn inline_assembler(&mut self) -> Token {
        self.eat_while(is_blank_space);
        let start = self.index;
        let mut end = self.chars.len();
        let mut i = start;
        while i + 3 <= self.chars.len() {
            if self.chars[i..i + 3] == ['E', 'N', 'D']
                && (i == 0 || !is_ident_continue(self.chars[i - 1]))
                && !self.chars.get(i + 3).copied().is_some_and(is_ident_continue)
            {
                end = i;
                break;
            }
            i += 1;
        }
        while end > start && is_blank_space(self.chars[end - 1]) {
            end -= 1;
        }
        self.index = end;
        self.finish(start, Symbol::InlineAssembler)
    }
}

fn is_blank_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}
