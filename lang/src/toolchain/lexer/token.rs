use std::fmt;

/// A single lexical token of Active Oberon.
///
/// Tokens carry no text. The span is a half-open range of character (code point) offsets into
/// the source buffer, `start <= end`, and `start == end` for [Symbol::EndOfFile].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: Symbol,
    pub start: u32,
    pub end: u32,
}

assert_eq_size!(Token, [u32; 3]);

impl Token {
    pub fn new(kind: Symbol, start: u32, end: u32) -> Token {
        Token { kind, start, end }
    }

    /// Number of source characters the token covers.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The flat set of syntactic symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    EndOfFile,

    // Reserved keywords.
    Await,
    Begin,
    By,
    Const,
    Case,
    Cell,
    Cellnet,
    Code,
    Definition,
    Do,
    Div,
    End,
    Enum,
    Else,
    Elsif,
    Exit,
    Extern,
    False,
    For,
    Finally,
    If,
    Ignore,
    Imag,
    In,
    Is,
    Import,
    Loop,
    Module,
    Mod,
    Nil,
    Of,
    Or,
    Out,
    Operator,
    Procedure,
    Port,
    Repeat,
    Return,
    Self_,
    New,
    Result,
    Then,
    True,
    To,
    Type,
    Until,
    Var,
    While,
    With,

    // Builtin type and intrinsic names.
    Any,
    Array,
    Object,
    Pointer,
    Record,
    Address,
    Size,
    Alias,

    // Operators and punctuation.
    NotEqual,
    And,
    LeftParen,
    RightParen,
    Times,
    TimesTimes,
    Plus,
    PlusTimes,
    Comma,
    Minus,
    Period,
    Upto,
    DotTimes,
    DotSlash,
    DotEqual,
    DotUnEqual,
    DotGreater,
    DotGreaterEqual,
    DotLess,
    DotLessEqual,
    Slash,
    Colon,
    Becomes,
    SemiColon,
    Less,
    LessEqual,
    Equal,
    Greater,
    GreaterEqual,
    LeftBracket,
    RightBracket,
    Arrow,
    LeftBrace,
    Bar,
    RightBrace,
    Not,
    BackSlash,
    Transpose,
    QuestionMark,
    QuestionMarks,
    ExclaimMark,
    ExclaimMarks,
    LessLess,
    LessLessQ,
    GreaterGreater,
    GreaterGreaterQ,

    // Literals, the text of which is collected by the scanner.
    Ident,
    Integer,
    Real,
    String,
    Character,

    /// Raw text between `CODE` and its closing `END`.
    InlineAssembler,
}

impl Symbol {
    /// Looks up a reserved word. Matching is exact and case-sensitive.
    pub fn reserved_word(word: &str) -> Option<Symbol> {
        let symbol = match word {
            "AWAIT" => Symbol::Await,
            "BEGIN" => Symbol::Begin,
            "BY" => Symbol::By,
            "CONST" => Symbol::Const,
            "CASE" => Symbol::Case,
            "CELL" => Symbol::Cell,
            "CELLNET" => Symbol::Cellnet,
            "CODE" => Symbol::Code,
            "DEFINITION" => Symbol::Definition,
            "DO" => Symbol::Do,
            "DIV" => Symbol::Div,
            "END" => Symbol::End,
            "ENUM" => Symbol::Enum,
            "ELSE" => Symbol::Else,
            "ELSIF" => Symbol::Elsif,
            "EXIT" => Symbol::Exit,
            "EXTERN" => Symbol::Extern,
            "FALSE" => Symbol::False,
            "FOR" => Symbol::For,
            "FINALLY" => Symbol::Finally,
            "IF" => Symbol::If,
            "IGNORE" => Symbol::Ignore,
            "IMAG" => Symbol::Imag,
            "IN" => Symbol::In,
            "IS" => Symbol::Is,
            "IMPORT" => Symbol::Import,
            "LOOP" => Symbol::Loop,
            "MODULE" => Symbol::Module,
            "MOD" => Symbol::Mod,
            "NIL" => Symbol::Nil,
            "OF" => Symbol::Of,
            "OR" => Symbol::Or,
            "OUT" => Symbol::Out,
            "OPERATOR" => Symbol::Operator,
            "PROCEDURE" => Symbol::Procedure,
            "PORT" => Symbol::Port,
            "REPEAT" => Symbol::Repeat,
            "RETURN" => Symbol::Return,
            "SELF" => Symbol::Self_,
            "NEW" => Symbol::New,
            "RESULT" => Symbol::Result,
            "THEN" => Symbol::Then,
            "TRUE" => Symbol::True,
            "TO" => Symbol::To,
            "TYPE" => Symbol::Type,
            "UNTIL" => Symbol::Until,
            "VAR" => Symbol::Var,
            "WHILE" => Symbol::While,
            "WITH" => Symbol::With,
            "ANY" => Symbol::Any,
            "ARRAY" => Symbol::Array,
            "OBJECT" => Symbol::Object,
            "POINTER" => Symbol::Pointer,
            "RECORD" => Symbol::Record,
            "ADDRESS" => Symbol::Address,
            "SIZE" => Symbol::Size,
            "ALIAS" => Symbol::Alias,
            _ => return None,
        };
        Some(symbol)
    }

    /// True for the symbols whose text the scanner collects.
    pub fn has_text(self) -> bool {
        matches!(
            self,
            Symbol::Ident
                | Symbol::Integer
                | Symbol::Real
                | Symbol::String
                | Symbol::Character
                | Symbol::InlineAssembler
        )
    }

    /// The relational operators, which may appear at most once per expression.
    pub fn is_relation(self) -> bool {
        matches!(
            self,
            Symbol::Equal
                | Symbol::NotEqual
                | Symbol::Less
                | Symbol::LessEqual
                | Symbol::Greater
                | Symbol::GreaterEqual
                | Symbol::In
                | Symbol::Is
                | Symbol::DotEqual
                | Symbol::DotUnEqual
                | Symbol::DotLess
                | Symbol::DotLessEqual
                | Symbol::DotGreater
                | Symbol::DotGreaterEqual
                | Symbol::QuestionMarks
                | Symbol::ExclaimMarks
                | Symbol::LessLessQ
                | Symbol::GreaterGreaterQ
        )
    }

    pub fn is_add_operator(self) -> bool {
        matches!(self, Symbol::Plus | Symbol::Minus | Symbol::Or)
    }

    pub fn is_mul_operator(self) -> bool {
        matches!(
            self,
            Symbol::Times
                | Symbol::Slash
                | Symbol::Div
                | Symbol::Mod
                | Symbol::And
                | Symbol::DotTimes
                | Symbol::DotSlash
                | Symbol::BackSlash
                | Symbol::TimesTimes
                | Symbol::PlusTimes
        )
    }

    /// How the symbol reads in source code, or a description for the text-carrying symbols.
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::EndOfFile => "end of file",
            Symbol::Await => "AWAIT",
            Symbol::Begin => "BEGIN",
            Symbol::By => "BY",
            Symbol::Const => "CONST",
            Symbol::Case => "CASE",
            Symbol::Cell => "CELL",
            Symbol::Cellnet => "CELLNET",
            Symbol::Code => "CODE",
            Symbol::Definition => "DEFINITION",
            Symbol::Do => "DO",
            Symbol::Div => "DIV",
            Symbol::End => "END",
            Symbol::Enum => "ENUM",
            Symbol::Else => "ELSE",
            Symbol::Elsif => "ELSIF",
            Symbol::Exit => "EXIT",
            Symbol::Extern => "EXTERN",
            Symbol::False => "FALSE",
            Symbol::For => "FOR",
            Symbol::Finally => "FINALLY",
            Symbol::If => "IF",
            Symbol::Ignore => "IGNORE",
            Symbol::Imag => "IMAG",
            Symbol::In => "IN",
            Symbol::Is => "IS",
            Symbol::Import => "IMPORT",
            Symbol::Loop => "LOOP",
            Symbol::Module => "MODULE",
            Symbol::Mod => "MOD",
            Symbol::Nil => "NIL",
            Symbol::Of => "OF",
            Symbol::Or => "OR",
            Symbol::Out => "OUT",
            Symbol::Operator => "OPERATOR",
            Symbol::Procedure => "PROCEDURE",
            Symbol::Port => "PORT",
            Symbol::Repeat => "REPEAT",
            Symbol::Return => "RETURN",
            Symbol::Self_ => "SELF",
            Symbol::New => "NEW",
            Symbol::Result => "RESULT",
            Symbol::Then => "THEN",
            Symbol::True => "TRUE",
            Symbol::To => "TO",
            Symbol::Type => "TYPE",
            Symbol::Until => "UNTIL",
            Symbol::Var => "VAR",
            Symbol::While => "WHILE",
            Symbol::With => "WITH",
            Symbol::Any => "ANY",
            Symbol::Array => "ARRAY",
            Symbol::Object => "OBJECT",
            Symbol::Pointer => "POINTER",
            Symbol::Record => "RECORD",
            Symbol::Address => "ADDRESS",
            Symbol::Size => "SIZE",
            Symbol::Alias => "ALIAS",
            Symbol::NotEqual => "#",
            Symbol::And => "&",
            Symbol::LeftParen => "(",
            Symbol::RightParen => ")",
            Symbol::Times => "*",
            Symbol::TimesTimes => "**",
            Symbol::Plus => "+",
            Symbol::PlusTimes => "+*",
            Symbol::Comma => ",",
            Symbol::Minus => "-",
            Symbol::Period => ".",
            Symbol::Upto => "..",
            Symbol::DotTimes => ".*",
            Symbol::DotSlash => "./",
            Symbol::DotEqual => ".=",
            Symbol::DotUnEqual => ".#",
            Symbol::DotGreater => ".>",
            Symbol::DotGreaterEqual => ".>=",
            Symbol::DotLess => ".<",
            Symbol::DotLessEqual => ".<=",
            Symbol::Slash => "/",
            Symbol::Colon => ":",
            Symbol::Becomes => ":=",
            Symbol::SemiColon => ";",
            Symbol::Less => "<",
            Symbol::LessEqual => "<=",
            Symbol::Equal => "=",
            Symbol::Greater => ">",
            Symbol::GreaterEqual => ">=",
            Symbol::LeftBracket => "[",
            Symbol::RightBracket => "]",
            Symbol::Arrow => "^",
            Symbol::LeftBrace => "{",
            Symbol::Bar => "|",
            Symbol::RightBrace => "}",
            Symbol::Not => "~",
            Symbol::BackSlash => "\\",
            Symbol::Transpose => "`",
            Symbol::QuestionMark => "?",
            Symbol::QuestionMarks => "??",
            Symbol::ExclaimMark => "!",
            Symbol::ExclaimMarks => "!!",
            Symbol::LessLess => "<<",
            Symbol::LessLessQ => "<<?",
            Symbol::GreaterGreater => ">>",
            Symbol::GreaterGreaterQ => ">>?",
            Symbol::Ident => "identifier",
            Symbol::Integer => "integer literal",
            Symbol::Real => "real literal",
            Symbol::String => "string literal",
            Symbol::Character => "character literal",
            Symbol::InlineAssembler => "inline assembler",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_text() || *self == Symbol::EndOfFile {
            f.write_str(self.as_str())
        } else {
            write!(f, "'{}'", self.as_str())
        }
    }
}
