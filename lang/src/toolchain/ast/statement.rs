use super::{Expression, Flags, Name, QualifiedIdentifier, Span};
use crate::toolchain::lexer::Token;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    If(IfStatement),
    While(WhileStatement),
    Repeat(RepeatStatement),
    For(ForStatement),
    Loop(LoopStatement),
    Exit(ExitStatement),
    Return(ReturnStatement),
    Await(AwaitStatement),
    Ignore(IgnoreStatement),
    With(WithStatement),
    Case(CaseStatement),
    Simple(SimpleStatement),
    InlineAssembler(InlineAssembler),
    Block(StatementBlock),
    Empty(EmptyStatement),
}

impl_node_enum!(Statement {
    If,
    While,
    Repeat,
    For,
    Loop,
    Exit,
    Return,
    Await,
    Ignore,
    With,
    Case,
    Simple,
    InlineAssembler,
    Block,
    Empty,
});

/// `statement {';' statement}`. Empty statements are kept, so `separators` always has one entry
/// less than `statements`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementSequence {
    pub span: Span,
    pub statements: Vec<Statement>,
    pub separators: Vec<Token>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStatement {
    pub span: Span,
    pub if_token: Token,
    pub condition: Box<Expression>,
    pub then: Token,
    pub body: StatementSequence,
    pub elsifs: Vec<ElsifPart>,
    pub else_part: Option<ElsePart>,
    pub end: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElsifPart {
    pub span: Span,
    pub elsif: Token,
    pub condition: Box<Expression>,
    pub then: Token,
    pub body: StatementSequence,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElsePart {
    pub span: Span,
    pub else_token: Token,
    pub body: StatementSequence,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhileStatement {
    pub span: Span,
    pub while_token: Token,
    pub condition: Box<Expression>,
    pub do_token: Token,
    pub body: StatementSequence,
    pub end: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepeatStatement {
    pub span: Span,
    pub repeat: Token,
    pub body: StatementSequence,
    pub until: Token,
    pub condition: Box<Expression>,
}

/// `FOR ident ':=' expr TO expr [BY expr] DO stmts END`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForStatement {
    pub span: Span,
    pub for_token: Token,
    pub variable: Name,
    pub becomes: Token,
    pub from: Box<Expression>,
    pub to: Token,
    pub limit: Box<Expression>,
    pub by: Option<Token>,
    pub step: Option<Box<Expression>>,
    pub do_token: Token,
    pub body: StatementSequence,
    pub end: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopStatement {
    pub span: Span,
    pub loop_token: Token,
    pub body: StatementSequence,
    pub end: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExitStatement {
    pub span: Span,
    pub exit: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnStatement {
    pub span: Span,
    pub return_token: Token,
    pub value: Option<Box<Expression>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwaitStatement {
    pub span: Span,
    pub await_token: Token,
    pub condition: Box<Expression>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoreStatement {
    pub span: Span,
    pub ignore: Token,
    pub value: Box<Expression>,
}

/// Type guarded regions, `WITH v: T DO ... {'|' v: T DO ...} [ELSE ...] END`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithStatement {
    pub span: Span,
    pub with: Token,
    pub branches: Vec<WithBranch>,
    pub separators: Vec<Token>,
    pub else_part: Option<ElsePart>,
    pub end: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithBranch {
    pub span: Span,
    pub variable: Name,
    pub colon: Token,
    pub type_name: QualifiedIdentifier,
    pub do_token: Token,
    pub body: StatementSequence,
}

/// `CASE expr OF ['|'] branch {'|' branch} ['|'] [ELSE stmts] END`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseStatement {
    pub span: Span,
    pub case: Token,
    pub selector: Box<Expression>,
    pub of: Token,
    pub leading_bar: Option<Token>,
    pub branches: Vec<CaseBranch>,
    pub separators: Vec<Token>,
    /// A `|` closing the last branch, before `ELSE` or `END`.
    pub trailing_bar: Option<Token>,
    pub else_part: Option<ElsePart>,
    pub end: Token,
}

/// Labels are range expressions, `1, 3..5: ...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseBranch {
    pub span: Span,
    pub labels: Vec<Expression>,
    pub separators: Vec<Token>,
    pub colon: Token,
    pub body: StatementSequence,
}

/// A designator, alone as a procedure call, or followed by `:=` (assignment) or one of the
/// port operators `!`, `?`, `<<`, `>>` and a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleStatement {
    pub span: Span,
    pub designator: Box<Expression>,
    pub operator: Option<Token>,
    pub value: Option<Box<Expression>>,
}

impl SimpleStatement {
    pub fn is_assignment(&self) -> bool {
        self.operator.is_some_and(|op| op.kind == crate::toolchain::lexer::Symbol::Becomes)
    }

    pub fn is_call(&self) -> bool {
        self.operator.is_none()
    }
}

/// `CODE ... END`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineAssembler {
    pub span: Span,
    pub code: Token,
    pub assembler: AssemblerBlock,
    pub end: Token,
}

/// Opaque assembler text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblerBlock {
    pub span: Span,
    pub token: Token,
    pub text: String,
}

/// `BEGIN [Flags] stmts END`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementBlock {
    pub span: Span,
    pub begin: Token,
    pub flags: Option<Flags>,
    pub body: StatementSequence,
    pub end: Token,
}

/// Nothing between two separators. The span is empty, at the position of the following token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyStatement {
    pub span: Span,
}

impl_node!(
    Statement,
    StatementSequence,
    IfStatement,
    ElsifPart,
    ElsePart,
    WhileStatement,
    RepeatStatement,
    ForStatement,
    LoopStatement,
    ExitStatement,
    ReturnStatement,
    AwaitStatement,
    IgnoreStatement,
    WithStatement,
    WithBranch,
    CaseStatement,
    CaseBranch,
    SimpleStatement,
    InlineAssembler,
    StatementBlock,
    EmptyStatement,
);

impl_node!(Assembler, AssemblerBlock);
