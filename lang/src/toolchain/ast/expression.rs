use super::{Name, QualifiedIdentifier, Span};
use crate::toolchain::lexer::Token;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    Relation(Relation),
    Range(Range),
    AddOp(AddOp),
    MulOp(MulOp),
    UnaryOp(UnaryOp),
    UnaryExpression(UnaryExpression),
    Literal(Literal),
    AtomLiteral(AtomLiteral),
    AtomOfLiteral(AtomOfLiteral),
    Parenthesis(Parenthesis),
    MemoryNew(MemoryNew),
    Set(Set),
    Array(ArrayLiteral),
    ExpressionList(ExpressionList),
    IndexList(IndexList),
}

impl_node_enum!(Expression {
    Relation,
    Range,
    AddOp,
    MulOp,
    UnaryOp,
    UnaryExpression,
    Literal,
    AtomLiteral,
    AtomOfLiteral,
    Parenthesis,
    MemoryNew,
    Set,
    Array,
    ExpressionList,
    IndexList,
});

/// `left op right` with a single relational operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    pub span: Span,
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
}

/// `[lower] '..' [upper] ['BY' step]`, or a lone `*` standing for the entire range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    pub span: Span,
    pub lower: Option<Box<Expression>>,
    pub upto: Option<Token>,
    pub upper: Option<Box<Expression>>,
    pub by: Option<Token>,
    pub step: Option<Box<Expression>>,
    pub star: Option<Token>,
}

impl Range {
    pub fn is_entire_range(&self) -> bool {
        self.star.is_some()
    }
}

/// `+`, `-` or `OR`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOp {
    pub span: Span,
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
}

/// `*`, `/`, `DIV`, `MOD`, `&`, `.*`, `./`, `\`, `**` or `+*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MulOp {
    pub span: Span,
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
}

/// Prefix `~`, `+` or `-`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnaryOp {
    pub span: Span,
    pub operator: Token,
    pub operand: Box<Expression>,
}

/// A primary expression followed by postfix designator operations and/or flags. Never built
/// when both are absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnaryExpression {
    pub span: Span,
    pub primary: Box<Expression>,
    pub designators: Option<DesignatorList>,
    pub flags: Option<Flags>,
}

/// An identifier, number, string or character, with its source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    pub span: Span,
    pub token: Token,
    pub text: String,
}

/// `NIL`, `IMAG`, `TRUE`, `FALSE`, `SELF` or `RESULT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomLiteral {
    pub span: Span,
    pub token: Token,
}

/// `ADDRESS [OF factor]`, `SIZE [OF factor]` or `ALIAS OF factor`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomOfLiteral {
    pub span: Span,
    pub atom: Token,
    pub of: Option<Token>,
    pub operand: Option<Box<Expression>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parenthesis {
    pub span: Span,
    pub left: Token,
    pub inner: Box<Expression>,
    pub right: Token,
}

/// `NEW qualident '(' [expr_list] ')'`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryNew {
    pub span: Span,
    pub new: Token,
    pub type_name: QualifiedIdentifier,
    pub left: Token,
    pub arguments: Option<Box<Expression>>,
    pub right: Token,
}

/// `'{' [range {',' range}] '}'`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Set {
    pub span: Span,
    pub left: Token,
    pub elements: Vec<Expression>,
    pub separators: Vec<Token>,
    pub right: Token,
}

/// `'[' expr_list ']'`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayLiteral {
    pub span: Span,
    pub left: Token,
    pub elements: Box<Expression>,
    pub right: Token,
}

/// Two or more comma separated expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionList {
    pub span: Span,
    pub items: Vec<Expression>,
    pub separators: Vec<Token>,
}

/// Array indexes, in which `?` stands for all elements of a dimension.
///
/// Either `? [',' right]` or `left [',' ? [',' right]]`. The tokens are kept as found:
/// `comma1` precedes the `?` after a left part, `comma2` precedes the right part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexList {
    pub span: Span,
    pub left: Option<Box<Expression>>,
    pub comma1: Option<Token>,
    pub question: Option<Token>,
    pub comma2: Option<Token>,
    pub right: Option<Box<Expression>>,
}

/// Postfix operations applied left to right to the same base designator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignatorList {
    pub span: Span,
    pub operations: Vec<DesignatorOperation>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DesignatorOperation {
    /// `'(' [expr_list] ')'`
    Call { span: Span, left: Token, arguments: Option<Box<Expression>>, right: Token },
    /// `'[' [index_list] ']'`
    Index { span: Span, left: Token, indexes: Option<Box<Expression>>, right: Token },
    /// `'.' Ident`
    DotName { span: Span, period: Token, name: Name },
    /// Dereference `^` or transpose backtick.
    Arrow { span: Span, token: Token },
}

impl super::Node for DesignatorOperation {
    fn span(&self) -> Span {
        match self {
            DesignatorOperation::Call { span, .. }
            | DesignatorOperation::Index { span, .. }
            | DesignatorOperation::DotName { span, .. }
            | DesignatorOperation::Arrow { span, .. } => *span,
        }
    }

    fn family(&self) -> super::NodeFamily {
        super::NodeFamily::Expression
    }
}

/// `'{' [Flag {',' Flag}] '}'`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flags {
    pub span: Span,
    pub left: Token,
    pub flags: Vec<Flag>,
    pub separators: Vec<Token>,
    pub right: Token,
}

/// `Ident ['(' Expression ')' | '=' Expression]`. For the `=` form, `open` holds the `=` and
/// `close` is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flag {
    pub span: Span,
    pub name: Name,
    pub open: Option<Token>,
    pub value: Option<Box<Expression>>,
    pub close: Option<Token>,
}

impl_node!(
    Expression,
    Relation,
    Range,
    AddOp,
    MulOp,
    UnaryOp,
    UnaryExpression,
    Literal,
    AtomLiteral,
    AtomOfLiteral,
    Parenthesis,
    MemoryNew,
    Set,
    ArrayLiteral,
    ExpressionList,
    IndexList,
    DesignatorList,
    Flags,
    Flag,
);
