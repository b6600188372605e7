//! The typed syntax tree.
//!
//! One sum type per grammar category ([Expression], [Statement], [TypeSpec], [Declaration]),
//! whose variants are the concrete node shapes. Every node owns its children and keeps the
//! delimiting tokens it consumed, so the tree can be walked back into exact source positions.
//! Lists keep their separator tokens too: a list of `n > 0` items has `n - 1` separators.

use crate::toolchain::lexer::Token;

/// Half-open range of character offsets covered by a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Span {
        Span { start, end }
    }
}

impl From<Token> for Span {
    fn from(token: Token) -> Span {
        Span { start: token.start, end: token.end }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeFamily {
    Expression,
    Statement,
    Block,
    Assembler,
}

pub trait Node {
    fn span(&self) -> Span;
    fn family(&self) -> NodeFamily;

    fn is_expression(&self) -> bool {
        self.family() == NodeFamily::Expression
    }

    fn is_statement(&self) -> bool {
        self.family() == NodeFamily::Statement
    }

    fn is_block(&self) -> bool {
        self.family() == NodeFamily::Block
    }

    fn is_assembler(&self) -> bool {
        self.family() == NodeFamily::Assembler
    }
}

// Implements Node for structs with a `span` field.
macro_rules! impl_node {
    ( $family:ident, $( $node:ty ),* $(,)? ) => {
        $(
            impl $crate::toolchain::ast::Node for $node {
                fn span(&self) -> $crate::toolchain::ast::Span {
                    self.span
                }
                fn family(&self) -> $crate::toolchain::ast::NodeFamily {
                    $crate::toolchain::ast::NodeFamily::$family
                }
            }
        )*
    };
}

// Implements Node for an enum of single-field node variants.
macro_rules! impl_node_enum {
    ( $enum:ident { $( $variant:ident ),* $(,)? } ) => {
        impl $crate::toolchain::ast::Node for $enum {
            fn span(&self) -> $crate::toolchain::ast::Span {
                match self {
                    $( $enum::$variant(node) => $crate::toolchain::ast::Node::span(node), )*
                }
            }
            fn family(&self) -> $crate::toolchain::ast::NodeFamily {
                match self {
                    $( $enum::$variant(node) => $crate::toolchain::ast::Node::family(node), )*
                }
            }
        }
    };
}

pub mod declaration;
pub mod expression;
pub mod statement;

pub use declaration::*;
pub use expression::*;
pub use statement::*;

/// An identifier token with its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Name {
    pub token: Token,
    pub text: String,
}

impl Name {
    pub fn new(token: Token, text: &str) -> Name {
        Name { token, text: String::from(text) }
    }

    pub fn span(&self) -> Span {
        Span::from(self.token)
    }
}
