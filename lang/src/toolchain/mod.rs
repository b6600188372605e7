//! The front end, from source buffer to syntax tree.
//!
//! Data flows one way: [source] → [lexer] → [parser] → [ast]. Problems along the way are
//! reported through [diagnostics].

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod source;
