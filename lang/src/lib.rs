//! Active Oberon language front end.
//!
//! This crate turns Active Oberon source text into a typed abstract syntax tree: a scanner
//! splits the source into tokens, and a recursive-descent parser builds [toolchain::ast] nodes
//! from them. Semantic analysis and code generation are left to later passes.
//!

#[macro_use]
extern crate static_assertions;

pub mod toolchain;
