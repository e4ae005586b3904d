//! Lexical utilities shared by the Pruner and Completion engine: a
//! dependency-free tokenizer, brace-nesting skeleton, and cursor
//! completion-context classifier.
//!
//! Nothing in this crate touches the filesystem or calls into the Compiler
//! Facade — it is pure, and every function here is a plain `&str -> T`
//! transform, in keeping with the design note that static helpers should
//! become pure functions rather than hidden global state.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod completion_context;
pub mod lexer;
pub mod string_search;

pub use completion_context::{completion_context, CompletionContext, CompletionFlags, MemberAccess};
pub use lexer::{is_keyword, tokenize, Block, SyntaxSkeleton, Token, TokenKind};
pub use string_search::{
    contains_class, file_name, last_name, matches_partial_name, most_name, package_name,
};
