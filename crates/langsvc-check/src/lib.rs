//! A partial expression checker: a small, safe subset of the target
//! grammar — identifiers, member selects, method invocations, array
//! accesses, conditionals, and parenthesized expressions — checked directly
//! against a [`langsvc_facade::Scope`] without re-entering the full
//! compiler.
//!
//! [`cant_check`] is the escape hatch: it walks the cursor's full,
//! unbounded expression tree and finds the deepest subtree this grammar
//! does not cover, so the caller can re-compile just that subtree and plug
//! the result back in as a retained pair.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod check;
mod expr;

pub use check::{check, CheckExpr, Retained};
pub use expr::{can_check, cant_check, RawExpr, RawExprKind};
