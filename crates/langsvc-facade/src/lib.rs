//! The Compiler Facade boundary: scopes, types, and element resolution the
//! analysis core orchestrates but does not implement.
//!
//! Everything that needs real semantic understanding of the target
//! language — parsing into a resolved tree, typechecking, and the
//! element/type relations used by the partial checker and completion engine —
//! is delegated through [`CompilerFacade`] to a compiler the core never
//! constructs itself. This crate owns only the trait and its vocabulary
//! types; a concrete, compiler-backed implementation is out of scope here
//! (see [`testing::TestFacade`] for the in-memory double the rest of the
//! workspace tests against).

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod facade;
pub mod testing;
pub mod types;

pub use facade::{
    BatchSession, CompilerFacade, Diagnostic, FocusSession, ParseTree, Severity, Signature,
    SourceLocation,
};
pub use testing::TestFacade;
pub use types::{Member, Scope, Type};
