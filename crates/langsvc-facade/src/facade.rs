//! The Compiler Facade trait: the one abstract boundary the query engine
//! depends on. This crate defines the interface and an in-memory test
//! double; no concrete compiler implementation ships here (see spec.md §1's
//! scoping and SPEC_FULL.md §6).

use crate::types::{Member, Scope, Type};
use langsvc_error::LangSvcResult;
use langsvc_position::{ByteSpan, Position};
use std::sync::Arc;

/// A parsed, unresolved syntax tree for one file. Opaque beyond its source
/// text — the Parser and Pruner components (`langsvc-parse`, `langsvc-prune`)
/// work from plain text, not this tree; it exists for the Compiler Facade's
/// own internal use plus anything downstream that needs the raw text back.
#[derive(Debug, Clone)]
pub struct ParseTree {
    pub uri: Arc<str>,
    pub source: Arc<str>,
}

/// One signature candidate for signature help, e.g. one overload of an
/// invoked method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub label: String,
    pub params: Vec<langsvc_symbols::Param>,
    pub active_parameter: Option<usize>,
}

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// One compiler diagnostic, forwarded from `compileBatch(..).reportErrors()`
/// without reinterpretation — the core does not invent diagnostic codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub uri: Arc<str>,
    pub severity: Severity,
    pub message: String,
    pub range: ByteSpan,
}

/// A source location used for navigation results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub uri: Arc<str>,
    pub range: ByteSpan,
}

/// A compilation scoped to one cursor location, typically operating on
/// pruned source (see `langsvc-prune`).
pub trait FocusSession {
    /// The [`Scope`] visible at `path` within this session (an
    /// implementation-defined handle identifying a position or subtree
    /// inside the focused compilation — the simplest conforming
    /// implementation is the byte offset itself).
    fn scope(&self, path: usize) -> Option<Scope>;

    /// The element, if any, that resolves at `(line, character)`.
    fn element(&self, line: u32, character: u32) -> Option<Member>;

    /// The type recovered at `path` (see [`Self::scope`] for what `path`
    /// means), or [`Type::Void`] if compilation could not determine one.
    fn type_mirror(&self, path: usize) -> Type;

    /// Signature help for the call enclosing `(line, character)`.
    fn signature_help(&self, line: u32, character: u32) -> Vec<Signature>;

    /// Identifier completions visible at `(line, character)` with the
    /// given prefix.
    fn complete_identifiers(&self, line: u32, character: u32, prefix: &str) -> Vec<Member>;

    /// Member completions for the receiver at `(line, character)`.
    fn complete_members(&self, line: u32, character: u32, prefix: &str) -> Vec<Member>;
}

/// A compilation of a set of files, used for whole-file diagnostics and
/// import-fixing rather than cursor-local queries.
pub trait BatchSession {
    fn report_errors(&self) -> Vec<Diagnostic>;
    fn fix_imports(&self, uri: &str) -> Vec<String>;
}

/// The abstract boundary the analysis core depends on for everything that
/// requires real semantic understanding: parsing, typechecking, and
/// element/type relations. Every method here corresponds 1:1 to an
/// operation named in spec.md §6.
pub trait CompilerFacade: Send + Sync {
    fn parse_file(&self, uri: &str) -> LangSvcResult<ParseTree>;

    fn compile_focus(
        &self,
        uri: &str,
        position: Position,
    ) -> LangSvcResult<Box<dyn FocusSession + '_>>;

    fn compile_batch(&self, files: &[String]) -> LangSvcResult<Box<dyn BatchSession + '_>>;

    fn get_all_members(&self, ty: &Type) -> Vec<Member>;

    fn direct_supertypes(&self, ty: &Type) -> Vec<Type>;

    fn is_assignable(&self, from: &Type, to: &Type) -> bool;

    /// Whether `element` is accessible from `scope`, optionally qualified
    /// by the type it was looked up on (needed to distinguish, e.g., a
    /// protected member accessed through a subtype).
    fn is_accessible(&self, scope: &Scope, element: &Member, owner_type: Option<&Type>) -> bool;

    fn get_type_element(&self, qualified_name: &str) -> Option<Type>;

    /// The transitive closure of supertypes (including `ty` itself and the
    /// implicit root class type), computed by repeated
    /// [`Self::direct_supertypes`] calls. Provided with a default
    /// implementation since every facade gets this for free from
    /// `direct_supertypes`, but a facade backed by a real compiler may
    /// override it with a cached/faster version.
    fn transitive_supertypes(&self, ty: &Type) -> Vec<Type> {
        let mut seen = Vec::new();
        let mut frontier = vec![ty.clone()];
        while let Some(next) = frontier.pop() {
            if seen.contains(&next) {
                continue;
            }
            let supers = self.direct_supertypes(&next);
            seen.push(next);
            frontier.extend(supers);
        }
        seen
    }
}
