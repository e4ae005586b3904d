//! Unified candidate and element taxonomy for the completion pipeline.
//!
//! This crate gives the workspace a single, authoritative definition of what
//! a completion result looks like, so the FileStore, Parser, Pruner, Check,
//! and Completion engine crates never invent their own ad hoc shapes for the
//! same concepts.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use serde::{Deserialize, Serialize};

/// Kind of a resolved program element, as reported by the Compiler Facade
/// and echoed back into [`Candidate::Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// A local variable or parameter binding.
    Local,
    /// An instance or static field.
    Field,
    /// A method (possibly one of several overloads).
    Method,
    /// A constructor.
    Constructor,
    /// A class, interface, enum, or annotation-type declaration.
    Type,
    /// A package.
    Package,
    /// An enum constant.
    EnumConstant,
}

impl ElementKind {
    /// Whether this kind is "type-like" for the purposes of member-select
    /// checking (see the partial checker's member-select rule).
    pub const fn is_type_like(self) -> bool {
        matches!(self, ElementKind::Type)
    }

    /// Whether this kind should be preferred over a method of the same
    /// simple name during non-method identifier/member lookup.
    pub const fn is_non_method(self) -> bool {
        !matches!(self, ElementKind::Method | ElementKind::Constructor)
    }
}

/// A reference to a resolved program element, opaque to this crate beyond
/// its kind, simple name, and an owner-supplied qualified form used for
/// deduplication and sorting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub simple_name: String,
    pub qualified_name: String,
}

impl ElementRef {
    pub fn new(
        kind: ElementKind,
        simple_name: impl Into<String>,
        qualified_name: impl Into<String>,
    ) -> Self {
        Self { kind, simple_name: simple_name.into(), qualified_name: qualified_name.into() }
    }
}

/// One parameter in a snippet or signature-help label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub label: String,
    pub documentation: Option<String>,
}

/// One entry in a completion result.
///
/// This is the tagged variant named in the data model: an identifier query
/// may mix all five kinds in one result (resolved elements, generated
/// snippets, bare keywords, class names from a catalog not yet imported, and
/// package-path segments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Candidate {
    /// A resolved program element (local, field, method, type, ...).
    Element(ElementRef),
    /// A generated snippet, e.g. an `@Override` method stub or a `package`
    /// declaration suggestion.
    Snippet { label: String, body: String },
    /// A bare reserved word (`this`, `super`, `new`, `class`, ...).
    Keyword(String),
    /// A class name candidate sourced from a class catalog.
    ClassName { qualified_name: String, imported: bool },
    /// One segment of a package path, for import/package completion.
    PackagePart { prefix: String, last: String },
}

impl Candidate {
    /// The string used to deduplicate candidates within one assembly pass.
    /// Per the completion engine design, duplicates are prevented by
    /// tracking simple-name sets during assembly.
    pub fn dedup_key(&self) -> String {
        match self {
            Candidate::Element(e) => e.simple_name.clone(),
            Candidate::Snippet { label, .. } => label.clone(),
            Candidate::Keyword(word) => word.clone(),
            Candidate::ClassName { qualified_name, .. } => qualified_name.clone(),
            Candidate::PackagePart { prefix, last } => format!("{prefix}.{last}"),
        }
    }

    /// A stable rank used to order candidates deterministically within the
    /// assembly order the completion engine specifies (see SPEC_FULL.md §9
    /// open question resolution on candidate ordering).
    fn sort_rank(&self) -> u8 {
        match self {
            Candidate::Element(_) => 0,
            Candidate::Snippet { .. } => 1,
            Candidate::Keyword(_) => 2,
            Candidate::ClassName { .. } => 3,
            Candidate::PackagePart { .. } => 4,
        }
    }

    /// The simple name used as the secondary sort key.
    fn sort_name(&self) -> &str {
        match self {
            Candidate::Element(e) => &e.simple_name,
            Candidate::Snippet { label, .. } => label,
            Candidate::Keyword(word) => word,
            Candidate::ClassName { qualified_name, .. } => qualified_name,
            Candidate::PackagePart { last, .. } => last,
        }
    }
}

/// Sorts candidates by `(kind, simple name)` for deterministic output.
///
/// The completion engine design leaves final ordering to the editor, but a
/// deterministic refinement is applied here so the scenario tests in
/// SPEC_FULL.md §8 are not flaky (see SPEC_FULL.md §9).
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| (a.sort_rank(), a.sort_name()).cmp(&(b.sort_rank(), b.sort_name())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_key_by_variant() {
        let el = Candidate::Element(ElementRef::new(ElementKind::Field, "count", "Foo.count"));
        assert_eq!(el.dedup_key(), "count");

        let kw = Candidate::Keyword("this".into());
        assert_eq!(kw.dedup_key(), "this");
    }

    #[test]
    fn sort_candidates_is_deterministic() {
        let mut v = vec![
            Candidate::Keyword("super".into()),
            Candidate::Element(ElementRef::new(ElementKind::Method, "toString", "Object.toString")),
            Candidate::Keyword("class".into()),
            Candidate::Element(ElementRef::new(ElementKind::Field, "count", "Foo.count")),
        ];
        sort_candidates(&mut v);
        let names: Vec<String> = v.iter().map(|c| c.dedup_key()).collect();
        assert_eq!(names, vec!["count", "toString", "class", "super"]);
    }

    #[test]
    fn element_kind_type_like_and_non_method() {
        assert!(ElementKind::Type.is_type_like());
        assert!(!ElementKind::Method.is_type_like());
        assert!(ElementKind::Field.is_non_method());
        assert!(!ElementKind::Method.is_non_method());
    }
}
