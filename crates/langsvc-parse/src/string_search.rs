//! Cheap, compiler-free lexical helpers used to pre-qualify expensive
//! operations before they reach the Compiler Facade.

use crate::lexer::{tokenize, TokenKind};
use regex::Regex;
use std::sync::OnceLock;

/// Extracts the dotted package name from a `package X.Y.Z;` declaration at
/// the head of `source`. Returns the empty string if there is none (the
/// default package).
pub fn package_name(source: &str) -> String {
    let tokens = tokenize(source);
    let mut iter = tokens
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Newline | TokenKind::LineComment | TokenKind::BlockComment));

    let Some(first) = iter.next() else { return String::new() };
    if &*first.text != "package" {
        return String::new();
    }

    let mut name = String::new();
    for tok in iter {
        match tok.punct_char() {
            Some(';') => break,
            Some('.') => name.push('.'),
            _ => name.push_str(&tok.text),
        }
    }
    name
}

fn declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^A-Za-z0-9_])(class|interface|enum|@interface)\s+([A-Za-z_][A-Za-z0-9_]*)")
            .expect("static pattern is valid")
    })
}

/// Bounded scan for a `class|interface|enum|@interface <name>` declaration
/// with word-boundary matching, used as a fast-path before invoking the
/// Compiler Facade for declaration navigation.
pub fn contains_class(source: &str, name: &str) -> bool {
    declaration_regex().captures_iter(source).any(|caps| &caps[2] == name)
}

/// The final `/`-separated segment of a path-like string (used for URIs and
/// filesystem paths alike).
pub fn file_name(path_or_uri: &str) -> &str {
    path_or_uri.rsplit('/').next().unwrap_or(path_or_uri)
}

/// The segment of a dotted qualified name after the final `.`.
pub fn last_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[idx + 1..],
        None => qualified,
    }
}

/// Everything before the final `.` of a dotted qualified name, or the empty
/// string if there is no `.`.
pub fn most_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[..idx],
        None => "",
    }
}

/// Case-sensitive character-prefix match, as used to filter completion
/// candidates against the partial identifier the user has typed.
pub fn matches_partial_name(candidate: &str, prefix: &str) -> bool {
    candidate.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_name_extracts_dotted_path() {
        assert_eq!(package_name("package com.example.util;\nclass A {}"), "com.example.util");
    }

    #[test]
    fn package_name_empty_for_default_package() {
        assert_eq!(package_name("class A {}"), "");
    }

    #[test]
    fn package_name_ignores_leading_comment() {
        assert_eq!(package_name("// header\npackage a.b;"), "a.b");
    }

    #[test]
    fn contains_class_matches_word_boundary() {
        assert!(contains_class("public class Foo { }", "Foo"));
        assert!(!contains_class("public class FooBar { }", "Foo"));
        assert!(contains_class("interface Bar extends Baz {}", "Bar"));
        assert!(contains_class("@interface Ann {}", "Ann"));
    }

    #[test]
    fn lastname_and_mostname_split_on_final_dot() {
        assert_eq!(last_name("java.util.List"), "List");
        assert_eq!(most_name("java.util.List"), "java.util");
        assert_eq!(last_name("List"), "List");
        assert_eq!(most_name("List"), "");
    }

    #[test]
    fn matches_partial_name_is_case_sensitive() {
        assert!(matches_partial_name("completeLocal", "complete"));
        assert!(!matches_partial_name("completeLocal", "Complete"));
    }

    #[test]
    fn file_name_splits_last_path_segment() {
        assert_eq!(file_name("file:///a/b/Foo.src"), "Foo.src");
        assert_eq!(file_name("Foo.src"), "Foo.src");
    }
}
