//! Cursor-local source pruning.
//!
//! Given a cursor offset, [`prune`] returns a source string of identical
//! length in which everything outside a minimal neighborhood of the cursor
//! is replaced by whitespace. The Compiler Facade (external to this crate)
//! typechecks the pruned text far faster than the original, and because
//! every byte offset is preserved, diagnostics and completion positions
//! computed against the pruned text apply unchanged to the original.
//!
//! [`prune_word`] is the companion "word-mode" prune: it keeps only the
//! tokens that are lexically equal to one literal identifier and blanks
//! everything else, used when the caller already knows which single name
//! it cares about (e.g. narrowing a file down to one variable's uses).

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use langsvc_parse::lexer::{SyntaxSkeleton, TokenKind};
use langsvc_position::ByteSpan;
use tracing::debug;

/// Prunes `source` around `cursor`, preserving:
///
/// - every byte from the innermost enclosing block's opening brace up to
///   the cursor (the cursor's statement, and everything earlier in its
///   block — spec.md §4.C: "preserved up to the cursor");
/// - for every ancestor block on the path from the compilation unit down to
///   that innermost block, the byte range from that ancestor's own
///   statement start through its opening brace (so enclosing class/method
///   signatures stay visible to the compiler even though their bodies are
///   blanked elsewhere).
///
/// If the cursor is not inside any block, the whole compilation unit is
/// preserved (the top-level edge case named in spec.md §4.C).
///
/// The returned string always has the same length as `source`, and every
/// newline stays at its original byte offset.
pub fn prune(source: &str, cursor: usize) -> String {
    let cursor = cursor.min(source.len());
    let skeleton = SyntaxSkeleton::build(source);

    let mut preserved: Vec<ByteSpan> = Vec::new();

    match skeleton.innermost_block_at(cursor) {
        Some(innermost_idx) => {
            let innermost = skeleton.blocks[innermost_idx];
            preserved.push(ByteSpan::new(innermost.span.start, cursor));

            // Walk ancestors, preserving each one's signature (statement
            // start through its own opening brace).
            let mut maybe_parent = innermost.parent;
            let mut child_start = innermost.span.start;
            while let Some(parent_idx) = maybe_parent {
                let parent = skeleton.blocks[parent_idx];
                let sig_start = skeleton.statement_start(child_start, parent.span.start);
                preserved.push(ByteSpan::new(sig_start, child_start + 1));
                child_start = parent.span.start;
                maybe_parent = parent.parent;
            }
            // The outermost block's own signature, back to the compilation
            // unit start (or the nearest preceding top-level `;`/`}`).
            let top_sig_start = skeleton.statement_start(child_start, 0);
            preserved.push(ByteSpan::new(top_sig_start, child_start + 1));
        }
        None => {
            // Top level: prune to the compilation unit boundary, i.e. keep
            // everything (nothing to blank).
            preserved.push(ByteSpan::whole(source));
        }
    }

    blank_outside(source, &preserved)
}

/// Prunes `source`, keeping only tokens whose text equals `word` and
/// blanking everything else.
pub fn prune_word(source: &str, word: &str) -> String {
    let tokens = langsvc_parse::lexer::tokenize(source);
    let preserved: Vec<ByteSpan> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Ident && &*t.text == word)
        .map(|t| t.span)
        .collect();
    blank_outside(source, &preserved)
}

/// Replaces every byte not covered by `preserved` with a space, except
/// newlines, which are always kept so line numbers never shift.
fn blank_outside(source: &str, preserved: &[ByteSpan]) -> String {
    let preserved_bytes: usize = preserved.iter().map(ByteSpan::len).sum();
    debug!(
        source_len = source.len(),
        preserved_spans = preserved.len(),
        preserved_bytes,
        "pruning source around the cursor's preserved spans"
    );
    let mut keep = vec![false; source.len()];
    for span in preserved {
        let start = span.start.min(source.len());
        let end = span.end.min(source.len());
        for slot in keep.iter_mut().take(end).skip(start) {
            *slot = true;
        }
    }

    let mut out = String::with_capacity(source.len());
    for (i, ch) in source.char_indices() {
        if ch == '\n' || (keep.get(i).copied().unwrap_or(false)) {
            out.push(ch);
        } else {
            // Blank every UTF-8 byte of this char with a single ASCII
            // space per byte, so the byte length never changes.
            for _ in 0..ch.len_utf8() {
                out.push(' ');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pruned_source_has_identical_length() {
        let src = "class A {\n  void m() {\n    int x = 1;\n  }\n}\n";
        let cursor = src.find("int x").unwrap();
        let pruned = prune(src, cursor);
        assert_eq!(pruned.len(), src.len());
    }

    #[test]
    fn pruned_source_preserves_newline_positions() {
        let src = "class A {\n  void m() {\n    int x = 1;\n  }\n}\n";
        let cursor = src.find("int x").unwrap();
        let pruned = prune(src, cursor);
        let orig_newlines: Vec<usize> = src.char_indices().filter(|(_, c)| *c == '\n').map(|(i, _)| i).collect();
        let pruned_newlines: Vec<usize> =
            pruned.char_indices().filter(|(_, c)| *c == '\n').map(|(i, _)| i).collect();
        assert_eq!(orig_newlines, pruned_newlines);
    }

    #[test]
    fn prune_keeps_cursor_statement_and_blanks_sibling_method() {
        let src = "class A {\n  void other() {\n    int unrelated = 1;\n  }\n  void m() {\n    int x = foo.bar;\n  }\n}\n";
        let cursor = src.find("foo.bar").unwrap() + "foo.bar".len();
        let pruned = prune(src, cursor);

        assert!(pruned.contains("int x = foo.bar"));
        assert!(!pruned.contains("unrelated"));
        // Enclosing class/method signatures on the path to the cursor stay visible.
        assert!(pruned.contains("class A"));
        assert!(pruned.contains("void m()"));
    }

    #[test]
    fn prune_member_access_keeps_full_receiver_chain() {
        let src = "class A {\n  void m() {\n    this.service.repository.findAll();\n  }\n}\n";
        let cursor = src.find("repository").unwrap();
        let pruned = prune(src, cursor);
        assert!(pruned.contains("this.service.repository"));
    }

    #[test]
    fn top_level_cursor_prunes_to_compilation_unit_boundary() {
        let src = "package a.b;\n\nclass A {\n  int f;\n}\n";
        let cursor = src.find("class").unwrap();
        let pruned = prune(src, cursor);
        // Nothing to blank: entire file is the compilation unit.
        assert_eq!(pruned, src);
    }

    #[test]
    fn prune_word_keeps_only_matching_identifier() {
        let src = "int word = 1;\nint other = word + 2;\nprint(other);";
        let pruned = prune_word(src, "word");
        assert_eq!(pruned.len(), src.len());
        assert!(pruned.contains("word"));
        assert!(!pruned.contains("other"));
        assert!(!pruned.contains("print"));
    }

    proptest::proptest! {
        #[test]
        fn prune_always_preserves_length_and_newlines(src in "[a-zA-Z0-9_{}();. \n]{0,200}", cursor in 0usize..250) {
            let pruned = prune(&src, cursor);
            prop_assert_eq!(pruned.len(), src.len());
            let orig_nl: Vec<usize> = src.char_indices().filter(|(_, c)| *c == '\n').map(|(i, _)| i).collect();
            let pruned_nl: Vec<usize> = pruned.char_indices().filter(|(_, c)| *c == '\n').map(|(i, _)| i).collect();
            prop_assert_eq!(orig_nl, pruned_nl);
        }
    }
}
