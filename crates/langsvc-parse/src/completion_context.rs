//! Classifying the cursor's syntactic position ahead of a completion query.

use crate::lexer::{SyntaxSkeleton, Token, TokenKind};
use langsvc_position::ByteSpan;
use tracing::debug;

/// Flags describing the syntactic position of a completion cursor, as named
/// in the data model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionFlags {
    pub inside_class: bool,
    pub inside_method: bool,
    pub add_parens: bool,
    pub add_semicolon: bool,
    pub is_annotation: bool,
    pub is_case_label: bool,
    pub is_import: bool,
    pub is_member_reference: bool,
}

/// The receiver expression text immediately before a `.` or `::` trigger,
/// when the cursor sits in member-access or member-reference position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAccess {
    /// Source text of the receiver expression, e.g. `"foo.bar"` in
    /// `foo.bar.| ` or `"\"abc\""` in `"abc".| `.
    pub receiver_text: String,
    /// Byte span of the receiver expression.
    pub receiver_span: ByteSpan,
}

/// The value produced by [`completion_context`] for a given cursor offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    /// The partial identifier prefix already typed before the cursor
    /// (possibly empty).
    pub prefix: String,
    /// Byte offset where `prefix` begins.
    pub prefix_start: usize,
    pub flags: CompletionFlags,
    /// Present when `flags.is_member_reference` (or the cursor otherwise
    /// follows a `.`/`::`) — the receiver to resolve first.
    pub member_access: Option<MemberAccess>,
}

fn is_trivia(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Whitespace | TokenKind::Newline | TokenKind::LineComment | TokenKind::BlockComment
    )
}

/// Walks backward from `offset` collecting a dotted receiver expression
/// (`ident (. ident)*`) immediately preceding a `.` or `::` trigger.
fn scan_receiver(tokens: &[Token], trigger_idx: usize, source: &str) -> Option<MemberAccess> {
    let mut idx = trigger_idx;
    // Skip the trigger token(s) themselves (`.` or `::`, i.e. two `:` puncts).
    loop {
        if idx == 0 {
            return None;
        }
        idx -= 1;
        if !is_trivia(tokens[idx].kind) {
            break;
        }
    }

    let end = tokens[idx].span.end;
    let mut start = tokens[idx].span.start;

    // Walk back over `ident (. ident)*` or a literal receiver (string/number).
    loop {
        match tokens[idx].kind {
            TokenKind::Ident | TokenKind::StringLit | TokenKind::NumberLit | TokenKind::CharLit => {
                start = tokens[idx].span.start;
            }
            _ => break,
        }
        if idx == 0 {
            break;
        }
        // Look back for a `.` continuing the chain.
        let mut probe = idx;
        loop {
            if probe == 0 {
                return Some(MemberAccess { receiver_text: source[start..end].to_string(), receiver_span: ByteSpan::new(start, end) });
            }
            probe -= 1;
            if !is_trivia(tokens[probe].kind) {
                break;
            }
        }
        if tokens[probe].punct_char() == Some('.') {
            idx = probe;
            loop {
                if idx == 0 {
                    return Some(MemberAccess { receiver_text: source[start..end].to_string(), receiver_span: ByteSpan::new(start, end) });
                }
                idx -= 1;
                if !is_trivia(tokens[idx].kind) {
                    break;
                }
            }
        } else {
            break;
        }
    }

    Some(MemberAccess { receiver_text: source[start..end].to_string(), receiver_span: ByteSpan::new(start, end) })
}

/// Determines whether `offset` sits on a `case <expr>:` label by scanning
/// backward for a `case` keyword before the nearest preceding `:`/`;`/`{`.
fn is_case_label_position(skeleton: &SyntaxSkeleton, offset: usize) -> bool {
    for token in skeleton.tokens.iter().rev() {
        if token.span.end > offset {
            continue;
        }
        if is_trivia(token.kind) {
            continue;
        }
        if matches!(token.punct_char(), Some(':') | Some(';') | Some('{') | Some('}')) {
            return false;
        }
        if &*token.text == "case" {
            return true;
        }
    }
    false
}

/// Determines whether `offset` sits inside an `import ...;` statement.
fn is_import_position(skeleton: &SyntaxSkeleton, offset: usize) -> bool {
    for token in skeleton.tokens.iter().rev() {
        if token.span.end > offset {
            continue;
        }
        if is_trivia(token.kind) {
            continue;
        }
        if token.punct_char() == Some(';') {
            return false;
        }
        if &*token.text == "import" {
            return true;
        }
    }
    false
}

/// Computes the [`CompletionContext`] for `offset` into `source`.
///
/// This is a lexical approximation of "locate the smallest token under the
/// cursor, classify the syntactic position" — it does not require a full
/// parse tree, only the [`SyntaxSkeleton`] brace structure.
pub fn completion_context(source: &str, offset: usize) -> CompletionContext {
    let skeleton = SyntaxSkeleton::build(source);
    let offset = offset.min(source.len());

    // The partial identifier directly before the cursor.
    let mut prefix_start = offset;
    let bytes = source.as_bytes();
    while prefix_start > 0 {
        let b = bytes[prefix_start - 1];
        if b == b'_' || b.is_ascii_alphanumeric() {
            prefix_start -= 1;
        } else {
            break;
        }
    }
    let prefix = source[prefix_start..offset].to_string();

    let mut flags = CompletionFlags::default();

    let inner_block = skeleton.innermost_block_at(offset);
    flags.inside_class = inner_block.is_some();
    flags.inside_method = skeleton
        .innermost_block_at(offset)
        .and_then(|idx| skeleton.blocks[idx].parent)
        .is_some();

    // Annotation position: prefix is preceded immediately by `@`.
    if prefix_start > 0 && bytes[prefix_start - 1] == b'@' {
        flags.is_annotation = true;
    }

    flags.is_case_label = is_case_label_position(&skeleton, prefix_start);
    flags.is_import = is_import_position(&skeleton, prefix_start);

    // Member access / reference: is the token immediately before the prefix
    // a `.` or a `::` pair?
    let tok_before_prefix_idx = skeleton
        .tokens
        .iter()
        .rposition(|t| t.span.end <= prefix_start && !is_trivia(t.kind));
    let mut member_access = None;
    if let Some(tok_before_prefix_idx) = tok_before_prefix_idx {
        let trigger = &skeleton.tokens[tok_before_prefix_idx];
        if trigger.punct_char() == Some('.') {
            flags.is_member_reference = false;
            member_access = scan_receiver(&skeleton.tokens, tok_before_prefix_idx, source);
        } else if trigger.punct_char() == Some(':') {
            // `::` is two adjacent `:` puncts.
            if tok_before_prefix_idx > 0
                && skeleton.tokens[tok_before_prefix_idx - 1].punct_char() == Some(':')
            {
                flags.is_member_reference = true;
                member_access = scan_receiver(&skeleton.tokens, tok_before_prefix_idx - 1, source);
            }
        }
    }

    debug!(
        offset,
        prefix_len = prefix.len(),
        is_member_reference = flags.is_member_reference,
        has_member_access = member_access.is_some(),
        "classified completion cursor position"
    );

    CompletionContext { prefix, prefix_start, flags, member_access }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifier_prefix() {
        let src = "class A { void m() { int completeLo } }";
        let offset = src.find("completeLo").unwrap() + "completeLo".len();
        let ctx = completion_context(src, offset);
        assert_eq!(ctx.prefix, "completeLo");
        assert!(ctx.flags.inside_method);
        assert!(!ctx.flags.is_member_reference);
        assert!(ctx.member_access.is_none());
    }

    #[test]
    fn member_access_detects_receiver() {
        let src = r#"class A { void m() { "abc".eq } }"#;
        let offset = src.find(".eq").unwrap() + 3;
        let ctx = completion_context(src, offset);
        assert_eq!(ctx.prefix, "eq");
        let access = ctx.member_access.expect("member access expected");
        assert_eq!(access.receiver_text, "\"abc\"");
    }

    #[test]
    fn member_reference_detects_double_colon() {
        let src = "class A { void m() { Runnable r = Foo::ba } }";
        let offset = src.len() - 1;
        let ctx = completion_context(src, offset);
        assert!(ctx.flags.is_member_reference);
        let access = ctx.member_access.expect("member access expected");
        assert_eq!(access.receiver_text, "Foo");
    }

    #[test]
    fn annotation_position_detected() {
        let src = "class A { @Overr void m() {} }";
        let offset = src.find("Overr").unwrap() + "Overr".len();
        let ctx = completion_context(src, offset);
        assert!(ctx.flags.is_annotation);
        assert_eq!(ctx.prefix, "Overr");
    }

    #[test]
    fn case_label_position_detected() {
        let src = "class A { void m() { switch (x) { case Fo: } } }";
        let offset = src.find("Fo:").unwrap() + 2;
        let ctx = completion_context(src, offset);
        assert!(ctx.flags.is_case_label);
    }

    #[test]
    fn import_position_detected() {
        let src = "import java.util.Li";
        let ctx = completion_context(src, src.len());
        assert!(ctx.flags.is_import);
    }

    #[test]
    fn top_level_cursor_has_no_enclosing_block() {
        let src = "cla";
        let ctx = completion_context(src, src.len());
        assert!(!ctx.flags.inside_class);
        assert!(!ctx.flags.inside_method);
    }
}
