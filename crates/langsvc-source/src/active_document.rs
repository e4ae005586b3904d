//! In-memory versioned document contents for files the editor has open.

use langsvc_position::{LineIndex, Range};
use std::time::SystemTime;

/// One edit in the ordered list a `didChange`-style event carries: either a
/// full-text replacement (`range: None`) or a range patch that replaces
/// `range_length` UTF-16 code units starting at `range.start` with `text`,
/// treating the document as newline-separated lines.
#[derive(Debug, Clone)]
pub struct DocumentChange {
    pub range: Option<Range>,
    pub range_length: Option<usize>,
    pub text: String,
}

impl DocumentChange {
    /// A full-document replacement: the whole text, no range.
    pub fn full(text: impl Into<String>) -> Self {
        Self { range: None, range_length: None, text: text.into() }
    }

    /// A range patch replacing `range_length` UTF-16 code units starting at
    /// `range.start` with `text`.
    pub fn range_patch(range: Range, range_length: usize, text: impl Into<String>) -> Self {
        Self { range: Some(range), range_length: Some(range_length), text: text.into() }
    }
}

/// Applies an ordered list of edits to `text`, one after another, each
/// resolving positions against the document as it stands after the previous
/// edit.
fn apply_edits(text: &str, edits: &[DocumentChange]) -> String {
    let mut current = text.to_string();
    for edit in edits {
        current = apply_edit(&current, edit);
    }
    current
}

fn apply_edit(text: &str, edit: &DocumentChange) -> String {
    let Some(range) = edit.range else {
        return edit.text.clone();
    };
    let index = LineIndex::new(text);
    let start = index.position_to_offset(text, range.start);
    let end = utf16_code_units_to_byte_offset(text, start, edit.range_length.unwrap_or(0));
    let mut result = String::with_capacity(text.len() - (end - start) + edit.text.len());
    result.push_str(&text[..start]);
    result.push_str(&edit.text);
    result.push_str(&text[end..]);
    result
}

/// Walks forward from `start` counting UTF-16 code units (not bytes or
/// chars) until `code_units` have been consumed, returning the byte offset
/// reached.
fn utf16_code_units_to_byte_offset(text: &str, start: usize, code_units: usize) -> usize {
    let mut consumed = 0usize;
    let mut offset = start;
    for ch in text[start..].chars() {
        if consumed >= code_units {
            break;
        }
        consumed += ch.len_utf16();
        offset += ch.len_utf8();
    }
    offset
}

/// A document currently open in the editor: its text, LSP-style version
/// number, and the instant it was last changed in memory.
#[derive(Debug, Clone)]
pub struct ActiveDocument {
    pub text: String,
    pub version: i32,
    pub modified: SystemTime,
}

impl ActiveDocument {
    pub fn new(text: String, version: i32) -> Self {
        Self { text, version, modified: SystemTime::now() }
    }

    /// Applies an ordered list of edits if `version` is newer than the
    /// document's current version. Returns `false` (and leaves the document
    /// untouched) for a stale or duplicate version — the caller logs and
    /// drops it, per the version-conflict error kind.
    pub fn apply_change(&mut self, edits: &[DocumentChange], version: i32) -> bool {
        if version <= self.version {
            return false;
        }
        self.text = apply_edits(&self.text, edits);
        self.version = version;
        self.modified = SystemTime::now();
        true
    }
}
