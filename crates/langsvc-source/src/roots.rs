//! Inference of source roots and package-name suggestions from indexed
//! files, by walking each file's directory chain against its declared
//! package.

use crate::index::SourceIndexEntry;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Infers the set of source roots implied by `entries`: for each file, the
/// ancestor directory reached by walking up one level per package segment,
/// provided each ancestor's name matches the corresponding segment.
///
/// A file whose directory chain does not terminate in its declared package
/// contributes no root — it is silently dropped rather than treated as an
/// error.
pub fn infer_source_roots(entries: &[SourceIndexEntry]) -> Vec<PathBuf> {
    let mut roots: HashSet<PathBuf> = HashSet::new();
    for entry in entries {
        if let Some(root) = infer_root_for(entry) {
            roots.insert(root);
        }
    }
    let mut result: Vec<PathBuf> = roots.into_iter().collect();
    result.sort();
    result
}

fn infer_root_for(entry: &SourceIndexEntry) -> Option<PathBuf> {
    let dir = entry.path.parent()?;
    if entry.package_name.is_empty() {
        return Some(dir.to_path_buf());
    }
    let segments: Vec<&str> = entry.package_name.split('.').collect();
    let mut cursor = dir;
    for seg in segments.iter().rev() {
        let name = cursor.file_name()?.to_str()?;
        if name != *seg {
            return None;
        }
        cursor = cursor.parent()?;
    }
    Some(cursor.to_path_buf())
}

/// Suggests a package name for a new file in `dir`, by locating the source
/// root `dir` falls under and dotting the remaining path segments.
///
/// Matches the quirk that a suggestion is never offered when every sibling
/// in `dir` already has an empty package — there is no positive evidence
/// that `dir` sits beneath a source root, so no suggestion is made.
pub fn suggested_package_name(dir: &Path, sibling_package_names: &[String], roots: &[PathBuf]) -> Option<String> {
    if !sibling_package_names.is_empty() && sibling_package_names.iter().all(String::is_empty) {
        return None;
    }
    for root in roots {
        if let Ok(rel) = dir.strip_prefix(root) {
            let segments: Vec<String> =
                rel.components().filter_map(|c| c.as_os_str().to_str().map(str::to_string)).collect();
            if segments.is_empty() {
                return Some(String::new());
            }
            return Some(segments.join("."));
        }
    }
    None
}
