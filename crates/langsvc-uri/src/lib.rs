//! URI ↔ filesystem path conversion and normalization utilities.
//!
//! Workspace roots and active documents are keyed by `file://` URI, but
//! nearly everything the FileStore does (walking directories, reading
//! metadata) works with filesystem paths. This crate is the one place that
//! translates between the two, including the editor's Windows drive-letter
//! case differences.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use std::path::{Path, PathBuf};
use url::Url;

/// Converts a `file://` URI to a filesystem path. Returns `None` for any
/// other scheme or an unparseable URI.
pub fn uri_to_fs_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Converts a filesystem path to a `file://` URI, making it absolute first
/// if needed.
pub fn fs_path_to_uri<P: AsRef<Path>>(path: P) -> Result<String, String> {
    let path = path.as_ref();
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| format!("failed to get current directory: {e}"))?
            .join(path)
    };
    Url::from_file_path(&abs).map(|u| u.to_string()).map_err(|()| {
        format!("failed to convert path to uri: {}", abs.display())
    })
}

/// Returns true if `uri` uses the `file://` scheme.
pub fn is_file_uri(uri: &str) -> bool {
    uri.starts_with("file://")
}

/// Returns true if `uri` uses a scheme other than `file://` (e.g. an
/// editor's in-memory "untitled:" buffer scheme).
pub fn is_special_scheme(uri: &str) -> bool {
    match Url::parse(uri) {
        Ok(url) => url.scheme() != "file",
        Err(_) => uri.starts_with("untitled:") || uri.starts_with("vfs:"),
    }
}

/// Extracts the file extension from a URI's last path segment, ignoring any
/// query string or fragment.
pub fn uri_extension(uri: &str) -> Option<&str> {
    let path_part = uri.rsplit('/').next()?;
    let path_part = path_part.split('?').next()?;
    let path_part = path_part.split('#').next()?;
    let dot_pos = path_part.rfind('.')?;
    let ext = &path_part[dot_pos + 1..];
    if ext.is_empty() { None } else { Some(ext) }
}

/// Normalizes a URI to a consistent key for lookups, lower-casing a Windows
/// drive letter if present so `file:///C:/x` and `file:///c:/x` collide.
pub fn uri_key(uri: &str) -> String {
    if let Ok(url) = Url::parse(uri) {
        let s = url.as_str().to_string();
        if let Some(rest) = s.strip_prefix("file:///")
            && rest.len() > 1
            && rest.as_bytes()[1] == b':'
            && rest.as_bytes()[0].is_ascii_alphabetic()
        {
            return format!("file:///{}{}", rest[0..1].to_ascii_lowercase(), &rest[1..]);
        }
        s
    } else {
        uri.to_string()
    }
}
