//! On-disk source index: file discovery and lexically-extracted metadata.

use langsvc_parse::package_name;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// One discovered source file: its path, on-disk modification instant, and
/// lexically-extracted package name.
#[derive(Debug, Clone)]
pub struct SourceIndexEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub package_name: String,
}

/// Walks `root`, returning one [`SourceIndexEntry`] per discovered source
/// file. Excludes symbolic-link subtrees and any file named
/// `module_descriptor_file_name`, matching the source index's key
/// invariant.
pub fn walk_root(
    root: &Path,
    source_extension: &str,
    module_descriptor_file_name: &str,
) -> Vec<SourceIndexEntry> {
    let mut out = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|e| e.depth() == 0 || !e.file_type().is_symlink());

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.file_name().and_then(|n| n.to_str()) == Some(module_descriptor_file_name) {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(source_extension) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else { continue };
        let Ok(modified) = metadata.modified() else { continue };
        let text = fs::read_to_string(path).unwrap_or_default();
        out.push(SourceIndexEntry { path: path.to_path_buf(), modified, package_name: package_name(&text) });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn walk_root_finds_source_files_and_extracts_package() {
        let dir = tempfile::tempdir().unwrap();
        let pkg_dir = dir.path().join("a/b");
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(pkg_dir.join("Foo.java"), "package a.b;\nclass Foo {}\n").unwrap();
        fs::write(pkg_dir.join("notes.txt"), "ignored").unwrap();

        let entries = walk_root(dir.path(), "java", "module-info.java");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].package_name, "a.b");
    }

    #[test]
    fn walk_root_excludes_module_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("module-info.java"), "module m {}\n").unwrap();
        fs::write(dir.path().join("Foo.java"), "class Foo {}\n").unwrap();

        let entries = walk_root(dir.path(), "java", "module-info.java");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path.file_name().unwrap(), "Foo.java");
    }

    #[test]
    fn walk_root_skips_symlinked_subtrees() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("Foo.java"), "class Foo {}\n").unwrap();
        symlink(&real, dir.path().join("linked")).unwrap();

        let entries = walk_root(dir.path(), "java", "module-info.java");
        assert_eq!(entries.len(), 1);
    }
}
