//! The FileStore: workspace roots, the on-disk source index, and in-memory
//! versioned contents for open documents, behind a single lock.

use crate::active_document::{ActiveDocument, DocumentChange};
use crate::index::{self, SourceIndexEntry};
use crate::roots;
use langsvc_error::{LangSvcError, LangSvcResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Target-language file-shape knobs, kept separate from the engine crates
/// so the workspace itself stays agnostic about what "a source file" means.
/// Defaults match a Java project layout.
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    pub source_extension: String,
    pub module_descriptor_name: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self { source_extension: "java".into(), module_descriptor_name: "module-info.java".into() }
    }
}

struct State {
    config: WorkspaceConfig,
    roots: Vec<PathBuf>,
    index: HashMap<PathBuf, SourceIndexEntry>,
    active: HashMap<String, ActiveDocument>,
}

/// Workspace roots, the on-disk source index, and in-memory document
/// contents, guarded by a single reader-writer lock.
pub struct Workspace {
    state: RwLock<State>,
}

impl Workspace {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self { state: RwLock::new(State { config, roots: Vec::new(), index: HashMap::new(), active: HashMap::new() }) }
    }

    /// Replaces the set of workspace roots. Entries strictly beneath a
    /// removed root are dropped before the new roots are walked, so the
    /// index never holds stale entries from a root the caller no longer
    /// owns.
    pub fn set_workspace_roots(&self, new_roots: Vec<PathBuf>) {
        let mut state = self.state.write();
        state.index.retain(|path, _| new_roots.iter().any(|r| path.starts_with(r)));

        let (source_extension, module_descriptor_name) =
            (state.config.source_extension.clone(), state.config.module_descriptor_name.clone());
        for root in &new_roots {
            for entry in index::walk_root(root, &source_extension, &module_descriptor_name) {
                state.index.insert(entry.path.clone(), entry);
            }
        }
        state.roots = new_roots;
        debug!(root_count = state.roots.len(), entry_count = state.index.len(), "workspace roots updated");
    }

    /// All indexed source file paths.
    pub fn all(&self) -> Vec<PathBuf> {
        self.state.read().index.keys().cloned().collect()
    }

    /// Indexed source file paths whose package matches `package_name`.
    pub fn list(&self, package_name: &str) -> Vec<PathBuf> {
        self.state.read().index.values().filter(|e| e.package_name == package_name).map(|e| e.path.clone()).collect()
    }

    /// Source roots inferred from the current index.
    pub fn source_roots(&self) -> Vec<PathBuf> {
        let state = self.state.read();
        roots::infer_source_roots(&state.index.values().cloned().collect::<Vec<_>>())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.state.read().index.contains_key(path)
    }

    /// Last-modified instant of `path`: the in-memory value for an open
    /// document, else the on-disk index entry's value.
    pub fn modified(&self, path: &Path) -> Option<SystemTime> {
        let state = self.state.read();
        if let Some(doc) = state.active.get(&uri_key_for(path)) {
            return Some(doc.modified);
        }
        state.index.get(path).map(|e| e.modified)
    }

    pub fn package_name(&self, path: &Path) -> Option<String> {
        self.state.read().index.get(path).map(|e| e.package_name.clone())
    }

    /// Suggests a package name for a new file under `dir`, withholding the
    /// suggestion when every indexed sibling has an empty package.
    pub fn suggested_package_name(&self, dir: &Path) -> Option<String> {
        let state = self.state.read();
        let siblings: Vec<String> =
            state.index.values().filter(|e| e.path.parent() == Some(dir)).map(|e| e.package_name.clone()).collect();
        let source_roots = roots::infer_source_roots(&state.index.values().cloned().collect::<Vec<_>>());
        roots::suggested_package_name(dir, &siblings, &source_roots)
    }

    /// Registers a document as open with the given initial text and
    /// version, replacing any prior in-memory state for the same URI.
    pub fn open(&self, uri: &str, text: String, version: i32) {
        let mut state = self.state.write();
        state.active.insert(uri.to_string(), ActiveDocument::new(text, version));
    }

    /// Applies an ordered list of edits to an open document. A version not
    /// greater than the document's stored version — including a change
    /// against a URI that was never opened — is a version conflict: logged
    /// and silently dropped, never surfaced to the caller. Returns whether
    /// the edits were applied.
    pub fn change(&self, uri: &str, edits: Vec<DocumentChange>, version: i32) -> bool {
        let mut state = self.state.write();
        let Some(doc) = state.active.get_mut(uri) else {
            warn!(uri, got = version, "dropping change for a document that was never opened");
            return false;
        };
        let current = doc.version;
        let applied = doc.apply_change(&edits, version);
        if !applied {
            warn!(uri, got = version, current, "dropping stale document change");
        }
        applied
    }

    /// Forgets a document's in-memory state; subsequent reads fall back to
    /// on-disk contents.
    pub fn close(&self, uri: &str) {
        self.state.write().active.remove(uri);
    }

    /// Resolves a file's current contents: the in-memory text for an open
    /// document, else a fresh read from disk. A successful disk read
    /// lazily refreshes the index entry's modification instant.
    pub fn contents(&self, uri: &str, path: &Path) -> LangSvcResult<String> {
        {
            let state = self.state.read();
            if let Some(doc) = state.active.get(uri) {
                return Ok(doc.text.clone());
            }
        }
        let text = fs::read_to_string(path).map_err(|source| LangSvcError::Io { path: path.to_path_buf(), source })?;
        if let Ok(metadata) = fs::metadata(path)
            && let Ok(modified) = metadata.modified()
        {
            let mut state = self.state.write();
            let (source_extension, module_descriptor_name) =
                (state.config.source_extension.clone(), state.config.module_descriptor_name.clone());
            state
                .index
                .entry(path.to_path_buf())
                .and_modify(|e| e.modified = modified)
                .or_insert_with(|| {
                    let package_name = index::walk_root(path, &source_extension, &module_descriptor_name)
                        .into_iter()
                        .next()
                        .map(|e| e.package_name)
                        .unwrap_or_default();
                    SourceIndexEntry { path: path.to_path_buf(), modified, package_name }
                });
        }
        Ok(text)
    }

    /// A byte stream over a file's current contents, resolved by the same
    /// rule as [`Workspace::contents`].
    pub fn input_stream(&self, uri: &str, path: &Path) -> LangSvcResult<Cursor<Vec<u8>>> {
        Ok(Cursor::new(self.contents(uri, path)?.into_bytes()))
    }

    /// A line-buffered reader over a file's current contents, resolved by
    /// the same rule as [`Workspace::contents`].
    pub fn buffered_reader(&self, uri: &str, path: &Path) -> LangSvcResult<BufReader<Cursor<Vec<u8>>>> {
        Ok(BufReader::new(self.input_stream(uri, path)?))
    }

    /// Finds the indexed file declaring `qualified_name`, by matching its
    /// package against the file's directory-inferred package and its
    /// file stem against the name's last segment.
    pub fn find_declaring_file(&self, qualified_name: &str) -> Option<PathBuf> {
        let package = langsvc_parse::most_name(qualified_name);
        let simple = langsvc_parse::last_name(qualified_name);
        let state = self.state.read();
        state
            .index
            .values()
            .find(|e| e.package_name == package && e.path.file_stem().and_then(|s| s.to_str()) == Some(simple))
            .map(|e| e.path.clone())
    }
}

fn uri_key_for(path: &Path) -> String {
    langsvc_uri::fs_path_to_uri(path).unwrap_or_else(|_| path.display().to_string())
}
