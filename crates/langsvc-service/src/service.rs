//! Wires `FileStore` → Parser → Pruner → Compiler Facade → Check →
//! Completion engine into the query pipeline spec.md §2 describes.

use crate::cancellation::CancellationToken;
use crate::config::ServiceConfig;
use langsvc_complete::{ClassCatalogs, CompletionConfig, FileCompletionState};
use langsvc_error::{LangSvcError, LangSvcResult};
use langsvc_facade::{CompilerFacade, Diagnostic, Member, Scope, Signature, Type};
use langsvc_position::{LineIndex, Position};
use langsvc_source::{DocumentChange, Workspace, WorkspaceConfig};
use langsvc_symbols::Candidate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Bounds how deep [`Service::cant_check`] descends before giving up,
/// guarding against pathological expressions during an interactive query.
const DEFAULT_CHECK_MAX_DEPTH: usize = 64;

/// The long-lived value holding `FileStore` state plus the Compiler Facade
/// and class catalogs, constructed once at startup and threaded by
/// reference into every query.
pub struct Service {
    workspace: Workspace,
    facade: Arc<dyn CompilerFacade>,
    catalogs: ClassCatalogs,
    completion_config: CompletionConfig,
    check_max_depth: usize,
    quiet: bool,
}

struct DerivedFileState {
    package_name: String,
    file_stem: String,
    has_package_declaration: bool,
    has_type_declaration: bool,
}

fn derive_file_state(text: &str, path: &Path) -> DerivedFileState {
    let package_name = langsvc_parse::package_name(text);
    let file_stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("").to_string();
    let has_type_declaration = langsvc_parse::contains_class(text, &file_stem);
    DerivedFileState {
        has_package_declaration: !package_name.is_empty(),
        has_type_declaration,
        package_name,
        file_stem,
    }
}

fn resolve_path(uri: &str) -> LangSvcResult<PathBuf> {
    langsvc_uri::uri_to_fs_path(uri)
        .ok_or_else(|| LangSvcError::FacadeError { operation: "resolve_uri", message: uri.to_string() })
}

impl Service {
    pub fn new(config: ServiceConfig, facade: Arc<dyn CompilerFacade>, catalogs: ClassCatalogs) -> Self {
        let workspace = Workspace::new(WorkspaceConfig::default());
        workspace.set_workspace_roots(config.workspace_roots);
        Self {
            workspace,
            facade,
            catalogs,
            completion_config: CompletionConfig::default(),
            check_max_depth: DEFAULT_CHECK_MAX_DEPTH,
            quiet: config.quiet,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn open(&self, uri: &str, text: String, version: i32) {
        self.workspace.open(uri, text, version);
    }

    /// Applies an ordered list of edits to an open document. A stale or
    /// out-of-order version is a version conflict: logged and silently
    /// dropped by the FileStore, never surfaced here as an error. Returns
    /// whether the edits were applied.
    pub fn change(&self, uri: &str, edits: Vec<DocumentChange>, version: i32) -> bool {
        self.workspace.change(uri, edits, version)
    }

    pub fn close(&self, uri: &str) {
        self.workspace.close(uri);
    }

    /// Re-derives the type of an expression the full compiler could not
    /// reach, given a Scope the caller already has in hand.
    pub fn check(&self, expr: &langsvc_check::CheckExpr, scope: &Scope, retained: Option<&langsvc_check::Retained>) -> Type {
        langsvc_check::check(expr, scope, self.facade.as_ref(), retained)
    }

    /// Finds the deepest unsupported subtree on the cursor's path, bounded
    /// by this service's configured depth guard.
    pub fn cant_check<'a>(&self, root: &'a langsvc_check::RawExpr, cursor: usize) -> Option<&'a langsvc_check::RawExpr> {
        langsvc_check::cant_check(root, cursor, self.check_max_depth)
    }

    /// Produces the pruned source a Compiler Facade would typecheck for a
    /// focused query at `(line, character)`.
    pub fn pruned_source(&self, uri: &str, line: u32, character: u32) -> LangSvcResult<String> {
        let path = resolve_path(uri)?;
        let text = self.workspace.contents(uri, &path)?;
        let index = LineIndex::new(&text);
        let offset = index.position_to_offset(&text, Position::new(line, character));
        Ok(langsvc_prune::prune(&text, offset))
    }

    pub fn find_declaring_file(&self, qualified_name: &str) -> Option<PathBuf> {
        self.workspace.find_declaring_file(qualified_name)
    }

    /// Runs the full completion pipeline for a cursor position: resolve
    /// content, compute completion context, compile a focused scope
    /// through the Compiler Facade (errors there are caught and logged,
    /// never fatal), and dispatch to the completion engine.
    pub fn complete_at(
        &self,
        uri: &str,
        line: u32,
        character: u32,
        static_imports: &[Member],
        switched_type: Option<&Type>,
        token: &CancellationToken,
    ) -> LangSvcResult<Vec<Candidate>> {
        if token.is_cancelled() {
            return Err(LangSvcError::Cancelled);
        }
        let path = resolve_path(uri)?;
        let text = self.workspace.contents(uri, &path)?;
        let index = LineIndex::new(&text);
        let position = Position::new(line, character);
        let offset = index.position_to_offset(&text, position);
        let ctx = langsvc_parse::completion_context(&text, offset);

        if token.is_cancelled() {
            return Err(LangSvcError::Cancelled);
        }

        let scope = match self.facade.compile_focus(uri, position) {
            Ok(focus) => focus.scope(offset),
            Err(err) => {
                if !self.quiet {
                    warn!(uri, error = %err, "compile_focus failed, completing without a scope");
                }
                None
            }
        };

        let derived = derive_file_state(&text, &path);
        let file = FileCompletionState {
            has_package_declaration: derived.has_package_declaration,
            has_type_declaration: derived.has_type_declaration,
            inferred_package_name: &derived.package_name,
            file_stem: &derived.file_stem,
        };

        Ok(langsvc_complete::complete(
            &ctx,
            scope.as_ref(),
            static_imports,
            switched_type,
            self.facade.as_ref(),
            &self.catalogs,
            &self.completion_config,
            &file,
        ))
    }

    pub fn signature_help(&self, uri: &str, line: u32, character: u32) -> LangSvcResult<Vec<Signature>> {
        match self.facade.compile_focus(uri, Position::new(line, character)) {
            Ok(focus) => Ok(focus.signature_help(line, character)),
            Err(err) => {
                if !self.quiet {
                    warn!(uri, error = %err, "compile_focus failed for signature help");
                }
                Ok(Vec::new())
            }
        }
    }

    pub fn report_errors(&self, files: &[String]) -> LangSvcResult<Vec<Diagnostic>> {
        match self.facade.compile_batch(files) {
            Ok(batch) => Ok(batch.report_errors()),
            Err(err) => {
                if !self.quiet {
                    warn!(error = %err, "compile_batch failed while reporting errors");
                }
                Ok(Vec::new())
            }
        }
    }

    pub fn fix_imports(&self, uri: &str) -> LangSvcResult<Vec<String>> {
        match self.facade.compile_batch(std::slice::from_ref(&uri.to_string())) {
            Ok(batch) => Ok(batch.fix_imports(uri)),
            Err(err) => {
                if !self.quiet {
                    warn!(uri, error = %err, "compile_batch failed while fixing imports");
                }
                Ok(Vec::new())
            }
        }
    }
}
