//! An in-memory [`CompilerFacade`] double for tests that do not want to
//! depend on a real compiler. Every crate downstream of this one (Check,
//! Completion engine, the service orchestrator) exercises its logic against
//! this double rather than a concrete implementation, matching spec.md §1's
//! framing of the compiler as an external collaborator.

use crate::facade::{BatchSession, CompilerFacade, Diagnostic, FocusSession, ParseTree, Signature};
use crate::types::{Member, Scope, Type};
use langsvc_error::{LangSvcError, LangSvcResult};
use langsvc_position::Position;
use std::collections::HashMap;
use std::sync::Arc;

/// A hand-populated [`CompilerFacade`] for tests: callers register the
/// members, supertypes, and scopes a scenario needs, then drive the
/// crate under test through the trait exactly as a real compiler-backed
/// facade would be driven.
#[derive(Debug, Clone, Default)]
pub struct TestFacade {
    members_by_type: HashMap<String, Vec<Member>>,
    supertypes_by_type: HashMap<String, Vec<Type>>,
    scope_at: HashMap<(String, u32, u32), Scope>,
    type_elements: HashMap<String, Type>,
    assignable: HashMap<(String, String), bool>,
    signatures_at: HashMap<String, Vec<Signature>>,
    fixed_imports: HashMap<String, Vec<String>>,
    fail_facade_calls: bool,
}

impl TestFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(mut self, ty: &Type, members: Vec<Member>) -> Self {
        if let Some(name) = ty.qualified_name() {
            self.members_by_type.insert(name.to_string(), members);
        }
        self
    }

    pub fn with_supertypes(mut self, ty: &Type, supers: Vec<Type>) -> Self {
        if let Some(name) = ty.qualified_name() {
            self.supertypes_by_type.insert(name.to_string(), supers);
        }
        self
    }

    pub fn with_scope(mut self, uri: &str, line: u32, character: u32, scope: Scope) -> Self {
        self.scope_at.insert((uri.to_string(), line, character), scope);
        self
    }

    pub fn with_type_element(mut self, qualified_name: &str, ty: Type) -> Self {
        self.type_elements.insert(qualified_name.to_string(), ty);
        self
    }

    pub fn with_assignable(mut self, from: &Type, to: &Type, result: bool) -> Self {
        if let (Some(f), Some(t)) = (from.qualified_name(), to.qualified_name()) {
            self.assignable.insert((f.to_string(), t.to_string()), result);
        }
        self
    }

    /// Registers the signatures `compile_focus(uri, ..).signature_help(..)`
    /// should return for any call against `uri`.
    pub fn with_signatures(mut self, uri: &str, signatures: Vec<Signature>) -> Self {
        self.signatures_at.insert(uri.to_string(), signatures);
        self
    }

    /// Registers the qualified names `compile_batch(..).fix_imports(uri)`
    /// should return for `uri`.
    pub fn with_fixed_imports(mut self, uri: &str, names: Vec<String>) -> Self {
        self.fixed_imports.insert(uri.to_string(), names);
        self
    }

    /// Makes every facade call fail with [`LangSvcError::FacadeError`], to
    /// exercise the "Compiler Facade internal error" recovery path.
    pub fn failing() -> Self {
        Self { fail_facade_calls: true, ..Self::default() }
    }
}

struct TestFocusSession<'a> {
    facade: &'a TestFacade,
    uri: String,
}

impl FocusSession for TestFocusSession<'_> {
    fn scope(&self, _path: usize) -> Option<Scope> {
        self.facade.scope_at.values().next().cloned()
    }

    fn element(&self, line: u32, character: u32) -> Option<Member> {
        let scope = self.facade.scope_at.get(&(self.uri.clone(), line, character))?;
        scope.local_bindings().first().cloned()
    }

    fn type_mirror(&self, _path: usize) -> Type {
        Type::Void
    }

    fn signature_help(&self, _line: u32, _character: u32) -> Vec<Signature> {
        self.facade.signatures_at.get(&self.uri).cloned().unwrap_or_default()
    }

    fn complete_identifiers(&self, line: u32, character: u32, prefix: &str) -> Vec<Member> {
        let Some(scope) = self.facade.scope_at.get(&(self.uri.clone(), line, character)) else {
            return Vec::new();
        };
        scope
            .chain()
            .into_iter()
            .flat_map(Scope::local_bindings)
            .filter(|m| m.simple_name.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn complete_members(&self, _line: u32, _character: u32, _prefix: &str) -> Vec<Member> {
        Vec::new()
    }
}

struct TestBatchSession<'a> {
    facade: &'a TestFacade,
}

impl BatchSession for TestBatchSession<'_> {
    fn report_errors(&self) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn fix_imports(&self, uri: &str) -> Vec<String> {
        self.facade.fixed_imports.get(uri).cloned().unwrap_or_default()
    }
}

impl CompilerFacade for TestFacade {
    fn parse_file(&self, uri: &str) -> LangSvcResult<ParseTree> {
        if self.fail_facade_calls {
            return Err(LangSvcError::FacadeError { operation: "parseFile", message: "forced failure".into() });
        }
        Ok(ParseTree { uri: Arc::from(uri), source: Arc::from("") })
    }

    fn compile_focus(&self, uri: &str, _position: Position) -> LangSvcResult<Box<dyn FocusSession + '_>> {
        if self.fail_facade_calls {
            return Err(LangSvcError::FacadeError { operation: "compileFocus", message: "forced failure".into() });
        }
        Ok(Box::new(TestFocusSession { facade: self, uri: uri.to_string() }))
    }

    fn compile_batch(&self, _files: &[String]) -> LangSvcResult<Box<dyn BatchSession + '_>> {
        if self.fail_facade_calls {
            return Err(LangSvcError::FacadeError { operation: "compileBatch", message: "forced failure".into() });
        }
        Ok(Box::new(TestBatchSession { facade: self }))
    }

    fn get_all_members(&self, ty: &Type) -> Vec<Member> {
        ty.qualified_name()
            .and_then(|n| self.members_by_type.get(n))
            .cloned()
            .unwrap_or_default()
    }

    fn direct_supertypes(&self, ty: &Type) -> Vec<Type> {
        ty.qualified_name()
            .and_then(|n| self.supertypes_by_type.get(n))
            .cloned()
            .unwrap_or_default()
    }

    fn is_assignable(&self, from: &Type, to: &Type) -> bool {
        if from == to {
            return true;
        }
        match (from.qualified_name(), to.qualified_name()) {
            (Some(f), Some(t)) => self.assignable.get(&(f.to_string(), t.to_string())).copied().unwrap_or(false),
            _ => false,
        }
    }

    fn is_accessible(&self, _scope: &Scope, _element: &Member, _owner_type: Option<&Type>) -> bool {
        true
    }

    fn get_type_element(&self, qualified_name: &str) -> Option<Type> {
        self.type_elements.get(qualified_name).cloned()
    }
}
