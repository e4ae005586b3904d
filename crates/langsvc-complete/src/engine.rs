//! Dispatch on cursor context and candidate assembly.

use crate::catalog::ClassCatalogs;
use langsvc_facade::{CompilerFacade, Member, Scope, Type};
use langsvc_parse::{last_name, matches_partial_name, CompletionContext, MemberAccess};
use langsvc_symbols::{Candidate, ElementKind, ElementRef};

/// Bounds how many candidates one query returns.
#[derive(Debug, Clone, Copy)]
pub struct CompletionConfig {
    pub max_candidates: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self { max_candidates: 200 }
    }
}

/// Facts about the file being completed in, needed only for the two
/// top-level snippets (`package ...;` and `class Foo`).
#[derive(Debug, Clone, Copy)]
pub struct FileCompletionState<'a> {
    pub has_package_declaration: bool,
    pub has_type_declaration: bool,
    pub inferred_package_name: &'a str,
    pub file_stem: &'a str,
}

const TOP_LEVEL_KEYWORDS: &[&str] =
    &["package", "import", "class", "interface", "enum", "public", "abstract", "final"];
const CLASS_BODY_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "static", "final", "void", "class", "interface", "enum",
    "abstract", "extends", "implements",
];
const METHOD_BODY_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "return", "break", "continue", "new",
    "this", "super", "try", "catch", "finally", "throw", "null", "true", "false",
];

/// Collects candidates up to `max`, deduplicating by [`Candidate::dedup_key`]
/// and logging once when the cap is reached.
struct Assembler {
    seen: std::collections::HashSet<String>,
    out: Vec<Candidate>,
    max: usize,
    truncated: bool,
}

impl Assembler {
    fn new(max: usize) -> Self {
        Self { seen: std::collections::HashSet::new(), out: Vec::new(), max, truncated: false }
    }

    fn is_full(&self) -> bool {
        self.out.len() >= self.max
    }

    /// Adds `candidate` unless the cap is reached or it duplicates one
    /// already assembled. Returns whether the caller should keep assembling.
    fn push(&mut self, candidate: Candidate) -> bool {
        if self.is_full() {
            if !self.truncated {
                tracing::warn!(max = self.max, "completion candidate list truncated");
                self.truncated = true;
            }
            return false;
        }
        if self.seen.insert(candidate.dedup_key()) {
            self.out.push(candidate);
        }
        true
    }

    fn into_candidates(self) -> Vec<Candidate> {
        self.out
    }
}

fn element_candidate(member: &Member) -> Candidate {
    Candidate::Element(ElementRef::new(
        member.kind,
        &*member.simple_name,
        format!("{}.{}", member.owner, member.simple_name),
    ))
}

/// Dispatches on `ctx`'s syntactic position and assembles the matching
/// candidate list, in the order: case label, annotation name, import path,
/// member access/reference, identifier (default).
#[allow(clippy::too_many_arguments)]
pub fn complete(
    ctx: &CompletionContext,
    scope: Option<&Scope>,
    static_imports: &[Member],
    switched_type: Option<&Type>,
    facade: &dyn CompilerFacade,
    catalogs: &ClassCatalogs,
    config: &CompletionConfig,
    file: &FileCompletionState<'_>,
) -> Vec<Candidate> {
    let mut asm = Assembler::new(config.max_candidates);
    let mut dispatched = false;

    if ctx.flags.is_case_label {
        if let Some(ty) = switched_type {
            if let Some(qn) = ty.qualified_name() {
                if facade.get_type_element(qn).is_some() {
                    complete_case_label(ty, &ctx.prefix, facade, &mut asm);
                    dispatched = true;
                }
            }
        }
        // Switched type has no definition: fall through to identifier completion.
    } else if ctx.flags.is_annotation {
        complete_annotation(scope, &ctx.prefix, facade, &mut asm);
        dispatched = true;
    } else if ctx.flags.is_import {
        complete_import_path(ctx.member_access.as_ref(), &ctx.prefix, catalogs, &mut asm);
        dispatched = true;
    } else if let Some(access) = &ctx.member_access {
        complete_member_access(
            access,
            ctx.flags.is_member_reference,
            scope,
            facade,
            catalogs,
            &ctx.prefix,
            &mut asm,
        );
        dispatched = true;
    }

    if !dispatched {
        complete_identifier(ctx, scope, static_imports, facade, catalogs, file, &mut asm);
    }

    let mut candidates = asm.into_candidates();
    langsvc_symbols::sort_candidates(&mut candidates);
    candidates
}

fn complete_case_label(switched_type: &Type, prefix: &str, facade: &dyn CompilerFacade, asm: &mut Assembler) {
    for member in facade.get_all_members(switched_type) {
        if member.kind != ElementKind::EnumConstant || !matches_partial_name(&member.simple_name, prefix) {
            continue;
        }
        if !asm.push(element_candidate(&member)) {
            return;
        }
    }
}

fn complete_annotation(scope: Option<&Scope>, prefix: &str, facade: &dyn CompilerFacade, asm: &mut Assembler) {
    if matches_partial_name("Override", prefix) {
        if let Some(this_type) = scope.and_then(Scope::this_type) {
            'supers: for supertype in facade.transitive_supertypes(this_type) {
                for member in facade.get_all_members(&supertype) {
                    if member.kind != ElementKind::Method || member.is_static {
                        continue;
                    }
                    let params: String =
                        member.params.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
                    let body = format!(
                        "@Override\npublic {} {}({}) {{\n}}",
                        type_label(&member.ty),
                        member.simple_name,
                        params
                    );
                    if !asm.push(Candidate::Snippet { label: format!("@Override {}", member.simple_name), body }) {
                        break 'supers;
                    }
                }
            }
        } else if !asm.push(Candidate::Snippet { label: "Override".into(), body: "@Override".into() }) {
            return;
        }
    }

    if let Some(scope) = scope {
        for link in scope.chain() {
            for member in link.local_bindings() {
                if member.kind.is_type_like() && matches_partial_name(&member.simple_name, prefix) {
                    let qualified_name =
                        member.ty.qualified_name().unwrap_or(&*member.simple_name).to_string();
                    if !asm.push(Candidate::ClassName { qualified_name, imported: true }) {
                        return;
                    }
                }
            }
        }
    }
}

fn complete_import_path(
    member_access: Option<&MemberAccess>,
    prefix: &str,
    catalogs: &ClassCatalogs,
    asm: &mut Assembler,
) {
    let package_prefix = member_access.map(|a| a.receiver_text.clone()).unwrap_or_default();

    for segment in catalogs.next_segments(&package_prefix, prefix) {
        if !asm.push(Candidate::PackagePart { prefix: package_prefix.clone(), last: segment }) {
            return;
        }
    }

    let full_query = if package_prefix.is_empty() {
        prefix.to_string()
    } else {
        format!("{package_prefix}.{prefix}")
    };
    for (name, is_jdk) in catalogs.classes_matching_simple_name(last_name(&full_query)) {
        if most_name_matches(name, &package_prefix) {
            if !asm.push(Candidate::ClassName { qualified_name: name.to_string(), imported: !is_jdk }) {
                return;
            }
        }
    }
}

fn most_name_matches(qualified: &str, package_prefix: &str) -> bool {
    package_prefix.is_empty() || langsvc_parse::most_name(qualified) == package_prefix
}

enum Receiver {
    Package(String),
    Type(Type),
    Value(Type),
}

fn classify_receiver(receiver_text: &str, scope: Option<&Scope>, facade: &dyn CompilerFacade) -> Receiver {
    if !receiver_text.contains('.') {
        if let Some(scope) = scope {
            if let Some(member) = scope.resolve(receiver_text) {
                return Receiver::Value(member.ty.clone());
            }
        }
    }
    if let Some(ty) = facade.get_type_element(receiver_text) {
        return Receiver::Type(ty);
    }
    if let Some(ty) = facade.get_type_element(last_name(receiver_text)) {
        return Receiver::Type(ty);
    }
    Receiver::Package(receiver_text.to_string())
}

fn complete_member_access(
    access: &MemberAccess,
    is_reference: bool,
    scope: Option<&Scope>,
    facade: &dyn CompilerFacade,
    catalogs: &ClassCatalogs,
    prefix: &str,
    asm: &mut Assembler,
) {
    match classify_receiver(&access.receiver_text, scope, facade) {
        Receiver::Package(package) => {
            for segment in catalogs.next_segments(&package, prefix) {
                if !asm.push(Candidate::PackagePart { prefix: package.clone(), last: segment }) {
                    return;
                }
            }
            for (name, is_jdk) in catalogs.classes_matching_simple_name(prefix) {
                if langsvc_parse::most_name(name) == package
                    && !asm.push(Candidate::ClassName { qualified_name: name.to_string(), imported: !is_jdk })
                {
                    return;
                }
            }
        }
        Receiver::Type(ty) => {
            if is_reference {
                for member in facade.get_all_members(&ty) {
                    if member.kind == ElementKind::Method && matches_partial_name(&member.simple_name, prefix) {
                        if !asm.push(element_candidate(&member)) {
                            return;
                        }
                    }
                }
                asm.push(Candidate::Keyword("new".into()));
            } else {
                for member in facade.get_all_members(&ty) {
                    if member.is_static && matches_partial_name(&member.simple_name, prefix) {
                        if !asm.push(element_candidate(&member)) {
                            return;
                        }
                    }
                }
                for keyword in ["class", "this", "super"] {
                    if matches_partial_name(keyword, prefix) && !asm.push(Candidate::Keyword(keyword.into())) {
                        return;
                    }
                }
            }
        }
        Receiver::Value(ty) => {
            for supertype in facade.transitive_supertypes(&ty) {
                for member in facade.get_all_members(&supertype) {
                    if member.kind == ElementKind::Constructor || !matches_partial_name(&member.simple_name, prefix) {
                        continue;
                    }
                    if let Some(scope) = scope {
                        if !facade.is_accessible(scope, &member, Some(&ty)) {
                            continue;
                        }
                    }
                    if !asm.push(element_candidate(&member)) {
                        return;
                    }
                }
            }
            if matches!(ty, Type::Array(_)) {
                asm.push(Candidate::Keyword("length".into()));
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn complete_identifier(
    ctx: &CompletionContext,
    scope: Option<&Scope>,
    static_imports: &[Member],
    facade: &dyn CompilerFacade,
    catalogs: &ClassCatalogs,
    file: &FileCompletionState<'_>,
    asm: &mut Assembler,
) {
    let prefix = ctx.prefix.as_str();

    // (a) locals from enclosing scopes, this/super inlined respecting static context.
    if let Some(scope) = scope {
        for link in scope.chain() {
            for member in link.local_bindings() {
                if matches_partial_name(&member.simple_name, prefix) && !asm.push(element_candidate(member)) {
                    return;
                }
            }
            if !link.is_static_context() {
                if let Some(this_ty) = link.this_type() {
                    if matches_partial_name("this", prefix) {
                        if !asm.push(Candidate::Element(ElementRef::new(
                            ElementKind::Local,
                            "this",
                            this_ty.qualified_name().unwrap_or_default(),
                        ))) {
                            return;
                        }
                    }
                }
                if link.super_type().is_some() && matches_partial_name("super", prefix) {
                    if !asm.push(Candidate::Keyword("super".into())) {
                        return;
                    }
                }
            }
        }
    }

    // (b) static-import members.
    for member in static_imports {
        if matches_partial_name(&member.simple_name, prefix) && !asm.push(element_candidate(member)) {
            return;
        }
    }

    // (c) candidate class names, only when the prefix looks like a type name.
    if prefix.starts_with(|c: char| c.is_ascii_uppercase()) {
        for (name, is_jdk) in catalogs.classes_matching_simple_name(prefix) {
            if !asm.push(Candidate::ClassName { qualified_name: name.to_string(), imported: !is_jdk }) {
                return;
            }
        }
        for class in catalogs.sourcepath_matching_simple_name(prefix, file.inferred_package_name) {
            if !asm.push(Candidate::ClassName {
                qualified_name: class.qualified_name.clone(),
                imported: false,
            }) {
                return;
            }
        }
    }

    // (d) position-dependent keyword set.
    let keywords: &[&str] = if ctx.flags.inside_method {
        METHOD_BODY_KEYWORDS
    } else if ctx.flags.inside_class {
        CLASS_BODY_KEYWORDS
    } else {
        TOP_LEVEL_KEYWORDS
    };
    for keyword in keywords {
        if matches_partial_name(keyword, prefix) && !asm.push(Candidate::Keyword((*keyword).to_string())) {
            return;
        }
    }

    // (e) top-level file snippets.
    if !ctx.flags.inside_class {
        if !file.has_package_declaration {
            let body = format!("package {};", file.inferred_package_name);
            if !asm.push(Candidate::Snippet { label: "package".into(), body }) {
                return;
            }
        }
        if !file.has_type_declaration {
            let body = format!("class {} {{\n}}", file.file_stem);
            asm.push(Candidate::Snippet { label: format!("class {}", file.file_stem), body });
        }
    }
}

fn type_label(ty: &Type) -> String {
    match ty {
        Type::Void => "void".to_string(),
        Type::Primitive(name) => name.to_string(),
        Type::Array(component) => format!("{}[]", type_label(component)),
        Type::Class { qualified_name, .. } => last_name(qualified_name).to_string(),
        Type::TypeVariable(name) => name.to_string(),
    }
}
