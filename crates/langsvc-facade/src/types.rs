//! Nominal types, scopes, and members — the vocabulary the partial checker
//! and completion engine use to talk to the Compiler Facade.

use std::sync::Arc;

/// A nominal type in the target language's type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// The sentinel returned when an expression's type cannot be
    /// determined. Callers already treat this as an absence (see
    /// SPEC_FULL.md §9, "nullable sentinel types"); prefer
    /// [`Type::is_void`] over matching this variant directly.
    Void,
    /// A primitive type (`int`, `boolean`, ...).
    Primitive(Arc<str>),
    /// An array with the given component type.
    Array(Box<Type>),
    /// A class, interface, enum, or annotation type, with any generic type
    /// arguments supplied at this use site.
    Class { qualified_name: Arc<str>, type_args: Vec<Type> },
    /// An unresolved generic type variable.
    TypeVariable(Arc<str>),
}

impl Type {
    pub fn class(qualified_name: impl Into<Arc<str>>) -> Self {
        Type::Class { qualified_name: qualified_name.into(), type_args: Vec::new() }
    }

    pub fn array(component: Type) -> Self {
        Type::Array(Box::new(component))
    }

    pub const fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// The qualified name of this type's erasure, if it has one (classes
    /// and arrays-of-classes only; primitives and type variables don't).
    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            Type::Class { qualified_name, .. } => Some(qualified_name),
            _ => None,
        }
    }
}

/// One member of a type or scope: a field, method, constructor, local, or
/// enum constant, with enough shape for the partial checker and completion
/// engine to reason about it without re-resolving through the facade.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub kind: langsvc_symbols::ElementKind,
    pub simple_name: Arc<str>,
    /// Qualified name of the declaring type, or `""` for locals and
    /// parameters.
    pub owner: Arc<str>,
    /// The member's own type: a field's declared type, a method's return
    /// type, a local's inferred/declared type.
    pub ty: Type,
    pub is_static: bool,
    /// Parameter types, non-empty only for [`langsvc_symbols::ElementKind::Method`]
    /// and [`langsvc_symbols::ElementKind::Constructor`].
    pub params: Vec<Type>,
}

impl Member {
    pub fn local(name: impl Into<Arc<str>>, ty: Type) -> Self {
        Self {
            kind: langsvc_symbols::ElementKind::Local,
            simple_name: name.into(),
            owner: Arc::from(""),
            ty,
            is_static: false,
            params: Vec::new(),
        }
    }

    pub fn field(name: impl Into<Arc<str>>, owner: impl Into<Arc<str>>, ty: Type, is_static: bool) -> Self {
        Self {
            kind: langsvc_symbols::ElementKind::Field,
            simple_name: name.into(),
            owner: owner.into(),
            ty,
            is_static,
            params: Vec::new(),
        }
    }

    pub fn method(
        name: impl Into<Arc<str>>,
        owner: impl Into<Arc<str>>,
        params: Vec<Type>,
        returns: Type,
        is_static: bool,
    ) -> Self {
        Self {
            kind: langsvc_symbols::ElementKind::Method,
            simple_name: name.into(),
            owner: owner.into(),
            ty: returns,
            is_static,
            params,
        }
    }

    /// Whether an argument list of this arity could match this member
    /// (method/constructor overload-arity pre-filter).
    pub fn arity_matches(&self, arg_count: usize) -> bool {
        self.params.len() == arg_count
    }
}

/// An ordered chain of lexical environments at a program point.
///
/// Each link carries its own local bindings and, optionally, a `this`/
/// `super` pair for instance context; [`Scope::parent`] walks outward
/// toward the enclosing class and then the compilation unit.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: Vec<Member>,
    this_type: Option<Type>,
    super_type: Option<Type>,
    is_static_context: bool,
    parent: Option<Box<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binding(mut self, member: Member) -> Self {
        self.bindings.push(member);
        self
    }

    pub fn with_this(mut self, this_type: Type, super_type: Option<Type>) -> Self {
        self.this_type = Some(this_type);
        self.super_type = super_type;
        self
    }

    pub fn with_static_context(mut self, is_static: bool) -> Self {
        self.is_static_context = is_static;
        self
    }

    pub fn with_parent(mut self, parent: Scope) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn this_type(&self) -> Option<&Type> {
        self.this_type.as_ref()
    }

    pub fn super_type(&self) -> Option<&Type> {
        self.super_type.as_ref()
    }

    pub fn is_static_context(&self) -> bool {
        self.is_static_context
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.parent.as_deref()
    }

    /// Bindings declared directly in this link of the chain (not including
    /// ancestors).
    pub fn local_bindings(&self) -> &[Member] {
        &self.bindings
    }

    /// Finds the first enclosing scope containing a local element named
    /// `name`, preferring non-method bindings at each link before moving
    /// outward — this is the rule the partial checker's Identifier case
    /// uses.
    pub fn resolve(&self, name: &str) -> Option<&Member> {
        let mut scope = Some(self);
        while let Some(s) = scope {
            let mut candidate: Option<&Member> = None;
            for binding in &s.bindings {
                if &*binding.simple_name != name {
                    continue;
                }
                if binding.kind.is_non_method() {
                    return Some(binding);
                }
                candidate.get_or_insert(binding);
            }
            if candidate.is_some() {
                return candidate;
            }
            scope = s.parent.as_deref();
        }
        None
    }

    /// All scopes from this one outward, innermost first — used by the
    /// completion engine to assemble locals across the enclosing chain.
    pub fn chain(&self) -> Vec<&Scope> {
        let mut out = Vec::new();
        let mut scope = Some(self);
        while let Some(s) = scope {
            out.push(s);
            scope = s.parent.as_deref();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use langsvc_symbols::ElementKind;

    #[test]
    fn resolve_prefers_non_method_over_method_in_same_scope() {
        let scope = Scope::new()
            .with_binding(Member::method("value", "Foo", vec![], Type::class("Foo"), false))
            .with_binding(Member::local("value", Type::class("int")));
        let found = scope.resolve("value").unwrap();
        assert_eq!(found.kind, ElementKind::Local);
    }

    #[test]
    fn resolve_walks_outward_to_parent_scope() {
        let outer = Scope::new().with_binding(Member::local("outerVar", Type::class("int")));
        let inner = Scope::new().with_parent(outer);
        assert!(inner.resolve("outerVar").is_some());
        assert!(inner.resolve("missing").is_none());
    }

    #[test]
    fn chain_lists_innermost_first() {
        let outer = Scope::new().with_binding(Member::local("a", Type::class("int")));
        let inner = Scope::new().with_binding(Member::local("b", Type::class("int"))).with_parent(outer);
        let chain = inner.chain();
        assert_eq!(chain.len(), 2);
        assert!(chain[0].resolve("b").is_some() && chain[0].local_bindings().iter().any(|m| &*m.simple_name == "b"));
    }
}
