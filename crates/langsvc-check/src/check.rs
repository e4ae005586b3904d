//! Evaluates the bounded expression grammar [`crate::can_check`] accepts,
//! given a [`Scope`] and the [`CompilerFacade`] for member lookup, overload
//! resolution, and assignability.

use langsvc_facade::{CompilerFacade, Member, Scope, Type};
use langsvc_symbols::ElementKind;

/// One node of the bounded grammar Check evaluates. `path` is the same kind
/// of opaque position handle [`langsvc_facade::FocusSession::scope`] uses,
/// so a retained pair computed elsewhere can be matched back to the node it
/// replaces.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckExpr {
    Identifier { name: String, path: usize },
    MemberSelect { receiver: Box<CheckExpr>, field: String, path: usize },
    MethodInvocation {
        receiver: Option<Box<CheckExpr>>,
        method: String,
        args: Vec<CheckExpr>,
        path: usize,
    },
    ArrayAccess { array: Box<CheckExpr>, index: Box<CheckExpr>, path: usize },
    Conditional {
        cond: Box<CheckExpr>,
        then_branch: Box<CheckExpr>,
        else_branch: Box<CheckExpr>,
        path: usize,
    },
    Parenthesized { inner: Box<CheckExpr>, path: usize },
}

impl CheckExpr {
    pub fn path(&self) -> usize {
        match self {
            CheckExpr::Identifier { path, .. }
            | CheckExpr::MemberSelect { path, .. }
            | CheckExpr::MethodInvocation { path, .. }
            | CheckExpr::ArrayAccess { path, .. }
            | CheckExpr::Conditional { path, .. }
            | CheckExpr::Parenthesized { path, .. } => *path,
        }
    }
}

/// A previously-computed `(node path, type)` pair supplied by the caller
/// when it re-entered full compilation for a subtree [`crate::cant_check`]
/// rejected.
pub type Retained = (usize, Type);

/// Evaluates `expr` in `scope`, consulting `facade` for member lookup,
/// overload resolution, and assignability. If `retained` names the node
/// currently being evaluated, its type is returned without recursing
/// further into that node.
pub fn check(
    expr: &CheckExpr,
    scope: &Scope,
    facade: &dyn CompilerFacade,
    retained: Option<&Retained>,
) -> Type {
    if let Some((path, ty)) = retained {
        if *path == expr.path() {
            return ty.clone();
        }
    }

    match expr {
        CheckExpr::Identifier { name, .. } => {
            scope.resolve(name).map(|m| m.ty.clone()).unwrap_or(Type::Void)
        }

        CheckExpr::Parenthesized { inner, .. } => check(inner, scope, facade, retained),

        CheckExpr::MemberSelect { receiver, field, .. } => {
            let receiver_ty = check(receiver, scope, facade, retained);
            select_member(&receiver_ty, field, facade).map(|m| m.ty.clone()).unwrap_or(Type::Void)
        }

        CheckExpr::MethodInvocation { receiver, method, args, .. } => {
            let overloads = match receiver {
                Some(recv) => {
                    let receiver_ty = check(recv, scope, facade, retained);
                    members_named(&receiver_ty, method, facade)
                }
                None => scope
                    .chain()
                    .into_iter()
                    .flat_map(Scope::local_bindings)
                    .filter(|m| m.kind == ElementKind::Method && &*m.simple_name == method.as_str())
                    .cloned()
                    .collect(),
            };

            if overloads.len() == 1 {
                return overloads[0].ty.clone();
            }

            let arg_types: Vec<Type> = args.iter().map(|a| check(a, scope, facade, retained)).collect();
            overloads
                .iter()
                .find(|m| {
                    m.arity_matches(arg_types.len())
                        && arg_types.iter().zip(&m.params).all(|(a, p)| facade.is_assignable(a, p))
                })
                .map(|m| m.ty.clone())
                .unwrap_or(Type::Void)
        }

        CheckExpr::ArrayAccess { array, .. } => {
            let array_ty = check(array, scope, facade, retained);
            match array_ty {
                Type::Array(component) => *component,
                _ => Type::Void,
            }
        }

        // Tie-break by convention: the true branch's type stands in for the
        // whole conditional (see the design note on conditional-type tie-break).
        CheckExpr::Conditional { then_branch, .. } => check(then_branch, scope, facade, retained),
    }
}

fn members_named(ty: &Type, name: &str, facade: &dyn CompilerFacade) -> Vec<Member> {
    facade.get_all_members(ty).into_iter().filter(|m| &*m.simple_name == name).collect()
}

fn select_member(ty: &Type, name: &str, facade: &dyn CompilerFacade) -> Option<Member> {
    if !matches!(ty, Type::Class { .. }) {
        return None;
    }
    let mut candidates = members_named(ty, name, facade);
    candidates.sort_by_key(|m| !m.kind.is_non_method());
    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use langsvc_facade::TestFacade;

    fn ident(name: &str, path: usize) -> CheckExpr {
        CheckExpr::Identifier { name: name.into(), path }
    }

    #[test]
    fn identifier_resolves_via_scope() {
        let scope = Scope::new().with_binding(Member::local("count", Type::class("int")));
        let facade = TestFacade::new();
        let ty = check(&ident("count", 0), &scope, &facade, None);
        assert_eq!(ty, Type::class("int"));
    }

    #[test]
    fn identifier_falls_back_to_void_when_unresolved() {
        let scope = Scope::new();
        let facade = TestFacade::new();
        let ty = check(&ident("missing", 0), &scope, &facade, None);
        assert!(ty.is_void());
    }

    #[test]
    fn member_select_looks_up_field_on_receiver_type() {
        let foo = Type::class("pkg.Foo");
        let scope = Scope::new().with_binding(Member::local("f", foo.clone()));
        let facade = TestFacade::new()
            .with_members(&foo, vec![Member::field("count", "pkg.Foo", Type::class("int"), false)]);
        let expr = CheckExpr::MemberSelect {
            receiver: Box::new(ident("f", 0)),
            field: "count".into(),
            path: 1,
        };
        let ty = check(&expr, &scope, &facade, None);
        assert_eq!(ty, Type::class("int"));
    }

    #[test]
    fn method_invocation_with_single_overload_returns_unconditionally() {
        let foo = Type::class("pkg.Foo");
        let scope = Scope::new().with_binding(Member::local("f", foo.clone()));
        let facade = TestFacade::new().with_members(
            &foo,
            vec![Member::method("size", "pkg.Foo", vec![], Type::class("int"), false)],
        );
        let expr = CheckExpr::MethodInvocation {
            receiver: Some(Box::new(ident("f", 0))),
            method: "size".into(),
            args: vec![],
            path: 1,
        };
        let ty = check(&expr, &scope, &facade, None);
        assert_eq!(ty, Type::class("int"));
    }

    #[test]
    fn method_invocation_picks_overload_by_assignable_arity() {
        let foo = Type::class("pkg.Foo");
        let scope = Scope::new()
            .with_binding(Member::local("f", foo.clone()))
            .with_binding(Member::local("n", Type::class("int")));
        let facade = TestFacade::new()
            .with_members(
                &foo,
                vec![
                    Member::method("at", "pkg.Foo", vec![Type::class("String")], Type::class("char"), false),
                    Member::method("at", "pkg.Foo", vec![Type::class("int")], Type::class("byte"), false),
                ],
            )
            .with_assignable(&Type::class("int"), &Type::class("int"), true);
        let expr = CheckExpr::MethodInvocation {
            receiver: Some(Box::new(ident("f", 0))),
            method: "at".into(),
            args: vec![ident("n", 2)],
            path: 1,
        };
        let ty = check(&expr, &scope, &facade, None);
        assert_eq!(ty, Type::class("byte"));
    }

    #[test]
    fn array_access_unwraps_component_type() {
        let arr = Type::array(Type::class("int"));
        let scope = Scope::new().with_binding(Member::local("xs", arr));
        let facade = TestFacade::new();
        let expr = CheckExpr::ArrayAccess {
            array: Box::new(ident("xs", 0)),
            index: Box::new(ident("i", 2)),
            path: 1,
        };
        let ty = check(&expr, &scope, &facade, None);
        assert_eq!(ty, Type::class("int"));
    }

    #[test]
    fn conditional_returns_true_branch_type() {
        let scope = Scope::new()
            .with_binding(Member::local("a", Type::class("int")))
            .with_binding(Member::local("b", Type::class("String")));
        let facade = TestFacade::new();
        let expr = CheckExpr::Conditional {
            cond: Box::new(ident("cond", 3)),
            then_branch: Box::new(ident("a", 0)),
            else_branch: Box::new(ident("b", 1)),
            path: 2,
        };
        let ty = check(&expr, &scope, &facade, None);
        assert_eq!(ty, Type::class("int"));
    }

    #[test]
    fn parenthesized_passes_through() {
        let scope = Scope::new().with_binding(Member::local("a", Type::class("int")));
        let facade = TestFacade::new();
        let expr = CheckExpr::Parenthesized { inner: Box::new(ident("a", 0)), path: 1 };
        let ty = check(&expr, &scope, &facade, None);
        assert_eq!(ty, Type::class("int"));
    }

    #[test]
    fn retained_pair_short_circuits_recursion_into_that_node() {
        let scope = Scope::new();
        let facade = TestFacade::new();
        let expr = CheckExpr::MemberSelect {
            receiver: Box::new(ident("unresolvable", 0)),
            field: "x".into(),
            path: 1,
        };
        let retained: Retained = (0, Type::class("pkg.Known"));
        // Without the retained pair, `unresolvable` is void and member
        // lookup on void fails, yielding void overall.
        assert!(check(&expr, &scope, &facade, None).is_void());
        // The retained pair for path 0 only changes what the receiver
        // resolves to; member lookup on pkg.Known still needs a registered
        // member, so it remains void here, but a registration proves the
        // retained value was actually consulted.
        let facade_with_member = TestFacade::new().with_members(
            &Type::class("pkg.Known"),
            vec![Member::field("x", "pkg.Known", Type::class("boolean"), false)],
        );
        let ty = check(&expr, &scope, &facade_with_member, Some(&retained));
        assert_eq!(ty, Type::class("boolean"));
    }
}
