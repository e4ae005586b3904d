//! The raw, unbounded expression-tree shape a real parser would hand back.
//! Used only to find where Check's safe grammar runs out; nothing in this
//! module evaluates a type.

use langsvc_position::ByteSpan;
use tracing::debug;

/// Every expression kind the target grammar can produce, including forms
/// outside Check's supported subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawExprKind {
    Identifier,
    MemberSelect,
    MethodInvocation,
    ArrayAccess,
    Conditional,
    Parenthesized,
    Lambda,
    Cast,
    InstanceOf,
    Binary,
    Assignment,
    New,
    Literal,
}

/// One node of a full, unpruned expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExpr {
    pub kind: RawExprKind,
    pub span: ByteSpan,
    pub children: Vec<RawExpr>,
}

impl RawExpr {
    pub fn leaf(kind: RawExprKind, span: ByteSpan) -> Self {
        Self { kind, span, children: Vec::new() }
    }

    pub fn with_children(kind: RawExprKind, span: ByteSpan, children: Vec<RawExpr>) -> Self {
        Self { kind, span, children }
    }
}

/// Whether `kind` is one of the forms Check can evaluate directly.
pub const fn can_check(kind: RawExprKind) -> bool {
    matches!(
        kind,
        RawExprKind::Identifier
            | RawExprKind::MemberSelect
            | RawExprKind::MethodInvocation
            | RawExprKind::ArrayAccess
            | RawExprKind::Conditional
            | RawExprKind::Parenthesized
    )
}

/// Descends from `root` toward the node enclosing `cursor`, and returns the
/// deepest node on that path whose kind [`can_check`] rejects — the subtree
/// the caller must re-enter full compilation for and supply back as a
/// retained pair.
///
/// Descent never goes past `max_depth` levels, bounding the work a single
/// pathological expression can trigger during an interactive query.
pub fn cant_check(root: &RawExpr, cursor: usize, max_depth: usize) -> Option<&RawExpr> {
    let mut deepest_unsupported: Option<&RawExpr> = None;
    let mut node = root;
    let mut depth = 0;
    loop {
        if !can_check(node.kind) {
            deepest_unsupported = Some(node);
        }
        if depth >= max_depth {
            debug!(max_depth, "cant_check depth guard reached before finding a checkable boundary");
            break;
        }
        let Some(child) = node.children.iter().find(|c| c.span.contains(cursor)) else {
            break;
        };
        node = child;
        depth += 1;
    }
    deepest_unsupported
}
