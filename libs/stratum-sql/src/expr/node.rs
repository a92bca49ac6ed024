use crate::compile_error::CompileError;

use super::types::{ExprType, ScalarKind};
use super::value::{CapturedValue, SqlValue};

/// A typed predicate/value expression over an entity's properties. The input
/// grammar is a closed set of tagged nodes so that the normalizer and the
/// emitter can match exhaustively; adding or removing a supported operator is
/// a compile-time-checked change.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(SqlValue),
    Member(MemberAccess),
    Unary(UnaryOperator, Box<Expr>),
    Binary(BinaryOperator, Box<Expr>, Box<Expr>),
    Call(MethodCall),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    And,
    Or,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    BitAnd,
    BitOr,
    BitXor,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOperator {
    Not,
    Negate,
    /// A narrowing/widening marker; emission is transparent.
    Convert(ExprType),
}

/// Where a member-access chain is anchored.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberRoot {
    /// The predicate's subject row; resolves against the column catalog.
    Subject,
    /// A compile-time-constant value; the chain folds during normalization.
    Captured(CapturedValue),
}

/// How a nullable member is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberMode {
    /// The property value itself.
    Direct,
    /// Whether the nullable property holds a value.
    Presence,
    /// The non-null value inside a nullable property.
    Unwrap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccess {
    pub root: MemberRoot,
    pub path: Vec<String>,
    /// Static semantic type of the property itself.
    pub typ: ExprType,
    pub mode: MemberMode,
}

impl MemberAccess {
    pub fn subject(name: impl Into<String>, typ: ExprType) -> Self {
        Self {
            root: MemberRoot::Subject,
            path: vec![name.into()],
            typ,
            mode: MemberMode::Direct,
        }
    }

    pub fn presence(name: impl Into<String>, typ: ExprType) -> Self {
        Self {
            mode: MemberMode::Presence,
            ..Self::subject(name, typ)
        }
    }

    pub fn unwrapped(name: impl Into<String>, typ: ExprType) -> Self {
        Self {
            mode: MemberMode::Unwrap,
            ..Self::subject(name, typ)
        }
    }

    pub fn captured(root: CapturedValue, path: Vec<String>, typ: ExprType) -> Self {
        Self {
            root: MemberRoot::Captured(root),
            path,
            typ,
            mode: MemberMode::Direct,
        }
    }

    pub fn is_subject(&self) -> bool {
        matches!(self.root, MemberRoot::Subject)
    }

    pub fn display_path(&self) -> String {
        self.path.join(".")
    }

    /// The single property name of a subject-rooted access. Chains nested
    /// beyond one level violate the flat-record assumption.
    pub fn single_property(&self) -> Result<&str, CompileError> {
        match (&self.root, self.path.as_slice()) {
            (MemberRoot::Subject, [name]) => Ok(name),
            (MemberRoot::Subject, _) => Err(CompileError::UnresolvedMember(format!(
                "{} (member chains nested beyond one level are not supported)",
                self.display_path()
            ))),
            (MemberRoot::Captured(_), _) => Err(CompileError::UnsupportedExpression(format!(
                "{} is not a property of the subject row",
                self.display_path()
            ))),
        }
    }

    /// The same access read as a plain property value.
    pub fn as_direct(&self) -> MemberAccess {
        MemberAccess {
            mode: MemberMode::Direct,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodCall {
    /// `member LIKE '%' <arg> '%'`
    Contains(MemberAccess, Box<Expr>),
    /// `member LIKE <arg> '%'`
    StartsWith(MemberAccess, Box<Expr>),
    /// `member LIKE '%' <arg>`
    EndsWith(MemberAccess, Box<Expr>),
    /// `member IN (...)` over an already-enumerated runtime collection;
    /// element order and duplicates are preserved.
    InList(MemberAccess, Vec<SqlValue>),
}

impl MethodCall {
    pub fn member(&self) -> &MemberAccess {
        match self {
            MethodCall::Contains(m, _)
            | MethodCall::StartsWith(m, _)
            | MethodCall::EndsWith(m, _)
            | MethodCall::InList(m, _) => m,
        }
    }
}

impl Expr {
    pub fn constant(value: impl Into<SqlValue>) -> Expr {
        Expr::Constant(value.into())
    }

    pub fn null() -> Expr {
        Expr::Constant(SqlValue::Null)
    }

    pub fn member(access: MemberAccess) -> Expr {
        Expr::Member(access)
    }

    pub fn binary(op: BinaryOperator, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn and(lhs: Expr, rhs: Expr) -> Expr {
        Self::binary(BinaryOperator::And, lhs, rhs)
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Expr {
        Self::binary(BinaryOperator::Or, lhs, rhs)
    }

    pub fn eq(lhs: Expr, rhs: Expr) -> Expr {
        Self::binary(BinaryOperator::Eq, lhs, rhs)
    }

    pub fn neq(lhs: Expr, rhs: Expr) -> Expr {
        Self::binary(BinaryOperator::Neq, lhs, rhs)
    }

    pub fn lt(lhs: Expr, rhs: Expr) -> Expr {
        Self::binary(BinaryOperator::Lt, lhs, rhs)
    }

    pub fn lte(lhs: Expr, rhs: Expr) -> Expr {
        Self::binary(BinaryOperator::Lte, lhs, rhs)
    }

    pub fn gt(lhs: Expr, rhs: Expr) -> Expr {
        Self::binary(BinaryOperator::Gt, lhs, rhs)
    }

    pub fn gte(lhs: Expr, rhs: Expr) -> Expr {
        Self::binary(BinaryOperator::Gte, lhs, rhs)
    }

    pub fn not(inner: Expr) -> Expr {
        Expr::Unary(UnaryOperator::Not, Box::new(inner))
    }

    pub fn negate(inner: Expr) -> Expr {
        Expr::Unary(UnaryOperator::Negate, Box::new(inner))
    }

    pub fn convert(typ: ExprType, inner: Expr) -> Expr {
        Expr::Unary(UnaryOperator::Convert(typ), Box::new(inner))
    }

    pub fn as_literal_bool(&self) -> Option<bool> {
        match self {
            Expr::Constant(SqlValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Static semantic type of the node, `None` when it cannot be named (a
    /// bare `NULL` literal).
    pub fn static_type(&self) -> Option<ExprType> {
        match self {
            Expr::Constant(value) => value.scalar_kind().map(ExprType::of),
            Expr::Member(m) => Some(match m.mode {
                MemberMode::Direct => m.typ,
                MemberMode::Presence => ExprType::of(ScalarKind::Bool),
                MemberMode::Unwrap => m.typ.as_required(),
            }),
            Expr::Unary(UnaryOperator::Not, _) => Some(ExprType::of(ScalarKind::Bool)),
            Expr::Unary(UnaryOperator::Negate, inner) => inner.static_type(),
            Expr::Unary(UnaryOperator::Convert(typ), _) => Some(*typ),
            Expr::Binary(op, lhs, rhs) => match op {
                BinaryOperator::And
                | BinaryOperator::Or
                | BinaryOperator::Eq
                | BinaryOperator::Neq
                | BinaryOperator::Lt
                | BinaryOperator::Lte
                | BinaryOperator::Gt
                | BinaryOperator::Gte => Some(ExprType::of(ScalarKind::Bool)),
                _ => {
                    let lt = lhs.static_type();
                    let rt = rhs.static_type();
                    match (lt, rt) {
                        (Some(l), Some(r)) => Some(ExprType {
                            kind: l.kind,
                            nullable: l.nullable || r.nullable,
                        }),
                        (l, r) => l.or(r),
                    }
                }
            },
            Expr::Call(_) => Some(ExprType::of(ScalarKind::Bool)),
        }
    }
}
