/// Semantic type family of an expression node. Coarser than [`DbType`]: the
/// normalizer only needs to know which family two operands belong to and
/// whether they are nullable; exact column types come from the catalog at
/// emission time.
///
/// [`DbType`]: crate::schema::DbType
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Decimal,
    Text,
    Bytes,
    Uuid,
    Date,
    Time,
    DateTime,
    Enum,
    Json,
}

/// Static semantic type carried by every expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprType {
    pub kind: ScalarKind,
    pub nullable: bool,
}

impl ExprType {
    pub const fn of(kind: ScalarKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(kind: ScalarKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    /// The same type with the nullability stripped.
    pub const fn as_required(self) -> Self {
        Self {
            kind: self.kind,
            nullable: false,
        }
    }
}
