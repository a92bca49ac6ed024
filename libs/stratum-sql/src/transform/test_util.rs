#![cfg(test)]

use crate::expr::{Expr, ExprType, MemberAccess, ScalarKind};
use crate::schema::{ColumnCatalog, ColumnDescriptor, DbType};

/// A `people`-style entity with one column per interesting shape.
pub struct TestSetup {
    pub catalog: ColumnCatalog,
}

impl TestSetup {
    pub fn with_setup(test_fn: impl Fn(TestSetup)) {
        let catalog = ColumnCatalog::new(vec![
            ColumnDescriptor::new("Id", "Id", DbType::Int64).primary_key(),
            ColumnDescriptor::new("Age", "Age", DbType::Int32),
            ColumnDescriptor::new("Name", "Name", DbType::NVarChar).with_size(50),
            ColumnDescriptor::new("IsActive", "IsActive", DbType::Boolean),
            ColumnDescriptor::new("Status", "Status", DbType::NVarChar)
                .with_size(20)
                .nullable(),
            ColumnDescriptor::new("Ccy", "Ccy", DbType::NChar).with_size(3),
            ColumnDescriptor::new("Score", "Score", DbType::Int32).nullable(),
            ColumnDescriptor::new("Flags", "Flags", DbType::Int32),
        ]);

        test_fn(TestSetup { catalog })
    }
}

pub fn id() -> MemberAccess {
    MemberAccess::subject("Id", ExprType::of(ScalarKind::Int))
}

pub fn age() -> Expr {
    Expr::member(MemberAccess::subject("Age", ExprType::of(ScalarKind::Int)))
}

pub fn name() -> MemberAccess {
    MemberAccess::subject("Name", ExprType::of(ScalarKind::Text))
}

pub fn is_active() -> Expr {
    Expr::member(MemberAccess::subject(
        "IsActive",
        ExprType::of(ScalarKind::Bool),
    ))
}

pub fn status() -> Expr {
    Expr::member(MemberAccess::subject(
        "Status",
        ExprType::nullable(ScalarKind::Text),
    ))
}

pub fn ccy() -> Expr {
    Expr::member(MemberAccess::subject("Ccy", ExprType::of(ScalarKind::Text)))
}

pub fn score_presence() -> Expr {
    Expr::member(MemberAccess::presence(
        "Score",
        ExprType::nullable(ScalarKind::Int),
    ))
}

pub fn score() -> Expr {
    Expr::member(MemberAccess::subject(
        "Score",
        ExprType::nullable(ScalarKind::Int),
    ))
}
