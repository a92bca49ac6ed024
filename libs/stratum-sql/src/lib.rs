//! The predicate-expression compiler of the Stratum toolkit.
//!
//! The core idea is a two-phase miniature compiler over a closed expression
//! grammar. An [`Expr`] tree written against an entity's properties is first
//! [normalized](normalize): constant subtrees fold away, nullable and bitwise
//! operand types are aligned, and shorthand boolean idioms reduce to a uniform
//! comparison shape. The canonical tree is then emitted depth-first as a
//! parameterized SQL text fragment, suitable for a WHERE clause, a
//! single-value SET clause, or an IN-filter.
//!
//! Value parameters are never inlined into the text: each constant registers
//! with the caller's [`ParameterSink`] under a positional placeholder token,
//! in strict left-to-right emission order, with its abstract
//! [`DbType`](schema) and size taken from the column it is compared against
//! (falling back to the value's own shape). The caller threads a
//! [`ParameterCursor`] through every fragment of a statement so numbering
//! stays continuous.
//!
//! Column metadata comes from a read-only [`ColumnCatalog`]; compilation is a
//! pure, synchronous tree walk and is freely concurrent as long as each call
//! owns its builder, cursor, and sink.

pub mod compile_error;

mod expr;
mod schema;
#[macro_use]
mod sql;
mod transform;

pub use compile_error::CompileError;

pub use expr::{
    BinaryOperator, CapturedValue, Expr, ExprType, MemberAccess, MemberMode, MemberRoot,
    MethodCall, ScalarKind, SqlValue, UnaryOperator,
};

pub use schema::{ColumnCatalog, ColumnDescriptor, DbType};

pub use sql::{
    expression_builder::ExpressionBuilder,
    param::{ParamVec, ParameterCursor, ParameterSink, SQLParam, PARAM_PREFIX},
    predicate::{FALSE_FRAGMENT, TRUE_FRAGMENT},
    sql_builder::SQLBuilder,
};

pub use transform::{
    compile::{compile_predicate, compile_predicates, compile_value},
    normalize::{normalize, normalize_scalar},
};
