pub mod node;
pub mod types;
pub mod value;

pub use node::{BinaryOperator, Expr, MemberAccess, MemberMode, MemberRoot, MethodCall, UnaryOperator};
pub use types::{ExprType, ScalarKind};
pub use value::{CapturedValue, SqlValue};
