use crate::compile_error::CompileError;
use crate::expr::{
    BinaryOperator, Expr, MemberAccess, MemberMode, MemberRoot, MethodCall, ScalarKind, SqlValue,
    UnaryOperator,
};
use crate::schema::ColumnCatalog;

use super::expression_builder::ExpressionBuilder;
use super::sql_builder::SQLBuilder;

/// Literal fragment for an always-true predicate.
pub const TRUE_FRAGMENT: &str = "1=1";
/// Literal fragment for an always-false predicate.
pub const FALSE_FRAGMENT: &str = "1=0";

impl ExpressionBuilder for Expr {
    /// Depth-first emission of a normalized expression.
    fn build(&self, catalog: &ColumnCatalog, builder: &mut SQLBuilder) -> Result<(), CompileError> {
        match self {
            Expr::Constant(value) => {
                if value.is_null() {
                    builder.push_str("NULL");
                } else {
                    builder.push_value_param(value);
                }
                Ok(())
            }
            Expr::Member(member) => member.build(catalog, builder),
            Expr::Unary(UnaryOperator::Convert(_), inner) => inner.build(catalog, builder),
            Expr::Unary(UnaryOperator::Not, inner) => {
                builder.push_str("NOT (");
                inner.build(catalog, builder)?;
                builder.push(')');
                Ok(())
            }
            Expr::Unary(UnaryOperator::Negate, inner) => {
                builder.push_str("-(");
                inner.build(catalog, builder)?;
                builder.push(')');
                Ok(())
            }
            Expr::Binary(op, lhs, rhs) => {
                let rhs_is_null = matches!(&**rhs, Expr::Constant(v) if v.is_null());
                let op_text = operator_text(*op, rhs_is_null, lhs, rhs)?;

                builder.push('(');
                lhs.build(catalog, builder)?;
                builder.push_space();
                builder.push_str(op_text);
                builder.push_space();
                rhs.build(catalog, builder)?;
                builder.push(')');
                Ok(())
            }
            Expr::Call(call) => call.build(catalog, builder),
        }
    }
}

impl ExpressionBuilder for MemberAccess {
    fn build(&self, catalog: &ColumnCatalog, builder: &mut SQLBuilder) -> Result<(), CompileError> {
        match &self.root {
            MemberRoot::Subject => {
                if self.mode != MemberMode::Direct {
                    return Err(CompileError::UnsupportedExpression(format!(
                        "nullable intrinsic on `{}` survived normalization",
                        self.display_path()
                    )));
                }
                let property = self.single_property()?;
                let column = catalog
                    .resolve(property)
                    .ok_or_else(|| CompileError::UnresolvedMember(property.to_string()))?;
                builder.push_column(&column.column);
                builder.set_active_column(column);
                Ok(())
            }
            // A captured chain not already folded by normalization: evaluate
            // it and emit the value as a constant.
            MemberRoot::Captured(root) => {
                let value = root.resolve(&self.path)?;
                if value.is_null() {
                    builder.push_str("NULL");
                } else {
                    builder.push_value_param(&value);
                }
                Ok(())
            }
        }
    }
}

impl ExpressionBuilder for MethodCall {
    fn build(&self, catalog: &ColumnCatalog, builder: &mut SQLBuilder) -> Result<(), CompileError> {
        match self {
            MethodCall::Contains(member, arg) => {
                build_pattern(member, arg, true, true, catalog, builder)
            }
            MethodCall::StartsWith(member, arg) => {
                build_pattern(member, arg, false, true, catalog, builder)
            }
            MethodCall::EndsWith(member, arg) => {
                build_pattern(member, arg, true, false, catalog, builder)
            }
            MethodCall::InList(member, values) => {
                if values.is_empty() {
                    // no value can match; the fragment is constant false
                    builder.push_str(FALSE_FRAGMENT);
                    return Ok(());
                }

                builder.push('(');
                member.build(catalog, builder)?;
                builder.push_str(" IN (");
                builder.push_iter(values.iter(), ",", |builder, value| {
                    builder.push_value_param(value);
                });
                builder.push_str("))");
                Ok(())
            }
        }
    }
}

/// Emit `(member LIKE <pattern>)`, concatenating `%` wildcards around the
/// bound placeholder at the SQL level so that the bound value stays
/// plan-reusable across argument values. A null pattern is a null check,
/// never a LIKE.
fn build_pattern(
    member: &MemberAccess,
    arg: &Expr,
    leading_wildcard: bool,
    trailing_wildcard: bool,
    catalog: &ColumnCatalog,
    builder: &mut SQLBuilder,
) -> Result<(), CompileError> {
    let pattern = constant_argument(arg)?;

    builder.push('(');
    member.build(catalog, builder)?;
    if pattern.is_null() {
        builder.push_str(" IS NULL");
    } else {
        builder.push_str(" LIKE ");
        if leading_wildcard {
            builder.push_str("'%'+");
        }
        builder.push_value_param(pattern);
        if trailing_wildcard {
            builder.push_str("+'%'");
        }
    }
    builder.push(')');
    Ok(())
}

fn constant_argument(arg: &Expr) -> Result<&SqlValue, CompileError> {
    match arg {
        Expr::Constant(value) => Ok(value),
        _ => Err(CompileError::UnsupportedExpression(
            "pattern argument must be a compile-time value".to_string(),
        )),
    }
}

fn operator_text(
    op: BinaryOperator,
    rhs_is_null: bool,
    lhs: &Expr,
    rhs: &Expr,
) -> Result<&'static str, CompileError> {
    let text = match op {
        BinaryOperator::And => "AND",
        BinaryOperator::Or => "OR",
        BinaryOperator::Eq => {
            if rhs_is_null {
                "IS"
            } else {
                "="
            }
        }
        BinaryOperator::Neq => {
            if rhs_is_null {
                "IS NOT"
            } else {
                "<>"
            }
        }
        BinaryOperator::Lt => "<",
        BinaryOperator::Lte => "<=",
        BinaryOperator::Gt => ">",
        BinaryOperator::Gte => ">=",
        BinaryOperator::BitAnd => "&",
        BinaryOperator::BitOr => "|",
        BinaryOperator::BitXor => "^",
        BinaryOperator::Add => {
            if is_text(lhs) || is_text(rhs) {
                return Err(CompileError::UnsupportedExpression(
                    "string concatenation is not a supported operator".to_string(),
                ));
            }
            "+"
        }
        BinaryOperator::Sub => "-",
        BinaryOperator::Mul => "*",
        BinaryOperator::Div => "/",
        BinaryOperator::Mod => "%",
    };
    Ok(text)
}

fn is_text(expr: &Expr) -> bool {
    expr.static_type()
        .is_some_and(|t| t.kind == ScalarKind::Text)
}
