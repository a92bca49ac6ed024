//! Top-level compilation entry points: normalize, take the literal-boolean
//! early exit, then emit. The parameter cursor and the sink are owned by the
//! caller so that numbering and registration order span every fragment of one
//! statement.

use tracing::debug;

use crate::compile_error::CompileError;
use crate::expr::Expr;
use crate::schema::ColumnCatalog;
use crate::sql::expression_builder::ExpressionBuilder;
use crate::sql::param::{ParameterCursor, ParameterSink};
use crate::sql::predicate::{FALSE_FRAGMENT, TRUE_FRAGMENT};
use crate::sql::sql_builder::SQLBuilder;

use super::normalize::{normalize, normalize_scalar};

/// Compile a set of predicate fragments into one WHERE-clause fragment. The
/// fragments are joined with ` AND `; an empty set compiles to the literal
/// always-true fragment. A fragment that normalizes to a literal boolean is
/// emitted as `1=1`/`1=0` without walking further.
pub fn compile_predicates(
    catalog: &ColumnCatalog,
    predicates: &[Expr],
    alias: Option<&str>,
    cursor: &mut ParameterCursor,
    sink: &mut dyn ParameterSink,
) -> Result<String, CompileError> {
    if predicates.is_empty() {
        return Ok(TRUE_FRAGMENT.to_string());
    }

    let mut fragments = Vec::with_capacity(predicates.len());
    for predicate in predicates {
        let normalized = normalize(predicate)?;
        match normalized.as_literal_bool() {
            Some(true) => fragments.push(TRUE_FRAGMENT.to_string()),
            Some(false) => fragments.push(FALSE_FRAGMENT.to_string()),
            None => {
                let mut builder = SQLBuilder::new(alias, cursor, sink);
                normalized.build(catalog, &mut builder)?;
                fragments.push(builder.into_sql());
            }
        }
    }

    let sql = fragments.join(" AND ");
    debug!(fragments = predicates.len(), sql = %sql, "compiled predicate");
    Ok(sql)
}

/// Compile a single predicate fragment.
pub fn compile_predicate(
    catalog: &ColumnCatalog,
    predicate: &Expr,
    alias: Option<&str>,
    cursor: &mut ParameterCursor,
    sink: &mut dyn ParameterSink,
) -> Result<String, CompileError> {
    compile_predicates(catalog, std::slice::from_ref(predicate), alias, cursor, sink)
}

/// Compile a value expression, e.g. the right-hand side of a SET clause.
/// `target` names the property whose column the assignment writes to; its
/// descriptor seeds the column context so an immediately emitted constant is
/// typed and sized like the column.
pub fn compile_value(
    catalog: &ColumnCatalog,
    expr: &Expr,
    target: Option<&str>,
    cursor: &mut ParameterCursor,
    sink: &mut dyn ParameterSink,
) -> Result<String, CompileError> {
    let normalized = normalize_scalar(expr)?;

    let mut builder = SQLBuilder::new(None, cursor, sink);
    if let Some(property) = target {
        let column = catalog
            .resolve(property)
            .ok_or_else(|| CompileError::UnresolvedMember(property.to_string()))?;
        builder.set_active_column(column);
    }
    normalized.build(catalog, &mut builder)?;

    let sql = builder.into_sql();
    debug!(sql = %sql, "compiled value expression");
    Ok(sql)
}
