use crate::compile_error::CompileError;
use crate::schema::ColumnCatalog;

use super::param::{ParamVec, ParameterCursor, SQLParam};
use super::sql_builder::SQLBuilder;

/// A trait for types that can build themselves into an SQL expression.
///
/// Each constituent of a fragment implements this trait, which is then used to
/// hierarchically build the SQL string while parameter registrations flow to
/// the builder's sink.
pub trait ExpressionBuilder {
    /// Build the SQL expression into the given SQL builder.
    fn build(&self, catalog: &ColumnCatalog, builder: &mut SQLBuilder) -> Result<(), CompileError>;

    /// Build the expression into a string with a fresh cursor and a Vec sink.
    /// Useful for testing/debugging, where we want to assert on the generated
    /// SQL without wiring up a caller-owned sink first.
    fn to_sql(&self, catalog: &ColumnCatalog) -> Result<(String, Vec<SQLParam>), CompileError>
    where
        Self: Sized,
    {
        let mut cursor = ParameterCursor::new();
        let mut params = ParamVec::new();
        let mut builder = SQLBuilder::new(None, &mut cursor, &mut params);
        self.build(catalog, &mut builder)?;
        Ok((builder.into_sql(), params.into_inner()))
    }
}

impl<T> ExpressionBuilder for Box<T>
where
    T: ExpressionBuilder,
{
    fn build(&self, catalog: &ColumnCatalog, builder: &mut SQLBuilder) -> Result<(), CompileError> {
        self.as_ref().build(catalog, builder)
    }
}

impl<T> ExpressionBuilder for &T
where
    T: ExpressionBuilder,
{
    fn build(&self, catalog: &ColumnCatalog, builder: &mut SQLBuilder) -> Result<(), CompileError> {
        (**self).build(catalog, builder)
    }
}
