use crate::expr::SqlValue;
use crate::schema::ColumnDescriptor;

use super::param::{ParameterCursor, ParameterSink, PARAM_PREFIX};

/// Accumulates the SQL text of one fragment while forwarding value parameters
/// to the caller's sink. One builder per fragment; the cursor and the sink are
/// borrowed from the caller so that numbering and registration order span all
/// fragments of a statement.
pub struct SQLBuilder<'a> {
    sql: String,
    /// Optional table-alias prefix for column references.
    alias: Option<&'a str>,
    cursor: &'a mut ParameterCursor,
    sink: &'a mut dyn ParameterSink,
    /// The most recently resolved column; an immediately adjacent constant
    /// borrows its abstract db type and size instead of inferring from the
    /// runtime value.
    active_column: Option<ColumnDescriptor>,
}

impl<'a> SQLBuilder<'a> {
    pub fn new(
        alias: Option<&'a str>,
        cursor: &'a mut ParameterCursor,
        sink: &'a mut dyn ParameterSink,
    ) -> Self {
        Self {
            sql: String::new(),
            alias,
            cursor,
            sink,
            active_column: None,
        }
    }

    /// Push a string
    pub fn push_str<T: AsRef<str>>(&mut self, s: T) {
        self.sql.push_str(s.as_ref());
    }

    /// Push a character
    pub fn push(&mut self, c: char) {
        self.sql.push(c);
    }

    pub fn push_space(&mut self) {
        self.sql.push(' ');
    }

    /// Push a column reference, prefixed with `alias.` when an alias is set.
    pub fn push_column(&mut self, column_name: &str) {
        if let Some(alias) = self.alias {
            self.sql.push_str(alias);
            self.sql.push('.');
        }
        self.sql.push_str(column_name);
    }

    pub fn set_active_column(&mut self, column: &ColumnDescriptor) {
        self.active_column = Some(column.clone());
    }

    pub fn active_column(&self) -> Option<&ColumnDescriptor> {
        self.active_column.as_ref()
    }

    /// Materialize a constant as a positional parameter: pick its abstract db
    /// type and size, register it with the sink, and push the placeholder
    /// token.
    ///
    /// The type/size come from the active column context when the value's
    /// natural size does not exceed the declared column size; otherwise they
    /// are inferred from the value's own shape. Fixed-length string/binary
    /// column types register as their variable-length counterpart, sized to
    /// `max(declared column size, value natural length)`.
    pub fn push_value_param(&mut self, value: &SqlValue) {
        let value = value.unwrapped();

        let (typ, size) = match &self.active_column {
            Some(column) if value_fits(&value, column) => {
                let typ = column.typ.to_variable_length();
                let size = if typ.is_sized() {
                    match (column.size, value.natural_size()) {
                        (Some(declared), Some(natural)) => Some(declared.max(natural)),
                        (declared, natural) => declared.or(natural),
                    }
                } else {
                    None
                };
                (typ, size)
            }
            _ => value.inferred_db_type(),
        };

        let name = format!("{PARAM_PREFIX}{}", self.cursor.next_index());
        self.sink.add_parameter(&name, typ, size, value);
        self.sql.push_str(&name);
    }

    /// Push elements of an iterator, separated by `sep`.
    pub fn push_iter<T>(
        &mut self,
        iter: impl ExactSizeIterator<Item = T>,
        sep: &str,
        mapping: impl Fn(&mut Self, T),
    ) {
        let len = iter.len();
        for (i, item) in iter.enumerate() {
            mapping(self, item);
            if i < len - 1 {
                self.sql.push_str(sep);
            }
        }
    }

    /// Finish the fragment. Consumes the builder; the final step of emission.
    pub fn into_sql(self) -> String {
        self.sql
    }
}

fn value_fits(value: &SqlValue, column: &ColumnDescriptor) -> bool {
    match (value.natural_size(), column.size) {
        (Some(natural), Some(declared)) => natural <= declared,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::SqlValue;
    use crate::schema::{ColumnDescriptor, DbType};
    use crate::sql::param::ParamVec;

    #[test]
    fn alias_prefixes_column_references() {
        let mut cursor = ParameterCursor::new();
        let mut params = ParamVec::new();
        let mut builder = SQLBuilder::new(Some("t0"), &mut cursor, &mut params);
        builder.push_column("age");
        assert_eq!(builder.into_sql(), "t0.age");
    }

    #[test]
    fn constant_borrows_type_and_size_from_active_column() {
        let name = ColumnDescriptor::new("Name", "Name", DbType::NVarChar).with_size(50);

        let mut cursor = ParameterCursor::new();
        let mut params = ParamVec::new();
        let mut builder = SQLBuilder::new(None, &mut cursor, &mut params);
        builder.set_active_column(&name);
        builder.push_value_param(&SqlValue::from("Jo"));
        assert_eq!(builder.into_sql(), "@p0");

        let registered = &params.as_slice()[0];
        assert_eq!(registered.typ, DbType::NVarChar);
        assert_eq!(registered.size, Some(50));
        assert_eq!(registered.value, SqlValue::from("Jo"));
    }

    #[test]
    fn oversized_constant_falls_back_to_value_shape() {
        let code = ColumnDescriptor::new("Code", "Code", DbType::VarChar).with_size(3);

        let mut cursor = ParameterCursor::new();
        let mut params = ParamVec::new();
        let mut builder = SQLBuilder::new(None, &mut cursor, &mut params);
        builder.set_active_column(&code);
        builder.push_value_param(&SqlValue::from("ABCDEF"));

        let registered = &params.as_slice()[0];
        assert_eq!(registered.typ, DbType::NVarChar);
        assert_eq!(registered.size, Some(6));
    }

    #[test]
    fn fixed_length_column_registers_variable_length_parameter() {
        let code = ColumnDescriptor::new("Ccy", "Ccy", DbType::NChar).with_size(3);

        let mut cursor = ParameterCursor::new();
        let mut params = ParamVec::new();
        let mut builder = SQLBuilder::new(None, &mut cursor, &mut params);
        builder.set_active_column(&code);
        builder.push_value_param(&SqlValue::from("USD"));

        let registered = &params.as_slice()[0];
        assert_eq!(registered.typ, DbType::NVarChar);
        assert_eq!(registered.size, Some(3));
    }

    #[test]
    fn enum_constants_bind_their_underlying_integral_value() {
        let mut cursor = ParameterCursor::new();
        let mut params = ParamVec::new();
        let mut builder = SQLBuilder::new(None, &mut cursor, &mut params);
        builder.push_value_param(&SqlValue::enum_value(3, DbType::Int16));

        let registered = &params.as_slice()[0];
        assert_eq!(registered.typ, DbType::Int16);
        assert_eq!(registered.value, SqlValue::Int16(3));
    }
}
