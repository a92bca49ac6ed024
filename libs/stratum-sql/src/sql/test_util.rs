#![cfg(test)]

//! Test assertions for SQL statements and their parameters.

/// Assert that the registered parameters match the expected values, in order.
///
/// ```no_run
/// assert_params!(actual_params);                 // expects no parameters
/// assert_params!(actual_params, 18, "Jo");      // expects exactly these values
/// ```
macro_rules! assert_params {
    ($actual_params:expr $(,)?) => {
        assert!($actual_params.is_empty(), "extra actual parameters");
    };
    ($actual_params:expr, $($expected_param:expr),+ $(,)?) => {
        let expected: Vec<$crate::expr::SqlValue> = vec![$($expected_param.into()),+];
        let actual: Vec<$crate::expr::SqlValue> =
            $actual_params.iter().map(|p| p.value.clone()).collect();
        assert_eq!(actual, expected, "parameter mismatch");
    };
}

/// Assert on a `(sql, params)` pair produced by
/// [`ExpressionBuilder::to_sql`](crate::sql::expression_builder::ExpressionBuilder::to_sql)
/// or a compile entry point.
macro_rules! assert_binding {
    ($actual:expr, $expected_stmt:expr) => {
        let (actual_stmt, actual_params) = $actual;
        assert_eq!(actual_stmt, $expected_stmt);
        assert_params!(actual_params);
    };
    ($actual:expr, $expected_stmt:expr, $($rest:expr),+ $(,)?) => {
        let (actual_stmt, actual_params) = $actual;
        assert_eq!(actual_stmt, $expected_stmt);
        assert_params!(actual_params, $($rest),+);
    };
}
