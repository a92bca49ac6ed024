#[macro_use]
#[cfg(test)]
mod test_util;

pub mod expression_builder;
pub mod param;
pub mod predicate;
pub mod sql_builder;
