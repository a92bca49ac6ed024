use thiserror::Error;

/// Terminal compilation failures. Every variant reflects a mismatch between
/// the entity model and the supplied expression (a caller/programming error),
/// so none of them is retried or locally recovered; they propagate to the
/// caller immediately.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Operator, method, or node kind outside the supported grammar.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// Property not found in the column catalog, or a member chain nested
    /// beyond one level.
    #[error("unresolved member: {0}")]
    UnresolvedMember(String),

    /// A captured chain that cannot be reduced to a primitive value.
    #[error("invalid constant: {0}")]
    InvalidConstant(String),
}
