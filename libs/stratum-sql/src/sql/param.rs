use crate::expr::SqlValue;
use crate::schema::DbType;

/// Prefix of positional placeholder tokens; the full token is the prefix plus
/// a zero-based index (`@p0`, `@p1`, ...). The registered parameter name is
/// the token itself.
pub const PARAM_PREFIX: &str = "@p";

/// A single value-parameter registration, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct SQLParam {
    pub name: String,
    pub typ: DbType,
    pub size: Option<u32>,
    pub value: SqlValue,
}

/// Destination capability for generated value parameters, owned by the
/// caller's command/statement abstraction. Called zero or more times per
/// compilation, strictly in emission order. The returned handle is the sink's
/// ordinal for the registration.
pub trait ParameterSink {
    fn add_parameter(
        &mut self,
        name: &str,
        typ: DbType,
        size: Option<u32>,
        value: SqlValue,
    ) -> usize;
}

/// Vec-backed sink for tests and simple callers.
#[derive(Debug, Default)]
pub struct ParamVec {
    params: Vec<SQLParam>,
}

impl ParamVec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[SQLParam] {
        &self.params
    }

    pub fn into_inner(self) -> Vec<SQLParam> {
        self.params
    }
}

impl ParameterSink for ParamVec {
    fn add_parameter(
        &mut self,
        name: &str,
        typ: DbType,
        size: Option<u32>,
        value: SqlValue,
    ) -> usize {
        self.params.push(SQLParam {
            name: name.to_string(),
            typ,
            size,
            value,
        });
        self.params.len() - 1
    }
}

/// Zero-based index cursor for positional placeholders. Owned by the caller
/// and threaded by reference through emission, never ambient state, so that
/// parameter numbering continues across all fragments of one statement and
/// concurrent compilations stay independent.
#[derive(Debug, Default)]
pub struct ParameterCursor {
    next: u16,
}

impl ParameterCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(index: u16) -> Self {
        Self { next: index }
    }

    /// The index the next registration will take.
    pub fn position(&self) -> u16 {
        self.next
    }

    pub fn next_index(&mut self) -> u16 {
        let index = self.next;
        self.next += 1;
        index
    }
}
