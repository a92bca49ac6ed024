use serde::{Deserialize, Serialize};

use super::db_type::DbType;

/// Metadata binding an entity property to a database column. Produced by the
/// entity-metadata layer and looked up once per resolvable member-access node.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDescriptor {
    /// Property name on the entity; the exact-match lookup key.
    pub property: String,
    /// Column name as emitted into SQL.
    pub column: String,
    pub typ: DbType,
    /// Declared size for sized (string/binary) types.
    pub size: Option<u32>,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
    pub is_nullable: bool,
    pub is_pk: bool,
}

impl std::fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("Column: {} -> {}", &self.property, &self.column))
    }
}

impl ColumnDescriptor {
    pub fn new(property: impl Into<String>, column: impl Into<String>, typ: DbType) -> Self {
        Self {
            property: property.into(),
            column: column.into(),
            typ,
            size: None,
            precision: None,
            scale: None,
            is_nullable: false,
            is_pk: false,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_pk = true;
        self
    }
}

/// The set of column descriptors for one entity. Read-only after construction,
/// so it can be shared and cached freely across concurrent compilations.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ColumnCatalog {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnCatalog {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// Resolve a property name to its column descriptor by exact match.
    pub fn resolve(&self, property: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.property == property)
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_exact_match() {
        let catalog = ColumnCatalog::new(vec![
            ColumnDescriptor::new("Age", "age", DbType::Int32),
            ColumnDescriptor::new("Name", "name", DbType::NVarChar).with_size(50),
        ]);

        assert_eq!(catalog.resolve("Age").map(|c| c.column.as_str()), Some("age"));
        assert_eq!(catalog.resolve("age"), None);
        assert_eq!(catalog.resolve("Nam"), None);
        assert_eq!(catalog.resolve("Name").and_then(|c| c.size), Some(50));
    }
}
