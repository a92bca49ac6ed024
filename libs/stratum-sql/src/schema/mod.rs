pub mod column;
pub mod db_type;

pub use column::{ColumnCatalog, ColumnDescriptor};
pub use db_type::DbType;
