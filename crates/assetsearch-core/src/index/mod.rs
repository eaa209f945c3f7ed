pub mod catalog;
pub mod schema;
pub mod writer;

pub use catalog::{Catalog, CatalogEntry};
pub use schema::{build_record_schema, fields, SchemaFields};
pub use writer::{AssetIndexWriter, IndexOutcome, SearchSerializer};
