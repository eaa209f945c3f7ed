//! Asset content indexing contract
//!
//! An [`AssetIndexer`] extracts searchable records from one asset kind and
//! hands them to an [`IndexSink`]; the [`IndexerRegistry`] routes a loaded
//! asset to its indexer by kind string. Indexers are stateless across calls:
//! indexing one asset never observes or depends on indexing another, so a
//! registry can be shared across worker threads.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::asset::AssetObject;
use crate::error::{AssetSearchError, Result};

mod curve_table;
mod data_table;
mod string_table;

pub use curve_table::CurveTableIndexer;
pub use data_table::DataTableIndexer;
pub use string_table::StringTableIndexer;

/// Row/column identifiers attached to a record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMeta {
    /// Row identifier within the asset, when the content is tabular
    pub row: Option<String>,
    /// Column identifier within the asset, when the content is tabular
    pub column: Option<String>,
}

/// One emitted unit of searchable content.
///
/// Ownership transfers to the sink on emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    /// Field name the text was extracted from
    pub field: String,
    /// The searchable text value (empty is a valid value, not "missing")
    pub text: String,
    /// Optional structured metadata
    pub meta: RecordMeta,
}

impl IndexRecord {
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
            meta: RecordMeta::default(),
        }
    }

    pub fn with_row(mut self, row: impl Into<String>) -> Self {
        self.meta.row = Some(row.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.meta.column = Some(column.into());
        self
    }
}

/// Append-style consumer of extracted records
pub trait IndexSink {
    fn push(&mut self, record: IndexRecord);
}

/// Sink that collects records in emission order
#[derive(Debug, Default)]
pub struct RecordBuffer {
    pub records: Vec<IndexRecord>,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndexSink for RecordBuffer {
    fn push(&mut self, record: IndexRecord) {
        self.records.push(record);
    }
}

/// Extracts searchable content from one asset kind.
///
/// `index_asset` never fails: malformed or partially-loaded content skips the
/// offending unit and continues, and a null document emits zero records.
/// Indexing runs over large asset batches, so one bad asset must not abort
/// the batch.
pub trait AssetIndexer: Send + Sync {
    /// Stable identifier for the asset kind this indexer handles.
    /// Unique among registered indexers; used as the routing key.
    fn name(&self) -> &'static str;

    /// Extraction schema version. Any change to extraction logic must bump
    /// this so previously stored entries are treated as stale.
    fn version(&self) -> u32;

    /// Walk the asset's structured content and emit one record per
    /// indexable unit. Writes only to the sink; retains nothing.
    fn index_asset(&self, asset: &AssetObject, sink: &mut dyn IndexSink);
}

/// Routes asset kinds to their indexers
pub struct IndexerRegistry {
    indexers: BTreeMap<&'static str, Box<dyn AssetIndexer>>,
}

impl IndexerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            indexers: BTreeMap::new(),
        }
    }

    /// Create a registry with the built-in indexers registered
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        // Names are distinct by construction, so these cannot fail
        let _ = registry.register(Box::new(DataTableIndexer));
        let _ = registry.register(Box::new(StringTableIndexer));
        let _ = registry.register(Box::new(CurveTableIndexer));
        registry
    }

    /// Register an indexer, rejecting duplicate kind names
    pub fn register(&mut self, indexer: Box<dyn AssetIndexer>) -> Result<()> {
        let name = indexer.name();
        if self.indexers.contains_key(name) {
            return Err(AssetSearchError::DuplicateIndexer(name.to_string()));
        }
        self.indexers.insert(name, indexer);
        Ok(())
    }

    /// Look up the indexer for an asset kind
    pub fn get(&self, kind: &str) -> Option<&dyn AssetIndexer> {
        self.indexers.get(kind).map(|i| i.as_ref())
    }

    /// Iterate over registered indexers in kind order
    pub fn iter(&self) -> impl Iterator<Item = &dyn AssetIndexer> {
        self.indexers.values().map(|i| i.as_ref())
    }

    pub fn len(&self) -> usize {
        self.indexers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexers.is_empty()
    }
}

impl Default for IndexerRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

/// Flatten a JSON value to its searchable text.
///
/// `None` means the value is missing (null), as opposed to present but
/// empty. Nested arrays and objects flatten to compact JSON.
pub(crate) fn flatten_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
