use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tantivy::{Index, IndexWriter, TantivyDocument, Term};
use xxhash_rust::xxh3::xxh3_64;

use crate::asset;
use crate::config::IndexerConfig;
use crate::error::{AssetSearchError, Result};
use crate::indexer::{IndexRecord, IndexSink, IndexerRegistry};
use super::catalog::Catalog;
use super::schema::SchemaFields;

/// Serialization sink that persists records as index documents.
///
/// Records arrive in emission order and are tagged with the owning asset,
/// its kind, an ordinal, and the producing indexer's version. Ownership of
/// each record transfers here on push.
pub struct SearchSerializer<'a> {
    asset_path: &'a str,
    kind: &'a str,
    indexer_version: u32,
    mtime: u64,
    fields: &'a SchemaFields,
    writer: &'a IndexWriter,
    ordinal: u64,
}

impl<'a> SearchSerializer<'a> {
    pub fn new(
        asset_path: &'a str,
        kind: &'a str,
        indexer_version: u32,
        mtime: u64,
        fields: &'a SchemaFields,
        writer: &'a IndexWriter,
    ) -> Self {
        Self {
            asset_path,
            kind,
            indexer_version,
            mtime,
            fields,
            writer,
            ordinal: 0,
        }
    }

    /// Number of records serialized so far
    pub fn emitted(&self) -> u64 {
        self.ordinal
    }
}

impl IndexSink for SearchSerializer<'_> {
    fn push(&mut self, record: IndexRecord) {
        let record_id = format!(
            "{:016x}:{}",
            xxh3_64(self.asset_path.as_bytes()),
            self.ordinal
        );

        let mut doc = TantivyDocument::new();
        doc.add_text(self.fields.record_id, &record_id);
        doc.add_text(self.fields.asset_path, self.asset_path);
        doc.add_text(self.fields.kind, self.kind);
        doc.add_text(self.fields.field, &record.field);
        doc.add_text(self.fields.row, record.meta.row.as_deref().unwrap_or(""));
        doc.add_text(
            self.fields.column,
            record.meta.column.as_deref().unwrap_or(""),
        );
        doc.add_text(self.fields.text, &record.text);
        doc.add_u64(self.fields.ordinal, self.ordinal);
        doc.add_u64(self.fields.indexer_version, self.indexer_version as u64);
        doc.add_u64(self.fields.mtime, self.mtime);

        if let Err(e) = self.writer.add_document(doc) {
            tracing::warn!("Failed to serialize record {}: {}", record_id, e);
        }

        self.ordinal += 1;
    }
}

/// Outcome of indexing one asset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The asset was (re-)indexed with this many records
    Indexed { records: u64 },
    /// Stored records are current per the catalog; nothing was written
    Unchanged,
}

/// Handles indexing of asset files into the record index
pub struct AssetIndexWriter {
    config: IndexerConfig,
    index: Index,
    writer: Arc<RwLock<IndexWriter>>,
    fields: SchemaFields,
    library_root: String,
}

impl AssetIndexWriter {
    /// Create a new writer for a library
    pub fn new(config: IndexerConfig, index: Index, library_root: &Path) -> Result<Self> {
        let writer = index.writer(50_000_000)?; // 50MB heap
        let schema = index.schema();
        let fields = SchemaFields::new(&schema);

        Ok(Self {
            config,
            index,
            writer: Arc::new(RwLock::new(writer)),
            fields,
            library_root: library_root.to_string_lossy().to_string(),
        })
    }

    /// Index a single asset file.
    ///
    /// Loads the asset, routes it to its registered indexer, and replaces
    /// any stored records for it. Skips the write entirely when the catalog
    /// shows the stored records were produced by the same indexer version
    /// from the same content.
    pub fn index_asset_file(
        &self,
        path: &Path,
        registry: &IndexerRegistry,
        catalog: &Catalog,
    ) -> Result<IndexOutcome> {
        let asset = asset::load_asset(path, self.config.max_asset_size)?;

        let indexer = registry
            .get(asset.kind())
            .ok_or_else(|| AssetSearchError::UnknownKind(asset.kind().to_string()))?;

        let rel_path = path
            .strip_prefix(&self.library_root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        if !catalog.is_stale(
            &rel_path,
            indexer.name(),
            indexer.version(),
            asset.content_hash(),
        ) {
            return Ok(IndexOutcome::Unchanged);
        }

        let mtime = std::fs::metadata(path)?
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(0);

        // Replace any existing records for this asset
        self.delete_by_asset_path(&rel_path)?;

        let writer = self.writer.write();
        let mut serializer = SearchSerializer::new(
            &rel_path,
            asset.kind(),
            indexer.version(),
            mtime,
            &self.fields,
            &writer,
        );
        indexer.index_asset(&asset, &mut serializer);
        let records = serializer.emitted();
        drop(writer);

        catalog.record(
            &rel_path,
            indexer.name(),
            indexer.version(),
            asset.content_hash(),
        );

        Ok(IndexOutcome::Indexed { records })
    }

    /// Delete all records belonging to an asset path
    pub fn delete_by_asset_path(&self, rel_path: &str) -> Result<()> {
        let term = Term::from_field_text(self.fields.asset_path, rel_path);
        let writer = self.writer.write();
        writer.delete_term(term);
        Ok(())
    }

    /// Remove an asset's records and forget it in the catalog
    pub fn remove_asset(&self, rel_path: &str, catalog: &Catalog) -> Result<()> {
        self.delete_by_asset_path(rel_path)?;
        catalog.remove(rel_path);
        Ok(())
    }

    /// Commit pending changes to the index
    pub fn commit(&self) -> Result<()> {
        let mut writer = self.writer.write();
        writer.commit()?;
        Ok(())
    }

    /// Get the underlying index
    pub fn index(&self) -> &Index {
        &self.index
    }
}
