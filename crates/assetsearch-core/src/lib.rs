//! assetsearch-core - Core library for structured asset content search
//!
//! This crate provides the core functionality for indexing and searching
//! structured asset files:
//! - Per-kind content indexers behind an explicit registry
//! - A search-serialization sink persisting records into a Tantivy index
//! - Version-keyed invalidation of stored index entries
//! - Configuration management

pub mod asset;
pub mod config;
pub mod error;
pub mod fs;
pub mod index;
pub mod indexer;
pub mod search;
pub mod watcher;

pub use asset::AssetObject;
pub use config::Config;
pub use error::{AssetSearchError, Result};
pub use indexer::{AssetIndexer, IndexRecord, IndexSink, IndexerRegistry, RecordMeta};
pub use watcher::{AssetWatcher, WatchEvent};

use std::path::{Path, PathBuf};

use tantivy::Index;

use index::{AssetIndexWriter, Catalog, IndexOutcome};

/// High-level asset library for indexing and searching
pub struct AssetLibrary {
    /// Library root directory
    root: PathBuf,
    /// Configuration
    config: Config,
    /// Tantivy index
    index: Index,
    /// Index directory path
    index_path: PathBuf,
    /// Registry routing asset kinds to indexers
    registry: IndexerRegistry,
    /// Per-asset record of indexer name/version/content hash
    catalog: Catalog,
}

impl AssetLibrary {
    /// Open or create a library for the given directory
    pub fn open(root: &Path) -> Result<Self> {
        let config = Config::load();
        Self::open_with_config(root, config)
    }

    /// Open or create a library with custom config
    pub fn open_with_config(root: &Path, config: Config) -> Result<Self> {
        let root = std::fs::canonicalize(root)?;

        // Create index directory based on library path hash
        let library_hash = hash_path(&root);
        let index_path = config.indexer.data_dir.join("indexes").join(&library_hash);
        std::fs::create_dir_all(&index_path)?;

        // Open or create Tantivy index
        let schema = index::build_record_schema();
        let index = if index_path.join("meta.json").exists() {
            Index::open_in_dir(&index_path)?
        } else {
            Index::create_in_dir(&index_path, schema)?
        };

        let catalog = Catalog::open(index_path.join("catalog.json"))?;
        let registry = IndexerRegistry::with_builtin();

        Ok(Self {
            root,
            config,
            index,
            index_path,
            registry,
            catalog,
        })
    }

    /// Index all assets in the library.
    ///
    /// Walks the tree, routes each asset to its registered indexer, and
    /// replaces stale records. Assets whose catalog entry still matches the
    /// indexer version and content hash are left untouched. One bad asset
    /// never aborts the batch.
    pub fn index_all(&self) -> Result<IndexStats> {
        let writer = AssetIndexWriter::new(
            self.config.indexer.clone(),
            self.index.clone(),
            &self.root,
        )?;

        let walker = fs::AssetWalker::new(self.root.clone(), self.config.indexer.clone())?;

        let mut stats = IndexStats::default();

        for entry in walker.walk() {
            match writer.index_asset_file(&entry.path, &self.registry, &self.catalog) {
                Ok(IndexOutcome::Indexed { records }) => {
                    stats.indexed += 1;
                    stats.records += records as usize;
                }
                Ok(IndexOutcome::Unchanged) => {
                    stats.unchanged += 1;
                }
                Err(AssetSearchError::UnknownKind(kind)) => {
                    tracing::debug!(
                        "No indexer for kind '{}': {}",
                        kind,
                        entry.path.display()
                    );
                    stats.skipped += 1;
                }
                Err(
                    AssetSearchError::MissingKind(_)
                    | AssetSearchError::AssetParse { .. }
                    | AssetSearchError::AssetTooLarge { .. },
                ) => {
                    // Not every matching file is an asset; skip quietly
                    tracing::debug!("Skipping {}", entry.path.display());
                    stats.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!("Error indexing {}: {}", entry.path.display(), e);
                    stats.errors += 1;
                }
            }
        }

        writer.commit()?;
        self.catalog.save()?;

        tracing::info!(
            "Indexed {} assets ({} unchanged, {} skipped, {} errors)",
            stats.indexed,
            stats.unchanged,
            stats.skipped,
            stats.errors
        );

        Ok(stats)
    }

    /// Index or re-index a single asset (for incremental updates)
    pub fn index_asset(&self, path: &Path) -> Result<()> {
        let writer = AssetIndexWriter::new(
            self.config.indexer.clone(),
            self.index.clone(),
            &self.root,
        )?;

        match writer.index_asset_file(path, &self.registry, &self.catalog) {
            Ok(IndexOutcome::Indexed { records }) => {
                writer.commit()?;
                self.catalog.save()?;
                tracing::debug!("Indexed {} ({} records)", path.display(), records);
                Ok(())
            }
            Ok(IndexOutcome::Unchanged) => {
                tracing::debug!("Unchanged: {}", path.display());
                Ok(())
            }
            Err(
                AssetSearchError::UnknownKind(_)
                | AssetSearchError::MissingKind(_)
                | AssetSearchError::AssetParse { .. }
                | AssetSearchError::AssetTooLarge { .. },
            ) => {
                tracing::debug!("Skipped (not indexable): {}", path.display());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Remove an asset from the index (for incremental updates)
    pub fn remove_asset(&self, path: &Path) -> Result<()> {
        let rel_path = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let writer = AssetIndexWriter::new(
            self.config.indexer.clone(),
            self.index.clone(),
            &self.root,
        )?;
        writer.remove_asset(&rel_path, &self.catalog)?;
        writer.commit()?;
        self.catalog.save()?;

        tracing::debug!("Removed from index: {}", rel_path);
        Ok(())
    }

    /// Search the library
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<search::SearchResult> {
        let searcher = search::Searcher::new(self.config.search.clone(), self.index.clone());
        searcher.search(query, limit)
    }

    /// Search with filters
    pub fn search_filtered(
        &self,
        query: &str,
        limit: Option<usize>,
        kinds: Option<Vec<String>>,
        paths: Option<Vec<String>>,
    ) -> Result<search::SearchResult> {
        let searcher = search::Searcher::new(self.config.search.clone(), self.index.clone());
        let filters = search::SearchFilters { kinds, paths };
        searcher.search_filtered(query, limit, filters)
    }

    /// The indexer registry
    pub fn registry(&self) -> &IndexerRegistry {
        &self.registry
    }

    /// Mutable registry access, for registering custom indexers before
    /// indexing
    pub fn registry_mut(&mut self) -> &mut IndexerRegistry {
        &mut self.registry
    }

    /// The versioning catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the library root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the index path
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Check if the library has been indexed
    pub fn is_indexed(&self) -> bool {
        self.index_path.join("meta.json").exists()
    }

    /// Create a file watcher for this library
    pub fn create_watcher(&self) -> Result<AssetWatcher> {
        AssetWatcher::new(self.root.clone(), self.config.indexer.clone())
    }

    /// Get the indexer config
    pub fn indexer_config(&self) -> &config::IndexerConfig {
        &self.config.indexer
    }
}

/// Statistics from an indexing run
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Assets (re-)indexed this run
    pub indexed: usize,
    /// Assets left alone because their stored records are current
    pub unchanged: usize,
    /// Files skipped (no indexer, unparseable, too large)
    pub skipped: usize,
    /// Unexpected per-asset failures
    pub errors: usize,
    /// Records emitted this run
    pub records: usize,
}

/// Hash a path to create a unique identifier
fn hash_path(path: &Path) -> String {
    use xxhash_rust::xxh3::xxh3_64;
    let hash = xxh3_64(path.to_string_lossy().as_bytes());
    format!("{:016x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_config(data_dir: &Path) -> Config {
        let mut config = Config::default();
        config.indexer.data_dir = data_dir.to_path_buf();
        config
    }

    fn write_items_table(dir: &Path) {
        std::fs::write(
            dir.join("items.json"),
            r#"{
                "type": "DataTable",
                "columns": ["Name", "Description"],
                "rows": {
                    "Item_Potion": {"Name": "Potion", "Description": "Restores health"},
                    "Item_Sword": {"Name": "Sword", "Description": "A sharp blade"}
                }
            }"#,
        )
        .unwrap();
    }

    #[test]
    fn test_library_open() -> Result<()> {
        let assets_dir = tempdir().unwrap();
        let data_dir = tempdir().unwrap();
        write_items_table(assets_dir.path());

        let config = test_config(data_dir.path());
        let library = AssetLibrary::open_with_config(assets_dir.path(), config)?;
        assert!(library.root().exists());

        Ok(())
    }

    #[test]
    fn test_library_index_and_search() -> Result<()> {
        let assets_dir = tempdir().unwrap();
        let data_dir = tempdir().unwrap();
        write_items_table(assets_dir.path());
        std::fs::write(
            assets_dir.path().join("ui.json"),
            r#"{"type": "StringTable", "entries": {"Quit": "Quit Game"}}"#,
        )
        .unwrap();

        let config = test_config(data_dir.path());
        let library = AssetLibrary::open_with_config(assets_dir.path(), config)?;

        let stats = library.index_all()?;
        assert_eq!(stats.indexed, 2);
        assert_eq!(stats.records, 5);

        let result = library.search("sharp blade", None)?;
        assert!(!result.is_empty());
        assert!(result.hits[0].asset_path.contains("items"));
        assert_eq!(result.hits[0].row.as_deref(), Some("Item_Sword"));

        // Re-running leaves everything unchanged
        let stats = library.index_all()?;
        assert_eq!(stats.indexed, 0);
        assert_eq!(stats.unchanged, 2);

        Ok(())
    }

    #[test]
    fn test_non_asset_json_is_skipped() -> Result<()> {
        let assets_dir = tempdir().unwrap();
        let data_dir = tempdir().unwrap();
        std::fs::write(assets_dir.path().join("package.json"), r#"{"name": "x"}"#).unwrap();

        let config = test_config(data_dir.path());
        let library = AssetLibrary::open_with_config(assets_dir.path(), config)?;

        let stats = library.index_all()?;
        assert_eq!(stats.indexed, 0);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 0);

        Ok(())
    }

    #[test]
    fn test_remove_asset() -> Result<()> {
        let assets_dir = tempdir().unwrap();
        let data_dir = tempdir().unwrap();
        write_items_table(assets_dir.path());

        let config = test_config(data_dir.path());
        let library = AssetLibrary::open_with_config(assets_dir.path(), config)?;
        library.index_all()?;
        assert_eq!(library.catalog().len(), 1);

        library.remove_asset(&library.root().join("items.json"))?;
        assert_eq!(library.catalog().len(), 0);

        Ok(())
    }
}
