//! Per-asset record of which indexer produced its stored index entries
//!
//! This is the host side of the versioning contract: for each indexed asset
//! the catalog persists the indexer name, indexer version, and content hash
//! used to produce the stored records. A mismatch on any of them means the
//! stored entries are stale and the asset is re-indexed. A version mismatch
//! is the designed invalidation mechanism, never an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{AssetSearchError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Name of the indexer that produced the stored records
    pub indexer: String,
    /// Indexer version at the time of indexing
    pub version: u32,
    /// Hash of the asset content at the time of indexing
    pub content_hash: String,
    /// RFC3339 timestamp of the indexing run
    pub indexed_at: String,
}

pub struct Catalog {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, CatalogEntry>>,
}

impl Catalog {
    /// Open a catalog file, starting empty if it does not exist
    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| AssetSearchError::Catalog(e.to_string()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Whether the stored records for an asset must be regenerated
    pub fn is_stale(&self, asset: &str, indexer: &str, version: u32, content_hash: &str) -> bool {
        match self.entries.read().get(asset) {
            Some(entry) => {
                entry.indexer != indexer
                    || entry.version != version
                    || entry.content_hash != content_hash
            }
            None => true,
        }
    }

    /// Record a completed indexing run for an asset
    pub fn record(&self, asset: &str, indexer: &str, version: u32, content_hash: &str) {
        let entry = CatalogEntry {
            indexer: indexer.to_string(),
            version,
            content_hash: content_hash.to_string(),
            indexed_at: chrono::Utc::now().to_rfc3339(),
        };
        self.entries.write().insert(asset.to_string(), entry);
    }

    /// Forget an asset, returning whether it was known
    pub fn remove(&self, asset: &str) -> bool {
        self.entries.write().remove(asset).is_some()
    }

    pub fn get(&self, asset: &str) -> Option<CatalogEntry> {
        self.entries.read().get(asset).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Persist the catalog to disk
    pub fn save(&self) -> Result<()> {
        let entries = self.entries.read();
        let content = serde_json::to_string_pretty(&*entries)
            .map_err(|e| AssetSearchError::Catalog(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
