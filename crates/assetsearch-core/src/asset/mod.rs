//! Loading structured asset files into in-memory asset objects

use std::path::{Path, PathBuf};

use serde_json::Value;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::{AssetSearchError, Result};

/// Key in the asset document that selects the indexer
pub const KIND_KEY: &str = "type";

/// One loaded structured asset.
///
/// Indexers get read-only access for the duration of a single indexing call
/// and must not retain a reference past it. A `Null` document stands in for
/// an asset whose payload failed to load; indexers emit nothing for it.
#[derive(Debug, Clone)]
pub struct AssetObject {
    path: PathBuf,
    kind: String,
    document: Value,
    content_hash: String,
}

impl AssetObject {
    /// Create an asset from an already-parsed document
    pub fn new(path: impl Into<PathBuf>, kind: impl Into<String>, document: Value) -> Self {
        let content_hash = hash_content(document.to_string().as_bytes());
        Self {
            path: path.into(),
            kind: kind.into(),
            document,
            content_hash,
        }
    }

    /// Create an asset with no payload (models a partially-loaded asset)
    pub fn empty(path: impl Into<PathBuf>, kind: impl Into<String>) -> Self {
        Self::new(path, kind, Value::Null)
    }

    /// Source file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Kind string routing this asset to its indexer
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The parsed document (`Null` when the payload is missing)
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Hash of the source content, used for change detection
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

/// Load an asset file and read its kind discriminator
pub fn load_asset(path: &Path, max_size: u64) -> Result<AssetObject> {
    let metadata = std::fs::metadata(path)?;
    let size = metadata.len();
    if size > max_size {
        return Err(AssetSearchError::AssetTooLarge {
            path: path.to_path_buf(),
            size,
            max: max_size,
        });
    }

    let content = std::fs::read_to_string(path)?;
    let document: Value =
        serde_json::from_str(&content).map_err(|e| AssetSearchError::AssetParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let kind = document
        .get(KIND_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| AssetSearchError::MissingKind(path.to_path_buf()))?
        .to_string();

    let content_hash = hash_content(content.as_bytes());

    Ok(AssetObject {
        path: path.to_path_buf(),
        kind,
        document,
        content_hash,
    })
}

fn hash_content(bytes: &[u8]) -> String {
    format!("{:016x}", xxh3_64(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_asset() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("items.json");
        std::fs::write(
            &path,
            r#"{"type": "DataTable", "columns": ["Name"], "rows": {}}"#,
        )
        .unwrap();

        let asset = load_asset(&path, 1024).unwrap();
        assert_eq!(asset.kind(), "DataTable");
        assert_eq!(asset.content_hash().len(), 16);
    }

    #[test]
    fn test_load_asset_too_large() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("big.json");
        std::fs::write(&path, r#"{"type": "DataTable", "rows": {}}"#).unwrap();

        let err = load_asset(&path, 4).unwrap_err();
        assert!(matches!(err, AssetSearchError::AssetTooLarge { .. }));
    }

    #[test]
    fn test_load_asset_missing_kind() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plain.json");
        std::fs::write(&path, r#"{"rows": {}}"#).unwrap();

        let err = load_asset(&path, 1024).unwrap_err();
        assert!(matches!(err, AssetSearchError::MissingKind(_)));
    }

    #[test]
    fn test_content_hash_tracks_content() {
        let a = AssetObject::new("a.json", "DataTable", json!({"rows": {"A": {}}}));
        let b = AssetObject::new("b.json", "DataTable", json!({"rows": {"A": {}}}));
        let c = AssetObject::new("c.json", "DataTable", json!({"rows": {"B": {}}}));

        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
    }
}
