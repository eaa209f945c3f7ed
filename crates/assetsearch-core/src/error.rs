use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetSearchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    #[error("Query parse error: {0}")]
    QueryParse(#[from] tantivy::query::QueryParserError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse asset {path}: {source}")]
    AssetParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Asset has no kind discriminator: {0}")]
    MissingKind(PathBuf),

    #[error("No indexer registered for asset kind: {0}")]
    UnknownKind(String),

    #[error("Indexer already registered for kind: {0}")]
    DuplicateIndexer(String),

    #[error("Asset too large: {path} ({size} bytes, max {max} bytes)")]
    AssetTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Watch error: {0}")]
    Watch(String),

    #[error("Index directory error: {0}")]
    IndexDirectory(#[from] tantivy::directory::error::OpenDirectoryError),
}

pub type Result<T> = std::result::Result<T, AssetSearchError>;
