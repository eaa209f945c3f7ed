use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global assetsearch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Indexing configuration
    pub indexer: IndexerConfig,

    /// Search configuration
    pub search: SearchConfig,

    /// Output formatting
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Base directory for all index data
    pub data_dir: PathBuf,

    /// Maximum asset file size to index (bytes)
    pub max_asset_size: u64,

    /// File extensions treated as asset files
    pub asset_extensions: Vec<String>,

    /// Additional ignore patterns (glob syntax)
    pub ignore_patterns: Vec<String>,

    /// Follow symlinks while walking
    pub follow_symlinks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Default result limit
    pub default_limit: usize,

    /// Maximum results
    pub max_limit: usize,

    /// Minimum score threshold (0.0-1.0)
    pub min_score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include record text in output
    pub show_text: bool,

    /// Maximum characters of record text per result
    pub max_text_chars: usize,

    /// Show scores in output
    pub show_scores: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indexer: IndexerConfig::default(),
            search: SearchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_asset_size: 10 * 1024 * 1024, // 10MB
            asset_extensions: vec!["json".into()],
            ignore_patterns: vec![
                // Version control
                "**/.git/**".into(),
                "**/.svn/**".into(),
                // Editor-generated trees that shadow source assets
                "**/Saved/**".into(),
                "**/Intermediate/**".into(),
                "**/DerivedDataCache/**".into(),
                // Build outputs
                "**/target/**".into(),
                "**/dist/**".into(),
                "**/build/**".into(),
                // Package managers
                "**/node_modules/**".into(),
                "**/vendor/**".into(),
                // Backups and temp files
                "**/*.bak".into(),
                "**/tmp/**".into(),
                // Lock files
                "package-lock.json".into(),
                "composer.lock".into(),
            ],
            follow_symlinks: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
            min_score: 0.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_text: true,
            max_text_chars: 200,
            show_scores: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("assetsearch")
}

impl Config {
    /// Load config from default locations (in order of precedence):
    /// 1. $PWD/.assetsearch.toml
    /// 2. $XDG_CONFIG_HOME/assetsearch/config.toml
    /// 3. ~/.config/assetsearch/config.toml
    /// 4. Built-in defaults
    pub fn load() -> Self {
        // Try project-level config
        if let Ok(content) = std::fs::read_to_string(".assetsearch.toml") {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
        }

        // Try user-level config
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("assetsearch").join("config.toml");
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Load config from a specific file
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.indexer.asset_extensions, vec!["json".to_string()]);
        assert_eq!(config.search.default_limit, 10);
        assert!(config.indexer.max_asset_size > 0);
    }

    #[test]
    fn test_load_from_partial_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ndefault_limit = 25\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.search.default_limit, 25);
        // Unspecified sections fall back to defaults
        assert_eq!(config.indexer.asset_extensions, vec!["json".to_string()]);
    }
}
