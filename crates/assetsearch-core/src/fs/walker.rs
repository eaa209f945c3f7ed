use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::IndexerConfig;
use crate::error::Result;

/// Walks a directory tree collecting candidate asset files
pub struct AssetWalker {
    root: PathBuf,
    config: IndexerConfig,
}

impl AssetWalker {
    pub fn new(root: PathBuf, config: IndexerConfig) -> Result<Self> {
        tracing::debug!(
            "AssetWalker initialized with {} ignore patterns",
            config.ignore_patterns.len()
        );

        Ok(Self { root, config })
    }

    /// Iterate over all candidate asset files in the directory tree
    pub fn walk(&self) -> impl Iterator<Item = WalkEntry> + '_ {
        let follow_links = self.config.follow_symlinks;

        WalkDir::new(&self.root)
            .follow_links(follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| {
                // Skip hidden files/directories (the root itself is exempt
                // so temp and dot-prefixed library roots still walk)
                if e.depth() > 0 && is_hidden(e) {
                    return false;
                }

                // Skip common generated/dependency directories outright
                if e.file_type().is_dir() {
                    let dir_name = e.file_name().to_string_lossy();

                    let dominated = matches!(
                        dir_name.as_ref(),
                        "Saved" | "Intermediate" | "DerivedDataCache" | "node_modules"
                            | "vendor" | "target" | "dist" | "build" | "tmp" | ".git"
                    );

                    if dominated {
                        return false;
                    }
                }

                true
            })
            .filter_map(|entry| entry.ok())
            .filter_map(move |entry| {
                let path = entry.path();

                if entry.file_type().is_dir() {
                    return None;
                }

                if self.matches_ignore_pattern(path) {
                    return None;
                }

                if !self.is_asset_file(path) {
                    return None;
                }

                Some(WalkEntry {
                    path: path.to_path_buf(),
                })
            })
    }

    /// Check if path matches custom ignore patterns
    fn matches_ignore_pattern(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.config.ignore_patterns {
            if glob_match(pattern, &path_str) {
                return true;
            }
        }

        false
    }

    /// Check if a file looks like an indexable asset
    fn is_asset_file(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();
            self.config
                .asset_extensions
                .iter()
                .any(|e| e.to_lowercase() == ext_str)
        } else {
            false
        }
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// An entry from walking the directory tree
#[derive(Debug, Clone)]
pub struct WalkEntry {
    pub path: PathBuf,
}

/// Check if a directory entry is hidden (starts with .)
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Simple glob matching for ignore patterns
pub(crate) fn glob_match(pattern: &str, path: &str) -> bool {
    // Handle **/dir/** patterns (match dir anywhere in path)
    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        let dir_name = &pattern[3..pattern.len() - 3];
        return path.contains(&format!("/{}/", dir_name))
            || path.starts_with(&format!("{}/", dir_name))
            || path.ends_with(&format!("/{}", dir_name));
    }

    // Handle **/*.ext patterns (match extension anywhere)
    if pattern.starts_with("**/*.") {
        let ext = &pattern[5..];
        return path.ends_with(&format!(".{}", ext));
    }

    // Handle **/something patterns (match at end)
    if pattern.starts_with("**/") {
        let suffix = &pattern[3..];
        return path.ends_with(suffix) || path.ends_with(&format!("/{}", suffix));
    }

    // Handle something/** patterns (match at start)
    if pattern.ends_with("/**") {
        let prefix = &pattern[..pattern.len() - 3];
        return path.starts_with(prefix) || path.contains(&format!("/{}", prefix));
    }

    // Handle simple * patterns (*.ext)
    if pattern.starts_with("*.") {
        let ext = &pattern[2..];
        return path.ends_with(&format!(".{}", ext));
    }

    // Exact match or path component match
    path == pattern
        || path.ends_with(&format!("/{}", pattern))
        || path.contains(&format!("/{}/", pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_walk_finds_asset_files() {
        let temp_dir = tempdir().unwrap();

        std::fs::write(temp_dir.path().join("items.json"), "{}").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "not an asset").unwrap();
        std::fs::create_dir(temp_dir.path().join("tables")).unwrap();
        std::fs::write(temp_dir.path().join("tables/loot.json"), "{}").unwrap();

        let config = IndexerConfig::default();
        let walker = AssetWalker::new(temp_dir.path().to_path_buf(), config).unwrap();

        let entries: Vec<_> = walker.walk().collect();
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .all(|e| e.path.extension().unwrap() == "json"));
    }

    #[test]
    fn test_walk_skips_generated_dirs() {
        let temp_dir = tempdir().unwrap();

        std::fs::create_dir(temp_dir.path().join("Saved")).unwrap();
        std::fs::write(temp_dir.path().join("Saved/autosave.json"), "{}").unwrap();
        std::fs::write(temp_dir.path().join("items.json"), "{}").unwrap();

        let config = IndexerConfig::default();
        let walker = AssetWalker::new(temp_dir.path().to_path_buf(), config).unwrap();

        let entries: Vec<_> = walker.walk().collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].path.ends_with("items.json"));
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("**/Saved/**", "proj/Saved/autosave.json"));
        assert!(glob_match("**/.git/**", "proj/.git/config"));
        assert!(glob_match("*.bak", "items.json.bak"));
        assert!(glob_match("**/*.bak", "tables/items.bak"));
        assert!(!glob_match("*.bak", "items.json"));
    }
}
