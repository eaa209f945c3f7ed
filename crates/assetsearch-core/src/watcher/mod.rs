//! File system watcher for incremental index updates

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify_debouncer_full::{
    new_debouncer,
    notify::{self, RecommendedWatcher, RecursiveMode},
    DebounceEventResult, Debouncer, RecommendedCache,
};

use crate::config::IndexerConfig;
use crate::error::{AssetSearchError, Result};
use crate::fs::glob_match;

/// Events emitted by the asset watcher
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// Asset file was created or modified
    Changed(PathBuf),
    /// Asset file was deleted
    Deleted(PathBuf),
    /// Error occurred while watching
    Error(String),
}

/// File system watcher with debouncing, filtered to asset files
pub struct AssetWatcher {
    root: PathBuf,
    debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
    event_rx: mpsc::Receiver<WatchEvent>,
}

impl AssetWatcher {
    /// Create a new watcher for the given library root
    pub fn new(root: PathBuf, config: IndexerConfig) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        // Create debouncer with 500ms delay
        let debouncer = new_debouncer(
            Duration::from_millis(500),
            None,
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    // Deduplicate by path so one save doesn't index twice
                    let mut seen_changed: HashSet<PathBuf> = HashSet::new();
                    let mut seen_deleted: HashSet<PathBuf> = HashSet::new();

                    for event in events {
                        for e in process_notify_event(&event, &config) {
                            match &e {
                                WatchEvent::Changed(p) => {
                                    if seen_changed.insert(p.clone()) {
                                        let _ = event_tx.send(e);
                                    }
                                }
                                WatchEvent::Deleted(p) => {
                                    if seen_deleted.insert(p.clone()) {
                                        let _ = event_tx.send(e);
                                    }
                                }
                                WatchEvent::Error(_) => {
                                    let _ = event_tx.send(e);
                                }
                            }
                        }
                    }
                }
                Err(errors) => {
                    for e in errors {
                        let _ = event_tx.send(WatchEvent::Error(e.to_string()));
                    }
                }
            },
        )
        .map_err(|e| AssetSearchError::Watch(e.to_string()))?;

        Ok(Self {
            root,
            debouncer,
            event_rx,
        })
    }

    /// Start watching the library root
    pub fn start(&mut self) -> Result<()> {
        self.debouncer
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|e| AssetSearchError::Watch(e.to_string()))?;

        tracing::info!("Started watching: {}", self.root.display());
        Ok(())
    }

    /// Stop watching
    pub fn stop(&mut self) -> Result<()> {
        self.debouncer
            .unwatch(&self.root)
            .map_err(|e| AssetSearchError::Watch(e.to_string()))?;

        tracing::info!("Stopped watching: {}", self.root.display());
        Ok(())
    }

    /// Block until the next watch event (None when the watcher shut down)
    pub fn next_event(&self) -> Option<WatchEvent> {
        self.event_rx.recv().ok()
    }

    /// Wait for the next watch event with a timeout
    pub fn next_event_timeout(&self, timeout: Duration) -> Option<WatchEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Get the root directory being watched
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Convert a notify event into asset watch events
fn process_notify_event(
    event: &notify_debouncer_full::DebouncedEvent,
    config: &IndexerConfig,
) -> Vec<WatchEvent> {
    use notify::EventKind;

    let mut events = Vec::new();

    for path in &event.paths {
        // Skip hidden files/directories
        if is_hidden(path) {
            continue;
        }

        // Only asset files are interesting
        if !has_asset_extension(path, config) {
            continue;
        }

        if matches_ignore_pattern(path, config) {
            continue;
        }

        match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) => {
                if path.is_file() {
                    events.push(WatchEvent::Changed(path.clone()));
                }
            }
            EventKind::Remove(_) => {
                events.push(WatchEvent::Deleted(path.clone()));
            }
            _ => {}
        }
    }

    events
}

/// Check if a path is hidden (any component starts with .)
fn is_hidden(path: &Path) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| s.starts_with('.') && s.len() > 1 && !s.starts_with(".."))
            .unwrap_or(false)
    })
}

/// Check if the file carries a configured asset extension
fn has_asset_extension(path: &Path, config: &IndexerConfig) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext_str = ext.to_string_lossy().to_lowercase();
            config
                .asset_extensions
                .iter()
                .any(|e| e.to_lowercase() == ext_str)
        }
        None => false,
    }
}

/// Check if path matches custom ignore patterns
fn matches_ignore_pattern(path: &Path, config: &IndexerConfig) -> bool {
    let path_str = path.to_string_lossy();

    config
        .ignore_patterns
        .iter()
        .any(|pattern| glob_match(pattern, &path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new("/proj/.git/config")));
        assert!(is_hidden(Path::new("/proj/.hidden.json")));
        assert!(!is_hidden(Path::new("/proj/tables/items.json")));
    }

    #[test]
    fn test_has_asset_extension() {
        let config = IndexerConfig::default();
        assert!(has_asset_extension(Path::new("items.json"), &config));
        assert!(has_asset_extension(Path::new("ITEMS.JSON"), &config));
        assert!(!has_asset_extension(Path::new("items.txt"), &config));
        assert!(!has_asset_extension(Path::new("Makefile"), &config));
    }

    #[test]
    fn test_matches_ignore_pattern() {
        let config = IndexerConfig::default();
        assert!(matches_ignore_pattern(
            Path::new("/proj/Saved/autosave.json"),
            &config
        ));
        assert!(!matches_ignore_pattern(
            Path::new("/proj/tables/items.json"),
            &config
        ));
    }
}
