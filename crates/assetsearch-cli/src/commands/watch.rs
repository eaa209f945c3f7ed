use anyhow::{Context, Result};
use std::path::Path;

use assetsearch_core::{AssetLibrary, WatchEvent};

pub fn run(library_path: &Path) -> Result<()> {
    let library = AssetLibrary::open(library_path).context("Failed to open asset library")?;

    // Make sure the index is current before watching
    if !library.is_indexed() {
        eprintln!("Indexing {} first...", library.root().display());
        library.index_all().context("Failed to index library")?;
    }

    let mut watcher = library.create_watcher().context("Failed to create watcher")?;
    watcher.start().context("Failed to start watcher")?;

    eprintln!("Watching {} (Ctrl-C to stop)", library.root().display());

    while let Some(event) = watcher.next_event() {
        match event {
            WatchEvent::Changed(path) => {
                eprintln!("  changed: {}", path.display());
                if let Err(e) = library.index_asset(&path) {
                    tracing::warn!("Failed to re-index {}: {}", path.display(), e);
                }
            }
            WatchEvent::Deleted(path) => {
                eprintln!("  deleted: {}", path.display());
                if let Err(e) = library.remove_asset(&path) {
                    tracing::warn!("Failed to remove {}: {}", path.display(), e);
                }
            }
            WatchEvent::Error(message) => {
                tracing::warn!("Watch error: {}", message);
            }
        }
    }

    Ok(())
}
