use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

use assetsearch_core::AssetLibrary;

pub fn run(library_path: &Path, rebuild: bool) -> Result<()> {
    let start = Instant::now();

    eprintln!("Indexing {}...", library_path.display());

    if rebuild {
        eprintln!("Rebuilding index from scratch...");
        // Delete existing index directory
        if let Ok(library) = AssetLibrary::open(library_path) {
            let index_path = library.index_path().to_path_buf();
            drop(library); // Release the library before deleting
            if index_path.exists() {
                std::fs::remove_dir_all(&index_path)
                    .context("Failed to remove existing index")?;
                eprintln!("  Cleared old index at {}", index_path.display());
            }
        }
    }

    // Open library (creates fresh index if rebuilt)
    let library = AssetLibrary::open(library_path).context("Failed to open asset library")?;

    let stats = library.index_all().context("Failed to index library")?;

    let elapsed = start.elapsed();

    eprintln!();
    eprintln!("Indexing complete in {:.2}s", elapsed.as_secs_f64());
    eprintln!("  Assets indexed: {}", stats.indexed);
    eprintln!("  Assets unchanged: {}", stats.unchanged);
    eprintln!("  Files skipped: {}", stats.skipped);
    eprintln!("  Errors: {}", stats.errors);
    eprintln!("  Records emitted: {}", stats.records);
    eprintln!();
    eprintln!("Index stored at: {}", library.index_path().display());

    Ok(())
}
