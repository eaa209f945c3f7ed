use anyhow::{Context, Result};
use std::path::Path;

use assetsearch_core::AssetLibrary;

pub fn run(library_path: &Path) -> Result<()> {
    let library = AssetLibrary::open(library_path).context("Failed to open asset library")?;

    println!("Registered asset indexers:");
    for indexer in library.registry().iter() {
        println!("  {:<16} v{}", indexer.name(), indexer.version());
    }

    Ok(())
}
