use anyhow::{Context, Result};
use std::path::Path;

use assetsearch_core::AssetLibrary;

pub fn run(library_path: &Path, detailed: bool) -> Result<()> {
    let library = AssetLibrary::open(library_path).context("Failed to open asset library")?;

    println!("assetsearch status");
    println!("==================");
    println!();
    println!("Library: {}", library.root().display());
    println!("Index path: {}", library.index_path().display());
    println!(
        "Indexed: {}",
        if library.is_indexed() { "yes" } else { "no" }
    );
    println!("Cataloged assets: {}", library.catalog().len());

    if detailed {
        println!();
        println!("Registered indexers:");
        for indexer in library.registry().iter() {
            println!("  {} (v{})", indexer.name(), indexer.version());
        }
    }

    Ok(())
}
