use anyhow::{Context, Result};
use std::path::Path;

use assetsearch_core::AssetLibrary;

use crate::OutputFormat;

pub fn run(
    library_path: &Path,
    query: &str,
    limit: usize,
    kinds: Vec<String>,
    paths: Vec<String>,
    show_scores: bool,
    format: OutputFormat,
) -> Result<()> {
    let library = AssetLibrary::open(library_path).context("Failed to open asset library")?;

    // Index on first use
    if !library.is_indexed() {
        eprintln!("Library not indexed. Run `assetsearch index` first.");
        eprintln!("Indexing now...");

        let stats = library.index_all().context("Failed to index library")?;

        eprintln!(
            "Indexed {} assets ({} skipped, {} errors)",
            stats.indexed, stats.skipped, stats.errors
        );
    }

    let kind_filter = if kinds.is_empty() { None } else { Some(kinds) };
    let path_filter = if paths.is_empty() { None } else { Some(paths) };

    let result = library
        .search_filtered(query, Some(limit), kind_filter, path_filter)
        .context("Search failed")?;

    let output = match format {
        OutputFormat::Compact => result.format_compact(),
        OutputFormat::Json => result.format_json(),
        OutputFormat::Pretty => result.format_pretty(show_scores),
    };

    print!("{}", output);

    Ok(())
}
