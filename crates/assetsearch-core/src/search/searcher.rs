use std::time::Instant;

use tantivy::{collector::TopDocs, query::QueryParser, Index};

use crate::config::SearchConfig;
use crate::error::Result;
use crate::index::schema::SchemaFields;
use super::results::{SearchHit, SearchResult};

/// Search engine for querying extracted asset records
pub struct Searcher {
    config: SearchConfig,
    index: Index,
    fields: SchemaFields,
}

impl Searcher {
    /// Create a new searcher for an index
    pub fn new(config: SearchConfig, index: Index) -> Self {
        let schema = index.schema();
        let fields = SchemaFields::new(&schema);

        Self {
            config,
            index,
            fields,
        }
    }

    /// Search record text with a query string
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<SearchResult> {
        let start = Instant::now();
        let limit = limit
            .unwrap_or(self.config.default_limit)
            .min(self.config.max_limit);

        // Tantivy's TopDocs collector rejects a zero limit
        if limit == 0 {
            return Ok(SearchResult {
                total: 0,
                hits: vec![],
                query_time_ms: start.elapsed().as_millis() as u64,
            });
        }

        let reader = self.index.reader()?;
        let searcher = reader.searcher();

        let query_parser = QueryParser::for_index(&self.index, vec![self.fields.text]);

        // Extract alphanumeric words for Tantivy (it can't search special
        // chars), then post-filter for literal matches
        let search_terms: Vec<&str> = query
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| !s.is_empty())
            .collect();

        if search_terms.is_empty() {
            return Ok(SearchResult {
                total: 0,
                hits: vec![],
                query_time_ms: start.elapsed().as_millis() as u64,
            });
        }

        let tantivy_query_str = search_terms.join(" ");
        let (tantivy_query, _errors) = query_parser.parse_query_lenient(&tantivy_query_str);

        // Fetch more results since the literal filter trims them down
        let fetch_limit = limit * 10;
        let top_docs = searcher.search(&tantivy_query, &TopDocs::with_limit(fetch_limit))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        let max_score = top_docs.first().map(|(score, _)| *score).unwrap_or(1.0);

        // Case-insensitive literal matching
        let query_lower = query.to_lowercase();

        for (score, doc_address) in top_docs {
            if hits.len() >= limit {
                break;
            }

            let doc: tantivy::TantivyDocument = searcher.doc(doc_address)?;

            let text = extract_text(&doc, self.fields.text).unwrap_or_default();

            // Single-term queries match on tokens alone; multi-word queries
            // must contain the literal phrase
            if search_terms.len() > 1 && !text.to_lowercase().contains(&query_lower) {
                continue;
            }

            let normalized_score = if max_score > 0.0 { score / max_score } else { 0.0 };
            if normalized_score < self.config.min_score {
                continue;
            }

            let row = extract_text(&doc, self.fields.row).filter(|s| !s.is_empty());

            hits.push(SearchHit {
                asset_path: extract_text(&doc, self.fields.asset_path).unwrap_or_default(),
                kind: extract_text(&doc, self.fields.kind).unwrap_or_default(),
                field: extract_text(&doc, self.fields.field).unwrap_or_default(),
                row,
                text,
                score: normalized_score,
                record_id: extract_text(&doc, self.fields.record_id).unwrap_or_default(),
            });
        }

        let query_time_ms = start.elapsed().as_millis() as u64;

        Ok(SearchResult {
            total: hits.len(),
            hits,
            query_time_ms,
        })
    }

    /// Search with filters
    pub fn search_filtered(
        &self,
        query: &str,
        limit: Option<usize>,
        filters: SearchFilters,
    ) -> Result<SearchResult> {
        // The pre-filter pool is still capped at max_limit by the inner
        // search, so very selective filters are an approximation: matches
        // ranked below the cap are not recovered.
        let mut result = self.search(query, Some(limit.unwrap_or(self.config.max_limit) * 2))?;

        if let Some(ref kinds) = filters.kinds {
            result
                .hits
                .retain(|hit| kinds.iter().any(|k| k.eq_ignore_ascii_case(&hit.kind)));
        }

        if let Some(ref paths) = filters.paths {
            result.hits.retain(|hit| {
                paths
                    .iter()
                    .any(|p| hit.asset_path.starts_with(p) || hit.asset_path.contains(p))
            });
        }

        let limit = limit
            .unwrap_or(self.config.default_limit)
            .min(self.config.max_limit);
        result.hits.truncate(limit);
        result.total = result.hits.len();

        Ok(result)
    }
}

/// Filters for search
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Filter by asset kinds (e.g., ["DataTable"])
    pub kinds: Option<Vec<String>>,
    /// Filter by asset path patterns
    pub paths: Option<Vec<String>>,
}

/// Extract text value from a document
fn extract_text(doc: &tantivy::TantivyDocument, field: tantivy::schema::Field) -> Option<String> {
    doc.get_first(field).and_then(|v| {
        if let tantivy::schema::OwnedValue::Str(s) = v {
            Some(s.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::schema::build_record_schema;
    use tantivy::doc;
    use tempfile::tempdir;

    fn seed_index(index: &Index, fields: &SchemaFields) -> Result<()> {
        let mut writer = index.writer(50_000_000)?;
        writer.add_document(doc!(
            fields.record_id => "r1",
            fields.asset_path => "tables/items.json",
            fields.kind => "DataTable",
            fields.field => "Description",
            fields.row => "Item_Potion",
            fields.column => "Description",
            fields.text => "Restores a small amount of health",
            fields.ordinal => 0u64,
            fields.indexer_version => 2u64,
            fields.mtime => 0u64
        ))?;
        writer.add_document(doc!(
            fields.record_id => "r2",
            fields.asset_path => "strings/ui.json",
            fields.kind => "StringTable",
            fields.field => "Quit",
            fields.row => "Quit",
            fields.column => "",
            fields.text => "Quit Game",
            fields.ordinal => 0u64,
            fields.indexer_version => 1u64,
            fields.mtime => 0u64
        ))?;
        writer.commit()?;
        Ok(())
    }

    #[test]
    fn test_basic_search() -> Result<()> {
        let temp_dir = tempdir().unwrap();
        let schema = build_record_schema();
        let index = Index::create_in_dir(temp_dir.path(), schema.clone())?;
        let fields = SchemaFields::new(&schema);
        seed_index(&index, &fields)?;

        let searcher = Searcher::new(SearchConfig::default(), index);
        let result = searcher.search("health", None)?;

        assert_eq!(result.hits.len(), 1);
        assert_eq!(result.hits[0].asset_path, "tables/items.json");
        assert_eq!(result.hits[0].row.as_deref(), Some("Item_Potion"));
        assert_eq!(result.hits[0].field, "Description");

        Ok(())
    }

    #[test]
    fn test_kind_filter() -> Result<()> {
        let temp_dir = tempdir().unwrap();
        let schema = build_record_schema();
        let index = Index::create_in_dir(temp_dir.path(), schema.clone())?;
        let fields = SchemaFields::new(&schema);
        seed_index(&index, &fields)?;

        let searcher = Searcher::new(SearchConfig::default(), index);
        let filters = SearchFilters {
            kinds: Some(vec!["StringTable".into()]),
            paths: None,
        };
        let result = searcher.search_filtered("game", None, filters)?;

        assert_eq!(result.hits.len(), 1);
        assert_eq!(result.hits[0].kind, "StringTable");

        Ok(())
    }

    #[test]
    fn test_zero_limit_returns_empty() -> Result<()> {
        let temp_dir = tempdir().unwrap();
        let schema = build_record_schema();
        let index = Index::create_in_dir(temp_dir.path(), schema.clone())?;
        let fields = SchemaFields::new(&schema);
        seed_index(&index, &fields)?;

        let searcher = Searcher::new(SearchConfig::default(), index);
        let result = searcher.search("health", Some(0))?;
        assert!(result.is_empty());
        assert_eq!(result.total, 0);

        let result = searcher.search_filtered("health", Some(0), SearchFilters::default())?;
        assert!(result.is_empty());

        Ok(())
    }

    #[test]
    fn test_no_searchable_terms() -> Result<()> {
        let temp_dir = tempdir().unwrap();
        let schema = build_record_schema();
        let index = Index::create_in_dir(temp_dir.path(), schema.clone())?;
        let fields = SchemaFields::new(&schema);
        seed_index(&index, &fields)?;

        let searcher = Searcher::new(SearchConfig::default(), index);
        let result = searcher.search("!!!", None)?;
        assert!(result.is_empty());

        Ok(())
    }
}
