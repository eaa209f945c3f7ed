use serde::{Deserialize, Serialize};

/// Result of a search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Search hits
    pub hits: Vec<SearchHit>,
    /// Number of hits returned (equals `hits.len()`)
    pub total: usize,
    /// Query execution time in milliseconds
    pub query_time_ms: u64,
}

/// A single search hit: one extracted record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Asset path (relative to library root)
    pub asset_path: String,
    /// Asset kind
    pub kind: String,
    /// Field the text was extracted from
    pub field: String,
    /// Row identifier, when the asset is tabular
    pub row: Option<String>,
    /// The extracted text
    pub text: String,
    /// Relevance score (0.0-1.0)
    pub score: f32,
    /// Record ID
    pub record_id: String,
}

impl SearchHit {
    /// Format the record location within its asset (e.g., "Item_Sword.Name")
    pub fn location(&self) -> String {
        match &self.row {
            Some(row) => format!("{}.{}", row, self.field),
            None => self.field.clone(),
        }
    }
}

impl SearchResult {
    /// Create an empty result
    pub fn empty() -> Self {
        Self {
            hits: vec![],
            total: 0,
            query_time_ms: 0,
        }
    }

    /// Check if there are any results
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Format results compactly (minimal tokens)
    pub fn format_compact(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "# {} results ({:.1}ms)\n\n",
            self.hits.len(),
            self.query_time_ms as f64
        ));

        for (i, hit) in self.hits.iter().enumerate() {
            output.push_str(&format!(
                "{}. `{}:{}`\n",
                i + 1,
                hit.asset_path,
                hit.location()
            ));

            let text = truncate_text(&hit.text, 200);
            if !text.is_empty() {
                output.push_str(&format!("   {}\n", text));
            }
        }

        output
    }

    /// Format results as JSON
    pub fn format_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format results for human-readable output
    pub fn format_pretty(&self, show_scores: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Found {} results in {:.1}ms\n",
            self.hits.len(),
            self.query_time_ms as f64
        ));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        for hit in &self.hits {
            output.push_str(&format!(
                "\n{} [{}] {}\n",
                hit.asset_path,
                hit.kind,
                hit.location()
            ));
            if show_scores {
                output.push_str(&format!("   Score: {:.2}\n", hit.score));
            }

            let text = truncate_text(&hit.text, 300);
            if !text.is_empty() {
                output.push_str(&format!("   | {}\n", text));
            }
        }

        output
    }
}

/// Truncate text to a maximum character length
fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let truncated: String = s.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit() -> SearchHit {
        SearchHit {
            asset_path: "tables/items.json".to_string(),
            kind: "DataTable".to_string(),
            field: "Name".to_string(),
            row: Some("Item_Sword".to_string()),
            text: "Sword".to_string(),
            score: 0.9,
            record_id: "abc:0".to_string(),
        }
    }

    #[test]
    fn test_location() {
        assert_eq!(hit().location(), "Item_Sword.Name");

        let rowless = SearchHit { row: None, ..hit() };
        assert_eq!(rowless.location(), "Name");
    }

    #[test]
    fn test_format_compact() {
        let result = SearchResult {
            hits: vec![hit()],
            total: 1,
            query_time_ms: 15,
        };

        let output = result.format_compact();
        assert!(output.contains("# 1 results"));
        assert!(output.contains("tables/items.json:Item_Sword.Name"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("0123456789abc", 10), "0123456789...");
    }
}
