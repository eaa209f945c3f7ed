use serde_json::Value;

use crate::asset::AssetObject;
use super::{flatten_value, AssetIndexer, IndexRecord, IndexSink};

/// Indexes data table assets.
///
/// A data table document carries a `columns` array naming the row schema and
/// a `rows` object mapping row name to a field object. One record is emitted
/// per present field across all rows, tagged with its row and column
/// identifiers. Rows iterate in name order and fields in schema order, so
/// repeated runs on an unmodified asset produce identical record sequences.
pub struct DataTableIndexer;

impl AssetIndexer for DataTableIndexer {
    fn name(&self) -> &'static str {
        "DataTable"
    }

    fn version(&self) -> u32 {
        // v2: nested field values flatten to compact JSON instead of being
        // dropped
        2
    }

    fn index_asset(&self, asset: &AssetObject, sink: &mut dyn IndexSink) {
        let document = asset.document();

        // The schema is authoritative for field enumeration; without it
        // there is nothing indexable in this asset.
        let Some(columns) = document.get("columns").and_then(Value::as_array) else {
            return;
        };
        let columns: Vec<&str> = columns.iter().filter_map(Value::as_str).collect();

        let Some(rows) = document.get("rows").and_then(Value::as_object) else {
            return;
        };

        for (row_name, row) in rows {
            let Some(fields) = row.as_object() else {
                tracing::debug!(
                    "Skipping malformed row '{}' in {}",
                    row_name,
                    asset.path().display()
                );
                continue;
            };

            for column in &columns {
                // Absent or null fields are "missing" and emit nothing;
                // an empty string is a value and still emits a record.
                let Some(value) = fields.get(*column) else {
                    continue;
                };
                let Some(text) = flatten_value(value) else {
                    continue;
                };

                sink.push(
                    IndexRecord::new(*column, text)
                        .with_row(row_name.clone())
                        .with_column(*column),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::RecordBuffer;
    use serde_json::json;

    fn data_table(document: Value) -> AssetObject {
        AssetObject::new("items.json", "DataTable", document)
    }

    fn index(asset: &AssetObject) -> Vec<IndexRecord> {
        let mut sink = RecordBuffer::new();
        DataTableIndexer.index_asset(asset, &mut sink);
        sink.records
    }

    #[test]
    fn test_two_rows_three_fields() {
        let asset = data_table(json!({
            "type": "DataTable",
            "columns": ["Name", "Description", "Price"],
            "rows": {
                "Item_Potion": {"Name": "Potion", "Description": "Restores health", "Price": 25},
                "Item_Sword": {"Name": "Sword", "Description": "A sharp blade", "Price": 100},
            }
        }));

        let records = index(&asset);
        assert_eq!(records.len(), 6);

        // Every record is tagged with its row and field
        for record in &records {
            assert!(record.meta.row.is_some());
            assert_eq!(record.meta.column.as_deref(), Some(record.field.as_str()));
        }

        assert_eq!(records[0].meta.row.as_deref(), Some("Item_Potion"));
        assert_eq!(records[0].field, "Name");
        assert_eq!(records[0].text, "Potion");
        assert_eq!(records[2].text, "25");
        assert_eq!(records[3].meta.row.as_deref(), Some("Item_Sword"));
    }

    #[test]
    fn test_empty_table_emits_nothing() {
        let asset = data_table(json!({
            "type": "DataTable",
            "columns": ["Name"],
            "rows": {}
        }));
        assert!(index(&asset).is_empty());
    }

    #[test]
    fn test_empty_string_is_a_value() {
        let asset = data_table(json!({
            "type": "DataTable",
            "columns": ["Name", "Description"],
            "rows": {
                "Item_Rock": {"Name": "Rock", "Description": ""}
            }
        }));

        let records = index(&asset);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].field, "Description");
        assert_eq!(records[1].text, "");
    }

    #[test]
    fn test_null_and_absent_fields_are_missing() {
        let asset = data_table(json!({
            "type": "DataTable",
            "columns": ["Name", "Description", "Price"],
            "rows": {
                "Item_Stick": {"Name": "Stick", "Description": null}
            }
        }));

        let records = index(&asset);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field, "Name");
    }

    #[test]
    fn test_null_document_is_noop() {
        let asset = AssetObject::empty("broken.json", "DataTable");
        assert!(index(&asset).is_empty());
    }

    #[test]
    fn test_missing_schema_emits_nothing() {
        let asset = data_table(json!({
            "type": "DataTable",
            "rows": {"Item_Sword": {"Name": "Sword"}}
        }));
        assert!(index(&asset).is_empty());
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let asset = data_table(json!({
            "type": "DataTable",
            "columns": ["Name"],
            "rows": {
                "Bad": "not an object",
                "Good": {"Name": "Shield"}
            }
        }));

        let records = index(&asset);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "Shield");
    }

    #[test]
    fn test_repeated_indexing_is_identical() {
        let asset = data_table(json!({
            "type": "DataTable",
            "columns": ["Name", "Tags"],
            "rows": {
                "B": {"Name": "Bow", "Tags": ["ranged", "wood"]},
                "A": {"Name": "Axe", "Tags": ["melee"]},
            }
        }));

        let first = index(&asset);
        let second = index(&asset);
        assert_eq!(first, second);

        // Rows come out in name order regardless of document order
        assert_eq!(first[0].meta.row.as_deref(), Some("A"));
        assert_eq!(first[1].text, r#"["melee"]"#);
    }

    #[test]
    fn test_version_is_stable() {
        assert_eq!(DataTableIndexer.version(), DataTableIndexer.version());
    }
}
