use serde_json::Value;

use crate::asset::AssetObject;
use super::{AssetIndexer, IndexRecord, IndexSink};

/// Indexes string table assets: one record per entry, keyed by entry name.
pub struct StringTableIndexer;

impl AssetIndexer for StringTableIndexer {
    fn name(&self) -> &'static str {
        "StringTable"
    }

    fn version(&self) -> u32 {
        1
    }

    fn index_asset(&self, asset: &AssetObject, sink: &mut dyn IndexSink) {
        let Some(entries) = asset.document().get("entries").and_then(Value::as_object) else {
            return;
        };

        for (key, value) in entries {
            // String table entries are text by definition; anything else is
            // malformed and skipped.
            let Some(text) = value.as_str() else {
                tracing::debug!(
                    "Skipping non-string entry '{}' in {}",
                    key,
                    asset.path().display()
                );
                continue;
            };

            sink.push(IndexRecord::new(key.clone(), text).with_row(key.clone()));
        }
    }
}
