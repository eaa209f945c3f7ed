use serde_json::Value;

use crate::asset::AssetObject;
use super::{AssetIndexer, IndexRecord, IndexSink};

/// Indexes curve table assets.
///
/// Key/value samples are numeric and not worth full-text search; the curve
/// names are the searchable content.
pub struct CurveTableIndexer;

impl AssetIndexer for CurveTableIndexer {
    fn name(&self) -> &'static str {
        "CurveTable"
    }

    fn version(&self) -> u32 {
        1
    }

    fn index_asset(&self, asset: &AssetObject, sink: &mut dyn IndexSink) {
        let Some(curves) = asset.document().get("curves").and_then(Value::as_object) else {
            return;
        };

        for name in curves.keys() {
            sink.push(IndexRecord::new("Curve", name.clone()).with_row(name.clone()));
        }
    }
}
