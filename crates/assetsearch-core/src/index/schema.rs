use tantivy::schema::{
    IndexRecordOption, Schema, TextFieldIndexing, TextOptions, FAST, STORED, STRING,
};

/// Field names for the record index
pub mod fields {
    pub const RECORD_ID: &str = "record_id";
    pub const ASSET_PATH: &str = "asset_path";
    pub const KIND: &str = "kind";
    pub const FIELD: &str = "field";
    pub const ROW: &str = "row";
    pub const COLUMN: &str = "column";
    pub const TEXT: &str = "text";
    pub const ORDINAL: &str = "ordinal";
    pub const INDEXER_VERSION: &str = "indexer_version";
    pub const MTIME: &str = "mtime";
}

/// Build the Tantivy schema for asset record indexing
pub fn build_record_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    // Text field with positions for phrase queries
    let text_options = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer("default")
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored();

    // Record identification
    schema_builder.add_text_field(fields::RECORD_ID, STRING | STORED);
    schema_builder.add_text_field(fields::ASSET_PATH, STRING | STORED);
    schema_builder.add_text_field(fields::KIND, STRING | STORED);

    // Structured record metadata
    schema_builder.add_text_field(fields::FIELD, STRING | STORED);
    schema_builder.add_text_field(fields::ROW, STRING | STORED);
    schema_builder.add_text_field(fields::COLUMN, STRING | STORED);

    // Extracted text for full-text search
    schema_builder.add_text_field(fields::TEXT, text_options);

    // Emission order within the asset
    schema_builder.add_u64_field(fields::ORDINAL, FAST | STORED);

    // Version of the indexer that produced the record
    schema_builder.add_u64_field(fields::INDEXER_VERSION, FAST | STORED);

    // Source file modification time
    schema_builder.add_u64_field(fields::MTIME, FAST | STORED);

    schema_builder.build()
}

/// Schema field handles for efficient access
#[derive(Clone)]
pub struct SchemaFields {
    pub record_id: tantivy::schema::Field,
    pub asset_path: tantivy::schema::Field,
    pub kind: tantivy::schema::Field,
    pub field: tantivy::schema::Field,
    pub row: tantivy::schema::Field,
    pub column: tantivy::schema::Field,
    pub text: tantivy::schema::Field,
    pub ordinal: tantivy::schema::Field,
    pub indexer_version: tantivy::schema::Field,
    pub mtime: tantivy::schema::Field,
}

impl SchemaFields {
    pub fn new(schema: &Schema) -> Self {
        Self {
            record_id: schema.get_field(fields::RECORD_ID).unwrap(),
            asset_path: schema.get_field(fields::ASSET_PATH).unwrap(),
            kind: schema.get_field(fields::KIND).unwrap(),
            field: schema.get_field(fields::FIELD).unwrap(),
            row: schema.get_field(fields::ROW).unwrap(),
            column: schema.get_field(fields::COLUMN).unwrap(),
            text: schema.get_field(fields::TEXT).unwrap(),
            ordinal: schema.get_field(fields::ORDINAL).unwrap(),
            indexer_version: schema.get_field(fields::INDEXER_VERSION).unwrap(),
            mtime: schema.get_field(fields::MTIME).unwrap(),
        }
    }
}
