//! # datadict - Dataset Metadata & Data Dictionary Generation
//!
//! `datadict` produces the two tabular artifacts data engineers ship
//! alongside a processed dataset: a dataset-level **metadata record**
//! (publisher, format, access rights, ...) and a column-level **data
//! dictionary** (data type, description, primary-key and required flags).
//!
//! ## Key Features
//!
//! - **Closed metadata schema**: a fixed, ordered template of `dct.*` /
//!   `opi.*` terms; caller values merge into a fresh template on every call,
//!   unknown names are dropped with a warning.
//!
//! - **Strict column descriptions**: every per-column description must carry
//!   exactly `dtype`, `description`, `primary_key`, and `required`; failures
//!   name the column and the offending keys before any output is produced.
//!
//! - **Schema inference**: column types can be read from the physical file —
//!   Parquet footers or header-aware CSV sampling — with caller-declared
//!   types always winning over inferred ones.
//!
//! - **Sink-agnostic outputs**: both tables convert to Arrow `RecordBatch`es
//!   or serialize to JSON; where they get written is the caller's business.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::collections::BTreeMap;
//!
//! use datadict::assembler::assemble;
//! use datadict::schema::FileSchemaReader;
//! use serde_json::json;
//!
//! let mut fields = BTreeMap::new();
//! fields.insert("dct.format".to_string(), "parquet".to_string());
//! fields.insert("dct.title".to_string(), "Monthly sales".to_string());
//! fields.insert("dct.publisher".to_string(), "Analytics".to_string());
//!
//! let mut columns = BTreeMap::new();
//! columns.insert(
//!     "id".to_string(),
//!     json!({
//!         "dtype": "int",
//!         "description": "primary id",
//!         "primary_key": true,
//!         "required": true,
//!     }),
//! );
//!
//! let reader = FileSchemaReader::new();
//! let (metadata, dictionary) =
//!     assemble("/mnt/processed/sales.parquet", &fields, &columns, &reader, true)?;
//!
//! assert_eq!(metadata.value("opi.dataFilePath"), Some("/mnt/processed/sales.parquet"));
//! for row in dictionary.rows() {
//!     println!("{}: {:?}", row.column, row.dtype);
//! }
//! # Ok::<(), datadict::assembler::AssembleError>(())
//! ```
//!
//! ## Metadata Table
//!
//! One row per Standard Field Template term, in template order:
//!
//! | term | value |
//! |------|-------|
//! | dct.accessRights | "" |
//! | ... | ... |
//! | dct.format | "parquet" |
//! | ... | ... |
//! | opi.dataFilePath | the target path, always |
//!
//! ## Data Dictionary Table
//!
//! | Column | Type | Nullable | Description |
//! |--------|------|----------|-------------|
//! | column | Utf8 | No | Column name |
//! | dtype | Utf8 | Yes | Declared type, else inferred |
//! | description | Utf8 | Yes | Free-text description |
//! | primary_key | Boolean | Yes | Part of the primary key |
//! | required | Boolean | Yes | Value required in every row |
//!
//! ## Architecture
//!
//! - [`fields`]: the Standard Field Template term set
//! - [`dictionary`]: column-description validation
//! - [`schema`]: format dispatch and physical schema inspection
//! - [`tables`]: the two output table types
//! - [`assembler`]: the assembly pipeline tying it together

pub mod assembler;
pub mod dictionary;
pub mod fields;
pub mod schema;
pub mod tables;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::assembler::{assemble, AssembleError};
    pub use crate::dictionary::{
        validate_descriptions, ColumnDescription, DictionaryError, REQUIRED_ATTRIBUTES,
    };
    pub use crate::fields::{is_standard_field, terms, REQUIRED_FIELDS, STANDARD_FIELDS};
    pub use crate::schema::{
        dtype_name, FileFormat, FileSchemaReader, InferredColumn, SchemaError, SchemaReader,
        SchemaReaderConfig,
    };
    pub use crate::tables::{DataDictionary, DictionaryRow, MetadataRow, MetadataTable};
}
