//! # Metadata Assembly
//!
//! The single validate → merge → build → reconcile pipeline that produces
//! both output tables. Everything is constructed fresh inside each call —
//! there is no shared template state — so concurrent invocations are safe
//! without external locking.
//!
//! Processing order:
//!
//! 1. Reject an empty target path.
//! 2. Validate every column description's attribute-key set.
//! 3. Verify the required metadata fields (`dct.format`) are present.
//! 4. Drop caller field names outside the Standard Field Template,
//!    reporting them through `log::warn!`.
//! 5. Merge surviving values into a fresh template and force
//!    `opi.dataFilePath` to the target path.
//! 6. Emit the metadata table in template order.
//! 7. Build the data dictionary — from the physical schema left-joined
//!    with the descriptions when inference is on, from the descriptions
//!    alone when it is off.
//!
//! All fatal conditions surface before either table is built; there is no
//! partial output.

use std::collections::BTreeMap;

use log::warn;
use serde_json::Value;

use crate::dictionary::{validate_descriptions, ColumnDescription, DictionaryError};
use crate::fields::{is_standard_field, terms, REQUIRED_FIELDS, STANDARD_FIELDS};
use crate::schema::{FileFormat, SchemaError, SchemaReader};
use crate::tables::{DataDictionary, DictionaryRow, MetadataRow, MetadataTable};

/// Errors that can fail an assembly
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// The target path was empty
    #[error("target path must not be empty")]
    EmptyTargetPath,

    /// A column description failed validation
    #[error("column description error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// A mandatory metadata field is absent from the defined fields
    #[error("required metadata field '{0}' is missing")]
    MissingRequiredField(String),

    /// Schema inference failed, including the unsupported-format case
    #[error("schema inference error: {0}")]
    Schema(#[from] SchemaError),
}

/// Assembles the metadata table and data dictionary for a dataset.
///
/// `target_path` identifies the stored dataset; it is recorded verbatim as
/// `opi.dataFilePath` (overriding any caller-supplied value for that term)
/// and, when `infer_dtypes` is true, passed to `schema_reader` as the
/// location to inspect. The format named in `defined_fields["dct.format"]`
/// selects the schema source; with inference off the value is recorded but
/// not interpreted.
///
/// With inference on, dictionary rows follow the physical schema: a
/// caller-declared non-null `dtype` beats the inferred one, columns without
/// a description keep the inferred dtype with null attributes, and
/// description-only columns (absent from the physical schema) are dropped.
/// With inference off, the dictionary is exactly the validated
/// descriptions, ordered by column name, and `schema_reader` is never
/// invoked.
///
/// Caller field names outside the Standard Field Template are dropped with
/// a warning; the call still succeeds.
///
/// # Errors
///
/// Fails when a column description's attribute keys do not exactly match
/// `{dtype, description, primary_key, required}`, when `dct.format` is
/// absent, when the target path is empty, or — under inference — when the
/// format is unsupported or the schema read fails.
pub fn assemble<R: SchemaReader + ?Sized>(
    target_path: &str,
    defined_fields: &BTreeMap<String, String>,
    column_descriptions: &BTreeMap<String, Value>,
    schema_reader: &R,
    infer_dtypes: bool,
) -> Result<(MetadataTable, DataDictionary), AssembleError> {
    if target_path.is_empty() {
        return Err(AssembleError::EmptyTargetPath);
    }

    let described = validate_descriptions(column_descriptions)?;

    for field in REQUIRED_FIELDS {
        if !defined_fields.contains_key(field) {
            return Err(AssembleError::MissingRequiredField(field.to_string()));
        }
    }

    let dropped: Vec<&str> = defined_fields
        .keys()
        .map(String::as_str)
        .filter(|name| !is_standard_field(name))
        .collect();
    if !dropped.is_empty() {
        warn!(
            "dropping {} field name(s) outside the standard metadata fields: {}",
            dropped.len(),
            dropped.join(", ")
        );
    }

    let metadata = build_metadata(target_path, defined_fields);

    let dictionary = if infer_dtypes {
        // Presence of dct.format was checked above; only its value can fail here.
        let format: FileFormat = defined_fields[terms::FORMAT].parse()?;
        let inferred = schema_reader.read_schema(target_path, format)?;
        let rows = inferred
            .into_iter()
            .map(|col| match described.get(&col.name) {
                Some(desc) => DictionaryRow {
                    column: col.name,
                    dtype: desc.dtype.clone().or(Some(col.dtype)),
                    description: desc.description.clone(),
                    primary_key: desc.primary_key,
                    required: desc.required,
                },
                None => DictionaryRow {
                    column: col.name,
                    dtype: Some(col.dtype),
                    description: None,
                    primary_key: None,
                    required: None,
                },
            })
            .collect();
        DataDictionary::new(rows)
    } else {
        DataDictionary::new(description_rows(&described))
    };

    Ok((metadata, dictionary))
}

/// Materializes a fresh template, merges the caller's values in, and
/// forces the data file path term.
fn build_metadata(target_path: &str, defined_fields: &BTreeMap<String, String>) -> MetadataTable {
    let rows = STANDARD_FIELDS
        .iter()
        .map(|&term| {
            let value = if term == terms::DATA_FILE_PATH {
                target_path.to_string()
            } else {
                defined_fields.get(term).cloned().unwrap_or_default()
            };
            MetadataRow {
                term: term.to_string(),
                value,
            }
        })
        .collect();
    MetadataTable::new(rows)
}

fn description_rows(described: &BTreeMap<String, ColumnDescription>) -> Vec<DictionaryRow> {
    described
        .iter()
        .map(|(column, desc)| DictionaryRow {
            column: column.clone(),
            dtype: desc.dtype.clone(),
            description: desc.description.clone(),
            primary_key: desc.primary_key,
            required: desc.required,
        })
        .collect()
}
