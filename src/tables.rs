//! # Output Tables
//!
//! The two artifacts produced by assembly: the dataset-level
//! [`MetadataTable`] (term/value rows in template order) and the
//! column-level [`DataDictionary`]. Both are plain owned values; persisting
//! them is the caller's job, so each table offers an Arrow [`RecordBatch`]
//! conversion for columnar sinks and serde-based JSON for everything else.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

/// One row of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRow {
    /// Standard field term, e.g. `dct.title`
    pub term: String,
    /// Value for the term; empty string when undefined
    pub value: String,
}

/// The dataset-level metadata table: one row per Standard Field Template
/// term, in template order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTable {
    rows: Vec<MetadataRow>,
}

impl MetadataTable {
    pub(crate) fn new(rows: Vec<MetadataRow>) -> Self {
        Self { rows }
    }

    /// Rows in template order.
    pub fn rows(&self) -> &[MetadataRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the value recorded for a term.
    pub fn value(&self, term: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.term == term)
            .map(|row| row.value.as_str())
    }

    /// Converts the table to an Arrow record batch with `term` and `value`
    /// string columns, preserving row order.
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("term", DataType::Utf8, false),
            Field::new("value", DataType::Utf8, false),
        ]));

        let terms: Vec<&str> = self.rows.iter().map(|row| row.term.as_str()).collect();
        let values: Vec<&str> = self.rows.iter().map(|row| row.value.as_str()).collect();

        let arrays: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(terms)),
            Arc::new(StringArray::from(values)),
        ];
        RecordBatch::try_new(schema, arrays)
    }

    /// Serializes the table to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One row of the data dictionary.
///
/// `dtype` is the declared type when the caller supplied one, otherwise the
/// inferred type; the remaining attributes are null for columns present in
/// the physical schema but absent from the caller's descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRow {
    /// Column name
    pub column: String,
    /// Resolved data type
    pub dtype: Option<String>,
    /// Free-text column description
    pub description: Option<String>,
    /// Whether the column is part of the primary key
    pub primary_key: Option<bool>,
    /// Whether a value is required in every row
    pub required: Option<bool>,
}

/// The column-level data dictionary: one row per dataset column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDictionary {
    rows: Vec<DictionaryRow>,
}

impl DataDictionary {
    pub(crate) fn new(rows: Vec<DictionaryRow>) -> Self {
        Self { rows }
    }

    /// Rows in physical-schema order when inferred, column-name order
    /// otherwise.
    pub fn rows(&self) -> &[DictionaryRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the dictionary has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the row for a column.
    pub fn get(&self, column: &str) -> Option<&DictionaryRow> {
        self.rows.iter().find(|row| row.column == column)
    }

    /// Converts the dictionary to an Arrow record batch.
    ///
    /// `column` is non-nullable Utf8; `dtype` and `description` are nullable
    /// Utf8; `primary_key` and `required` are nullable Boolean.
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("column", DataType::Utf8, false),
            Field::new("dtype", DataType::Utf8, true),
            Field::new("description", DataType::Utf8, true),
            Field::new("primary_key", DataType::Boolean, true),
            Field::new("required", DataType::Boolean, true),
        ]));

        let columns: Vec<&str> = self.rows.iter().map(|row| row.column.as_str()).collect();
        let dtypes: Vec<Option<&str>> = self.rows.iter().map(|row| row.dtype.as_deref()).collect();
        let descriptions: Vec<Option<&str>> = self
            .rows
            .iter()
            .map(|row| row.description.as_deref())
            .collect();
        let primary_keys: Vec<Option<bool>> =
            self.rows.iter().map(|row| row.primary_key).collect();
        let required: Vec<Option<bool>> = self.rows.iter().map(|row| row.required).collect();

        let arrays: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(columns)),
            Arc::new(StringArray::from(dtypes)),
            Arc::new(StringArray::from(descriptions)),
            Arc::new(BooleanArray::from(primary_keys)),
            Arc::new(BooleanArray::from(required)),
        ];
        RecordBatch::try_new(schema, arrays)
    }

    /// Serializes the dictionary to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    fn sample_metadata() -> MetadataTable {
        MetadataTable::new(vec![
            MetadataRow {
                term: "dct.title".to_string(),
                value: "Sales".to_string(),
            },
            MetadataRow {
                term: "dct.format".to_string(),
                value: "parquet".to_string(),
            },
        ])
    }

    fn sample_dictionary() -> DataDictionary {
        DataDictionary::new(vec![
            DictionaryRow {
                column: "id".to_string(),
                dtype: Some("bigint".to_string()),
                description: Some("row id".to_string()),
                primary_key: Some(true),
                required: Some(true),
            },
            DictionaryRow {
                column: "note".to_string(),
                dtype: Some("string".to_string()),
                description: None,
                primary_key: None,
                required: None,
            },
        ])
    }

    #[test]
    fn metadata_lookup() {
        let table = sample_metadata();
        assert_eq!(table.value("dct.title"), Some("Sales"));
        assert_eq!(table.value("dct.language"), None);
    }

    #[test]
    fn metadata_record_batch_shape() {
        let batch = sample_metadata().to_record_batch().unwrap();
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.schema().field(0).name(), "term");
    }

    #[test]
    fn dictionary_record_batch_keeps_nulls() {
        let batch = sample_dictionary().to_record_batch().unwrap();
        assert_eq!(batch.num_columns(), 5);
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.column(3).null_count(), 1);
        assert_eq!(batch.column(4).null_count(), 1);
    }

    #[test]
    fn json_round_trip() {
        let dictionary = sample_dictionary();
        let json = dictionary.to_json().unwrap();
        let back: DataDictionary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dictionary);
    }
}
