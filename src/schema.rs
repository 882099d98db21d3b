//! # Physical Schema Inspection
//!
//! Schema inference reads the column names and types of a dataset as it is
//! actually persisted, without touching the data values. The assembler only
//! consults this module when dtype inference is enabled; declared types
//! always win over inferred ones.
//!
//! Dispatch over the dataset format is a closed enum ([`FileFormat`]) with
//! an explicit error for anything outside the supported set, so an
//! unrecognized format can never leave the schema source undefined.
//!
//! The [`SchemaReader`] trait is the seam between the assembler and the
//! storage layer: the bundled [`FileSchemaReader`] handles files reachable
//! through a path (local disk, mounted object storage); other stores
//! implement the trait.

use std::fs::File;
use std::io::BufReader;
use std::str::FromStr;

use arrow::csv::reader::Format;
use arrow::datatypes::DataType;
use parquet::arrow::parquet_to_arrow_schema;
use parquet::file::reader::{FileReader, SerializedFileReader};

/// Errors that can occur while reading a physical schema
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// I/O error opening or reading the dataset file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parquet footer decoding error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow schema conversion or CSV inference error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// The declared dataset format is not in the supported set
    #[error("unsupported data file format '{0}' (supported: parquet, csv)")]
    UnsupportedFormat(String),
}

/// Supported dataset file formats.
///
/// This is the closed set of identifiers accepted in the `dct.format`
/// metadata field when schema inference is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Apache Parquet; schema read from the file footer
    Parquet,
    /// Delimited text; first row is a header line, types sampled from rows
    Csv,
}

impl FileFormat {
    /// Canonical lowercase identifier for this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for FileFormat {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parquet" => Ok(Self::Parquet),
            "csv" => Ok(Self::Csv),
            _ => Err(SchemaError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a physical schema: its name and inferred dtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredColumn {
    /// Column name as persisted
    pub name: String,
    /// Inferred dtype, in the dictionary's dtype vocabulary
    pub dtype: String,
}

/// Capability to read the physical schema of a stored dataset.
///
/// Given a location and a [`FileFormat`], implementations return the
/// `(name, dtype)` pairs of every column as currently persisted. The
/// assembler invokes this exactly once per call, and only when dtype
/// inference is enabled.
pub trait SchemaReader {
    /// Reads the column names and types of the dataset at `location`.
    fn read_schema(
        &self,
        location: &str,
        format: FileFormat,
    ) -> Result<Vec<InferredColumn>, SchemaError>;
}

/// Configuration for [`FileSchemaReader`]
#[derive(Debug, Clone)]
pub struct SchemaReaderConfig {
    /// Maximum number of CSV rows sampled for type inference.
    /// `None` scans the whole file.
    pub csv_sample_rows: Option<usize>,
}

impl Default for SchemaReaderConfig {
    fn default() -> Self {
        Self {
            csv_sample_rows: Some(1000),
        }
    }
}

/// File-backed [`SchemaReader`] for Parquet and CSV datasets.
///
/// Parquet schemas come from the file footer; CSV schemas come from the
/// header row (names) and a bounded sample of data rows (types).
#[derive(Debug, Clone, Default)]
pub struct FileSchemaReader {
    config: SchemaReaderConfig,
}

impl FileSchemaReader {
    /// Creates a reader with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader with a custom configuration.
    pub fn with_config(config: SchemaReaderConfig) -> Self {
        Self { config }
    }

    fn read_parquet_schema(&self, location: &str) -> Result<Vec<InferredColumn>, SchemaError> {
        let file = File::open(location)?;
        let reader = SerializedFileReader::new(file)?;
        let file_meta = reader.metadata().file_metadata();
        let schema =
            parquet_to_arrow_schema(file_meta.schema_descr(), file_meta.key_value_metadata())?;

        Ok(schema
            .fields()
            .iter()
            .map(|field| InferredColumn {
                name: field.name().clone(),
                dtype: dtype_name(field.data_type()),
            })
            .collect())
    }

    fn read_csv_schema(&self, location: &str) -> Result<Vec<InferredColumn>, SchemaError> {
        let file = File::open(location)?;
        let format = Format::default().with_header(true);
        let (schema, _rows_read) =
            format.infer_schema(BufReader::new(file), self.config.csv_sample_rows)?;

        Ok(schema
            .fields()
            .iter()
            .map(|field| InferredColumn {
                name: field.name().clone(),
                dtype: dtype_name(field.data_type()),
            })
            .collect())
    }
}

impl SchemaReader for FileSchemaReader {
    fn read_schema(
        &self,
        location: &str,
        format: FileFormat,
    ) -> Result<Vec<InferredColumn>, SchemaError> {
        match format {
            FileFormat::Parquet => self.read_parquet_schema(location),
            FileFormat::Csv => self.read_csv_schema(location),
        }
    }
}

/// Maps an Arrow data type onto the dictionary's dtype vocabulary.
///
/// The vocabulary follows the SQL-ish simple names data dictionaries
/// conventionally use (`string`, `int`, `bigint`, `double`, ...). Unsigned
/// integers widen to the nearest signed name; Arrow types without a
/// conventional name fall back to their lowercased Arrow rendering.
pub fn dtype_name(data_type: &DataType) -> String {
    match data_type {
        DataType::Boolean => "boolean".to_string(),
        DataType::Int8 => "tinyint".to_string(),
        DataType::Int16 | DataType::UInt8 => "smallint".to_string(),
        DataType::Int32 | DataType::UInt16 => "int".to_string(),
        DataType::Int64 | DataType::UInt32 | DataType::UInt64 => "bigint".to_string(),
        DataType::Float16 | DataType::Float32 => "float".to_string(),
        DataType::Float64 => "double".to_string(),
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => "string".to_string(),
        DataType::Binary
        | DataType::LargeBinary
        | DataType::BinaryView
        | DataType::FixedSizeBinary(_) => "binary".to_string(),
        DataType::Date32 | DataType::Date64 => "date".to_string(),
        DataType::Timestamp(_, _) => "timestamp".to_string(),
        DataType::Decimal128(precision, scale) | DataType::Decimal256(precision, scale) => {
            format!("decimal({precision},{scale})")
        }
        other => other.to_string().to_lowercase(),
    }
}
