//! # Column Descriptions
//!
//! Per-column description entries for the data dictionary. Descriptions
//! typically arrive as loosely-typed JSON (one object per column), so this
//! module validates each object's attribute-key set against the required
//! four attributes and extracts a typed [`ColumnDescription`].
//!
//! The key set of every entry must exactly equal
//! `{dtype, description, primary_key, required}` — no more, no fewer.
//! Validation fails the whole assembly before any output is produced, and
//! the error names the offending column and keys.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The exact attribute-key set every column description must carry.
pub const REQUIRED_ATTRIBUTES: [&str; 4] = ["dtype", "description", "primary_key", "required"];

/// Errors raised while validating column descriptions
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// The description for a column is not a JSON object
    #[error("description for column '{column}' must be an object, got {found}")]
    NotAnObject {
        /// Column whose description is malformed
        column: String,
        /// JSON type actually found
        found: &'static str,
    },

    /// One or more required attribute keys are absent
    #[error("description for column '{column}' is missing required keys: {}", .missing.join(", "))]
    MissingAttributes {
        /// Column whose description is incomplete
        column: String,
        /// The missing attribute keys, sorted
        missing: Vec<String>,
    },

    /// Attribute keys outside the required set are present
    #[error("description for column '{column}' has unrecognized keys: {}", .unexpected.join(", "))]
    UnexpectedAttributes {
        /// Column whose description carries stray keys
        column: String,
        /// The unrecognized attribute keys, sorted
        unexpected: Vec<String>,
    },

    /// An attribute value has the wrong JSON type
    #[error("attribute '{attribute}' of column '{column}' must be {expected} or null")]
    InvalidAttribute {
        /// Column whose description is malformed
        column: String,
        /// Offending attribute key
        attribute: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },
}

/// A validated description of one dataset column.
///
/// Every attribute is optional at the value level: a null `dtype` defers to
/// the inferred type when inference is enabled, and the remaining attributes
/// surface as nulls in the data dictionary for columns the caller did not
/// describe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    /// Declared data type; overrides the inferred type when non-null
    pub dtype: Option<String>,
    /// Free-text column description
    pub description: Option<String>,
    /// Whether the column is part of the primary key
    pub primary_key: Option<bool>,
    /// Whether a value is required in every row
    pub required: Option<bool>,
}

impl ColumnDescription {
    /// Validates and extracts a description from its JSON form.
    ///
    /// The object's key set must exactly equal [`REQUIRED_ATTRIBUTES`].
    /// Missing keys are reported first; unrecognized keys are reported when
    /// nothing is missing.
    pub fn from_value(column: &str, value: &Value) -> Result<Self, DictionaryError> {
        let object = value.as_object().ok_or_else(|| DictionaryError::NotAnObject {
            column: column.to_string(),
            found: json_type_name(value),
        })?;

        let keys: BTreeSet<&str> = object.keys().map(String::as_str).collect();
        let expected: BTreeSet<&str> = REQUIRED_ATTRIBUTES.into_iter().collect();

        let missing: Vec<String> = expected
            .difference(&keys)
            .map(|k| (*k).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DictionaryError::MissingAttributes {
                column: column.to_string(),
                missing,
            });
        }

        let unexpected: Vec<String> = keys
            .difference(&expected)
            .map(|k| (*k).to_string())
            .collect();
        if !unexpected.is_empty() {
            return Err(DictionaryError::UnexpectedAttributes {
                column: column.to_string(),
                unexpected,
            });
        }

        Ok(Self {
            dtype: string_attribute(column, object, "dtype")?,
            description: string_attribute(column, object, "description")?,
            primary_key: bool_attribute(column, object, "primary_key")?,
            required: bool_attribute(column, object, "required")?,
        })
    }
}

/// Validates every entry of a column-description mapping.
///
/// Stops at the first malformed entry; no partial result is returned.
pub fn validate_descriptions(
    descriptions: &BTreeMap<String, Value>,
) -> Result<BTreeMap<String, ColumnDescription>, DictionaryError> {
    let mut validated = BTreeMap::new();
    for (column, value) in descriptions {
        validated.insert(column.clone(), ColumnDescription::from_value(column, value)?);
    }
    Ok(validated)
}

fn string_attribute(
    column: &str,
    object: &serde_json::Map<String, Value>,
    attribute: &'static str,
) -> Result<Option<String>, DictionaryError> {
    match object.get(attribute) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DictionaryError::InvalidAttribute {
            column: column.to_string(),
            attribute,
            expected: "a string",
        }),
    }
}

fn bool_attribute(
    column: &str,
    object: &serde_json::Map<String, Value>,
    attribute: &'static str,
) -> Result<Option<bool>, DictionaryError> {
    match object.get(attribute) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(DictionaryError::InvalidAttribute {
            column: column.to_string(),
            attribute,
            expected: "a boolean",
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_entry_parses() {
        let value = json!({
            "dtype": "int",
            "description": "primary id",
            "primary_key": true,
            "required": true,
        });
        let desc = ColumnDescription::from_value("id", &value).unwrap();
        assert_eq!(desc.dtype.as_deref(), Some("int"));
        assert_eq!(desc.description.as_deref(), Some("primary id"));
        assert_eq!(desc.primary_key, Some(true));
        assert_eq!(desc.required, Some(true));
    }

    #[test]
    fn null_dtype_defers_to_inference() {
        let value = json!({
            "dtype": null,
            "description": "free text",
            "primary_key": false,
            "required": false,
        });
        let desc = ColumnDescription::from_value("notes", &value).unwrap();
        assert_eq!(desc.dtype, None);
    }

    #[test]
    fn missing_key_reports_which() {
        let value = json!({
            "dtype": "int",
            "description": "x",
            "primary_key": true,
        });
        let err = ColumnDescription::from_value("id", &value).unwrap_err();
        match err {
            DictionaryError::MissingAttributes { column, missing } => {
                assert_eq!(column, "id");
                assert_eq!(missing, vec!["required".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extra_key_is_rejected() {
        let value = json!({
            "dtype": "int",
            "description": "x",
            "primary_key": true,
            "required": true,
            "nullable": false,
        });
        let err = ColumnDescription::from_value("id", &value).unwrap_err();
        match err {
            DictionaryError::UnexpectedAttributes { column, unexpected } => {
                assert_eq!(column, "id");
                assert_eq!(unexpected, vec!["nullable".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_is_rejected() {
        let err = ColumnDescription::from_value("id", &json!("int")).unwrap_err();
        assert!(matches!(err, DictionaryError::NotAnObject { .. }));
    }

    #[test]
    fn wrong_attribute_type_is_rejected() {
        let value = json!({
            "dtype": "int",
            "description": "x",
            "primary_key": "yes",
            "required": true,
        });
        let err = ColumnDescription::from_value("id", &value).unwrap_err();
        match err {
            DictionaryError::InvalidAttribute { attribute, .. } => {
                assert_eq!(attribute, "primary_key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn whole_map_validation_stops_on_first_failure() {
        let mut descriptions = BTreeMap::new();
        descriptions.insert(
            "amount".to_string(),
            json!({"dtype": "double", "description": "spend", "primary_key": false, "required": true}),
        );
        descriptions.insert("broken".to_string(), json!({"dtype": "int"}));

        let err = validate_descriptions(&descriptions).unwrap_err();
        match err {
            DictionaryError::MissingAttributes { column, missing } => {
                assert_eq!(column, "broken");
                assert_eq!(
                    missing,
                    vec![
                        "description".to_string(),
                        "primary_key".to_string(),
                        "required".to_string()
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
