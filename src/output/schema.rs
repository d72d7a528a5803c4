//! Arrow schema inference and JSON to Arrow conversion
//!
//! Brewery records are flat JSON objects of strings, numbers, and nulls.
//! Inference covers those scalar types; the rare nested value is kept as
//! its JSON text so the column set stays stable.

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, NullArray, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde_json::Value;

use crate::error::Result;

/// Infers an Arrow schema from a set of JSON records.
///
/// Every field is nullable. Fields are collected over all records, so a
/// key missing from some records still gets a column. A column that is
/// null in every record becomes Utf8, since Parquet cannot encode a
/// null-typed column. `BTreeMap` keeps the column order deterministic.
pub fn infer_schema(records: &[Value]) -> Result<Schema> {
    if records.is_empty() {
        return Ok(Schema::empty());
    }

    let mut field_types: BTreeMap<String, DataType> = BTreeMap::new();

    for record in records {
        if let Value::Object(obj) = record {
            for (key, value) in obj {
                let inferred = infer_type(value);
                field_types
                    .entry(key.clone())
                    .and_modify(|existing| {
                        *existing = merge_types(existing, &inferred);
                    })
                    .or_insert(inferred);
            }
        }
    }

    let fields: Vec<Field> = field_types
        .into_iter()
        .map(|(name, dtype)| {
            let dtype = if dtype == DataType::Null {
                DataType::Utf8
            } else {
                dtype
            };
            Field::new(name, dtype, true)
        })
        .collect();

    Ok(Schema::new(fields))
}

/// Converts JSON records to an Arrow RecordBatch.
///
/// Uses the provided schema or infers one from the records. A schema
/// inferred over a whole table lets every partition of that table share
/// one column layout.
pub fn json_to_arrow(records: &[Value], schema: Option<&Schema>) -> Result<RecordBatch> {
    let inferred;
    let schema = match schema {
        Some(schema) => schema,
        None => {
            inferred = infer_schema(records)?;
            &inferred
        }
    };

    if records.is_empty() {
        return Ok(RecordBatch::new_empty(Arc::new(schema.clone())));
    }

    let mut columns: Vec<ArrayRef> = Vec::new();

    for field in schema.fields() {
        let values: Vec<Option<&Value>> = records
            .iter()
            .map(|record| {
                if let Value::Object(obj) = record {
                    obj.get(field.name())
                } else {
                    None
                }
            })
            .collect();

        columns.push(build_array(&values, field.data_type()));
    }

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Infers an Arrow DataType from a JSON value.
fn infer_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Bool(_) => DataType::Boolean,
        Value::Number(n) => {
            if n.is_i64() {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        // Arrays and objects are stored as their JSON text.
        Value::String(_) | Value::Array(_) | Value::Object(_) => DataType::Utf8,
    }
}

/// Merges two data types into a compatible type.
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        (a, b) if a == b => a.clone(),
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }
        // Different types fall back to String.
        _ => DataType::Utf8,
    }
}

/// Builds an Arrow array for one column. Absent keys and explicit JSON
/// nulls both become array nulls.
fn build_array(values: &[Option<&Value>], data_type: &DataType) -> ArrayRef {
    match data_type {
        DataType::Boolean => {
            let arr: BooleanArray = values.iter().map(|v| v.and_then(Value::as_bool)).collect();
            Arc::new(arr)
        }

        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(Value::as_i64)).collect();
            Arc::new(arr)
        }

        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(Value::as_f64)).collect();
            Arc::new(arr)
        }

        DataType::Null => Arc::new(NullArray::new(values.len())),

        // Utf8 and anything unexpected: render non-strings as JSON text.
        _ => {
            let arr: StringArray = values
                .iter()
                .map(|v| {
                    v.and_then(|v| match v {
                        Value::Null => None,
                        Value::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    })
                })
                .collect();
            Arc::new(arr)
        }
    }
}
