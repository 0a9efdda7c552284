//! Record-level decode and encode against a schema.
//!
//! Decoding slices a line byte-exactly into a field-number keyed value map;
//! no trimming, so re-encoding the untouched map reproduces the original
//! line. Encoding pads each value to its declared width and concatenates in
//! schema order with no separators.

use std::collections::HashMap;

use crate::error::{CommonlineError, DecodeWarning};
use crate::schema::{FieldDefinition, Justification, RecordSchema};

/// Decoded field values of one record, keyed by field number.
pub type FieldValueMap = HashMap<String, String>;

/// One decoded record: its values plus its 1-based ordinal within its
/// record-type partition, and any warnings raised while decoding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInstance {
    ordinal: usize,
    values: FieldValueMap,
    warnings: Vec<DecodeWarning>,
}

impl RecordInstance {
    pub fn new(ordinal: usize, values: FieldValueMap, warnings: Vec<DecodeWarning>) -> Self {
        Self {
            ordinal,
            values,
            warnings,
        }
    }

    /// 1-based position of this instance within its partition, in file order.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The stored value for a field number; empty if the field is absent.
    pub fn value(&self, field_number: &str) -> &str {
        self.values.get(field_number).map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, field_number: &str, value: &str) {
        self.values.insert(field_number.to_string(), value.to_string());
    }

    pub fn values(&self) -> &FieldValueMap {
        &self.values
    }

    /// Decode anomalies attached to this record (e.g. a short line).
    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }
}

/// Slice a line into field values per the schema.
///
/// Each field takes the byte-exact slice `line[start-1 .. start-1+length)`,
/// untrimmed. A line too short for a field yields the bytes that are there
/// (possibly none) plus a [`DecodeWarning`]; one bad line must not abort a
/// batch file, so short lines warn rather than fail.
pub fn decode_record(line: &str, schema: &RecordSchema) -> (FieldValueMap, Vec<DecodeWarning>) {
    let mut values = FieldValueMap::new();
    let mut warnings = Vec::new();

    for field in schema.fields() {
        let start = field.start - 1;
        let wanted = start + field.length;
        if wanted > line.len() {
            warnings.push(DecodeWarning {
                field_number: field.number.clone(),
                wanted,
                available: line.len(),
            });
        }
        let lo = start.min(line.len());
        let hi = wanted.min(line.len());
        values.insert(field.number.clone(), line[lo..hi].to_string());
    }

    (values, warnings)
}

/// Pad a value to a field's exact width.
fn pad_value(value: &str, field: &FieldDefinition) -> String {
    let fill: String = std::iter::repeat(field.pad)
        .take(field.length - value.len())
        .collect();
    match field.justify {
        Justification::Right => format!("{fill}{value}"),
        Justification::Left => format!("{value}{fill}"),
    }
}

/// Encode field values into a fixed-width line per the schema.
///
/// Missing fields encode as empty values (all pad). A value wider than its
/// field fails with `ValueTooLong` instead of truncating: truncation would
/// silently shift every later field's bytes.
pub fn encode_record(
    values: &FieldValueMap,
    schema: &RecordSchema,
) -> Result<String, CommonlineError> {
    let mut line = String::new();

    for field in schema.fields() {
        let value = values.get(&field.number).map(String::as_str).unwrap_or("");
        if value.len() > field.length {
            return Err(CommonlineError::ValueTooLong {
                field_number: field.number.clone(),
                length: field.length,
                value: value.to_string(),
            });
        }
        line.push_str(&pad_value(value, field));
    }

    Ok(line)
}
