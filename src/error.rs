//! Error and warning types for CommonLine decode/encode operations.
//!
//! Detection, schema-lookup, and field-resolution failures abort the whole
//! operation: they mean the file or the request is fundamentally malformed
//! and no partial `Document` is returned. A single short body line, by
//! contrast, is a per-record anomaly in a large batch and is reported as a
//! [`DecodeWarning`] attached to that record instead of discarding the file.

use thiserror::Error;

use crate::detect::{FileType, Version};
use crate::record_type::RecordType;

/// Errors raised while decoding, addressing, or encoding a CommonLine file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonlineError {
    /// The header's marker window (bytes 41-80) matched none of the known
    /// file-type markers.
    #[error("unrecognized file type marker in header window: {window:?}")]
    UnrecognizedFileType { window: String },

    /// No record schema is defined for the requested triple.
    #[error("no schema for {file_type} v{version} record type {record_type}")]
    SchemaNotFound {
        file_type: FileType,
        version: Version,
        record_type: RecordType,
    },

    /// The field id does not appear in the schema for the requested triple.
    #[error("field {field_id:?} not defined for {file_type} v{version} record type {record_type}")]
    FieldNotFound {
        field_id: String,
        file_type: FileType,
        version: Version,
        record_type: RecordType,
    },

    /// An encoded value is wider than its field. Encoding fails rather than
    /// truncating: a silently shortened value corrupts every byte offset
    /// that follows it in the fixed-width line.
    #[error("value {value:?} exceeds width {length} of field {field_number}")]
    ValueTooLong {
        field_number: String,
        length: usize,
        value: String,
    },

    /// The requested 1-based record instance does not exist.
    #[error("no instance {index} for record type {record_type} ({count} present)")]
    InstanceIndexOutOfRange {
        record_type: RecordType,
        index: usize,
        count: usize,
    },

    /// The schema catalog file could not be parsed or failed validation.
    #[error("invalid schema catalog: {0}")]
    InvalidCatalog(String),
}

/// A recoverable anomaly found while decoding a single record line.
///
/// Warnings are attached to the affected [`RecordInstance`] and logged;
/// they never abort the decode of the rest of the file.
///
/// [`RecordInstance`]: crate::record::RecordInstance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeWarning {
    /// Field whose slice ran past the end of the line.
    pub field_number: String,
    /// Byte offset (exclusive) the field's slice wanted to reach.
    pub wanted: usize,
    /// Actual line length in bytes.
    pub available: usize,
}

impl std::fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "record too short for field {}: needs {} bytes, line has {}",
            self.field_number, self.wanted, self.available
        )
    }
}
