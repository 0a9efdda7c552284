//! Record schemas: field geometry and the provider seam.
//!
//! A [`RecordSchema`] is the ordered field layout for one
//! (file type, version, record type) triple. Order is the byte layout:
//! decode slices and encode concatenation both walk the fields in schema
//! order. Schemas come from a [`SchemaProvider`]; the bundled TOML-backed
//! provider lives in [`crate::standard`].

use crate::detect::{FileType, Version};
use crate::record_type::RecordType;

/// Padding direction for a fixed-width field.
///
/// `Right` means the content sits flush right (pad on the left, the
/// catalog's legacy JUSTIFY code "1"); `Left` means flush left (pad on the
/// right, code "2").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    Left,
    Right,
}

/// One field of a record layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// The format's stable identifier for this data element. Letter-suffixed
    /// variants such as "1a" or "62a" denote unidentified/reserved slots and
    /// are ordinary opaque strings here.
    pub number: String,
    /// 1-based byte offset of the field within the line.
    pub start: usize,
    /// Field width in bytes; at least 1.
    pub length: usize,
    pub justify: Justification,
    /// Pad character; a space unless the catalog says otherwise.
    pub pad: char,
}

/// The ordered field layout for one (file type, version, record type).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSchema {
    fields: Vec<FieldDefinition>,
}

impl RecordSchema {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Fields in schema order (the canonical decode/encode order).
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Schema-order position of the field with the given number.
    ///
    /// Resolution is by field-number match, never by raw array index:
    /// callers address a record's value map through the returned field's
    /// `number`, not through this position.
    pub fn position_of(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.number == field_id)
    }

    /// The definition for the given field number, if the schema has one.
    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.number == field_id)
    }
}

/// Source of record schemas, keyed by (file type, version, record type).
///
/// Schema data is immutable after load, so `lookup` takes `&self` and one
/// provider can serve concurrent decodes safely. `None` means the triple is
/// undefined; the engine turns that into a typed `SchemaNotFound`.
pub trait SchemaProvider {
    fn lookup(
        &self,
        file_type: FileType,
        version: Version,
        record_type: &RecordType,
    ) -> Option<&RecordSchema>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for &P {
    fn lookup(
        &self,
        file_type: FileType,
        version: Version,
        record_type: &RecordType,
    ) -> Option<&RecordSchema> {
        (**self).lookup(file_type, version, record_type)
    }
}
