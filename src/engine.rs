//! The CommonLine engine: document assembly, field access, serialization.
//!
//! [`Commonline`] holds only a schema provider; all classification and
//! detection results are threaded through calls as values, so one engine
//! can process any number of files, concurrently if the provider is shared
//! behind a reference.
//!
//! ## Skip policy
//!
//! A body record whose field "1" decodes to an empty string is a filler
//! line: it is not assembled into the document, does not advance its
//! counter, and is omitted again on write. Header and trailer records are
//! never skipped. This mirrors what CommonLine producers emit today; it is
//! a format convention inherited from the field, applied uniformly to all
//! body codes and pending confirmation by the format owners.

use crate::detect::{FileType, Version, detect_file_type};
use crate::document::Document;
use crate::error::CommonlineError;
use crate::record::{RecordInstance, decode_record, encode_record};
use crate::record_type::{RecordType, classify_record};
use crate::schema::{RecordSchema, SchemaProvider};

/// Decode/encode engine over a schema provider.
#[derive(Debug, Clone)]
pub struct Commonline<P> {
    schemas: P,
}

impl<P: SchemaProvider> Commonline<P> {
    pub fn new(schemas: P) -> Self {
        Self { schemas }
    }

    /// Decode raw file content into a [`Document`].
    ///
    /// The file type and version are detected from the first line, then
    /// each line is classified, decoded against its schema, and appended to
    /// its partition with a contiguous 1-based ordinal. A missing schema
    /// aborts the decode: the file (or the catalog) is malformed and no
    /// partial document is returned. Short lines decode with warnings
    /// attached to their record.
    pub fn read_document(&self, raw: &str) -> Result<Document, CommonlineError> {
        let header_line = raw.lines().next().unwrap_or("");
        let (file_type, version) = detect_file_type(header_line)?;

        let mut document = Document::new(file_type, version);

        for line in raw.lines() {
            let record_type = classify_record(line);
            let schema = self.schema(file_type, version, &record_type)?;
            let (values, warnings) = decode_record(line, schema);

            let key_empty = values.get("1").is_none_or(|v| v.is_empty());
            if key_empty && matches!(record_type, RecordType::Body(_)) {
                log::debug!("skipping filler body {record_type} line (empty field 1)");
                continue;
            }

            let ordinal = document.next_ordinal(&record_type);
            for warning in &warnings {
                log::warn!("{file_type} v{version} record {record_type} #{ordinal}: {warning}");
            }
            document.push(&record_type, RecordInstance::new(ordinal, values, warnings));
        }

        Ok(document)
    }

    /// Read one field value from a record instance.
    ///
    /// The field id is resolved against the schema for the document's
    /// detected (file type, version) and the given record type; addressing
    /// is by field-number match. `index` is the 1-based instance ordinal.
    pub fn get_field(
        &self,
        document: &Document,
        record_type: &RecordType,
        field_id: &str,
        index: usize,
    ) -> Result<String, CommonlineError> {
        self.resolve_field(document, record_type, field_id)?;
        let instance = self.instance(document, record_type, index)?;
        Ok(instance.value(field_id).to_string())
    }

    /// Update one field value in a record instance.
    ///
    /// Only the targeted field of the targeted instance changes; width
    /// checking happens later, on encode.
    pub fn set_field(
        &self,
        document: &mut Document,
        record_type: &RecordType,
        field_id: &str,
        index: usize,
        value: &str,
    ) -> Result<(), CommonlineError> {
        self.resolve_field(document, record_type, field_id)?;
        let count = document.count(record_type);
        let instance = document.instance_mut(record_type, index).ok_or_else(|| {
            CommonlineError::InstanceIndexOutOfRange {
                record_type: record_type.clone(),
                index,
                count,
            }
        })?;
        instance.set_value(field_id, value);
        Ok(())
    }

    /// Serialize a document back to file content.
    ///
    /// Emits all headers, then each body code in ascending code order with
    /// instances in ordinal order, then all trailers; one newline per
    /// emitted record line. Body instances whose field "1" is empty are
    /// omitted (the same skip policy as decode). Records are encoded
    /// against the schemas for the *requested* file type and version, which
    /// may differ from the document's own to convert between revisions.
    pub fn write_document(
        &self,
        document: &Document,
        file_type: FileType,
        version: Version,
    ) -> Result<String, CommonlineError> {
        let mut out = String::new();

        self.write_partition(
            &mut out,
            document.headers(),
            file_type,
            version,
            &RecordType::Header,
            false,
        )?;
        for code in document.body_codes() {
            let record_type = RecordType::body(code);
            self.write_partition(
                &mut out,
                document.body(code),
                file_type,
                version,
                &record_type,
                true,
            )?;
        }
        self.write_partition(
            &mut out,
            document.trailers(),
            file_type,
            version,
            &RecordType::Trailer,
            false,
        )?;

        Ok(out)
    }

    fn write_partition(
        &self,
        out: &mut String,
        instances: &[RecordInstance],
        file_type: FileType,
        version: Version,
        record_type: &RecordType,
        skip_empty_key: bool,
    ) -> Result<(), CommonlineError> {
        if instances.is_empty() {
            return Ok(());
        }
        let schema = self.schema(file_type, version, record_type)?;
        for instance in instances {
            if skip_empty_key && instance.value("1").is_empty() {
                log::debug!(
                    "omitting filler body {record_type} instance #{} (empty field 1)",
                    instance.ordinal()
                );
                continue;
            }
            out.push_str(&encode_record(instance.values(), schema)?);
            out.push('\n');
        }
        Ok(())
    }

    fn resolve_field(
        &self,
        document: &Document,
        record_type: &RecordType,
        field_id: &str,
    ) -> Result<usize, CommonlineError> {
        let file_type = document.file_type();
        let version = document.version();
        let schema = self.schema(file_type, version, record_type)?;
        schema
            .position_of(field_id)
            .ok_or_else(|| CommonlineError::FieldNotFound {
                field_id: field_id.to_string(),
                file_type,
                version,
                record_type: record_type.clone(),
            })
    }

    fn instance<'d>(
        &self,
        document: &'d Document,
        record_type: &RecordType,
        index: usize,
    ) -> Result<&'d RecordInstance, CommonlineError> {
        document.instance(record_type, index).ok_or_else(|| {
            CommonlineError::InstanceIndexOutOfRange {
                record_type: record_type.clone(),
                index,
                count: document.count(record_type),
            }
        })
    }

    fn schema(
        &self,
        file_type: FileType,
        version: Version,
        record_type: &RecordType,
    ) -> Result<&RecordSchema, CommonlineError> {
        self.schemas
            .lookup(file_type, version, record_type)
            .ok_or_else(|| CommonlineError::SchemaNotFound {
                file_type,
                version,
                record_type: record_type.clone(),
            })
    }
}
