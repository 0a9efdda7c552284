//! The in-memory model of one decoded CommonLine file.
//!
//! A [`Document`] holds three partitions mirroring the physical file layout:
//! header records, body records grouped by code, and trailer records.
//! Ordinals within each partition are contiguous from 1 in file order. A
//! document is created fresh by each decode, mutated in place by field
//! updates, and read back out by the serializer; it is never cached or
//! merged across files.

use std::collections::BTreeMap;

use crate::detect::{FileType, Version};
use crate::record::RecordInstance;
use crate::record_type::RecordType;

/// One decoded CommonLine file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    file_type: FileType,
    version: Version,
    headers: Vec<RecordInstance>,
    trailers: Vec<RecordInstance>,
    bodies: BTreeMap<String, Vec<RecordInstance>>,
}

impl Document {
    pub fn new(file_type: FileType, version: Version) -> Self {
        Self {
            file_type,
            version,
            headers: Vec::new(),
            trailers: Vec::new(),
            bodies: BTreeMap::new(),
        }
    }

    /// File type detected from the header when this document was read.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Format revision detected from the header.
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &[RecordInstance] {
        &self.headers
    }

    pub fn trailers(&self) -> &[RecordInstance] {
        &self.trailers
    }

    /// Body codes present, in ascending code order.
    pub fn body_codes(&self) -> impl Iterator<Item = &str> {
        self.bodies.keys().map(String::as_str)
    }

    /// Instances of one body code, in file order. Empty if the code is absent.
    pub fn body(&self, code: &str) -> &[RecordInstance] {
        self.bodies.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append an instance to its partition. The caller assigns ordinals;
    /// [`push_next`](Self::push_next) assigns them automatically.
    pub fn push(&mut self, record_type: &RecordType, instance: RecordInstance) {
        match record_type {
            RecordType::Header => self.headers.push(instance),
            RecordType::Trailer => self.trailers.push(instance),
            RecordType::Body(code) => {
                self.bodies.entry(code.clone()).or_default().push(instance)
            }
        }
    }

    /// The ordinal the next instance of this record type will receive.
    pub fn next_ordinal(&self, record_type: &RecordType) -> usize {
        self.partition(record_type).len() + 1
    }

    /// Number of instances currently held for this record type.
    pub fn count(&self, record_type: &RecordType) -> usize {
        self.partition(record_type).len()
    }

    /// The instance with the given 1-based ordinal, if present.
    pub fn instance(&self, record_type: &RecordType, index: usize) -> Option<&RecordInstance> {
        index.checked_sub(1).and_then(|i| self.partition(record_type).get(i))
    }

    pub fn instance_mut(
        &mut self,
        record_type: &RecordType,
        index: usize,
    ) -> Option<&mut RecordInstance> {
        let i = index.checked_sub(1)?;
        match record_type {
            RecordType::Header => self.headers.get_mut(i),
            RecordType::Trailer => self.trailers.get_mut(i),
            RecordType::Body(code) => self.bodies.get_mut(code).and_then(|v| v.get_mut(i)),
        }
    }

    fn partition(&self, record_type: &RecordType) -> &[RecordInstance] {
        match record_type {
            RecordType::Header => &self.headers,
            RecordType::Trailer => &self.trailers,
            RecordType::Body(code) => self.body(code),
        }
    }
}
