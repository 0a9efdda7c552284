//! Record classification from a line's leading bytes.
//!
//! A CommonLine file mixes heterogeneous line shapes: one or more header
//! lines, body records of several codes, and trailer lines. The first four
//! bytes of each line decide which shape (and therefore which schema)
//! applies.

/// The record-type tag assigned to each line of a file.
///
/// The tag selects the record's schema and the per-tag instance counter.
/// Body codes are opaque strings ("1", "102", "107", ...); later format
/// revisions add codes without changing this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    Header,
    Trailer,
    Body(String),
}

impl RecordType {
    /// Body tag for the given code.
    pub fn body(code: &str) -> Self {
        RecordType::Body(code.to_string())
    }

    /// The catalog spelling of this tag: `H`, `T`, or the body code.
    pub fn code(&self) -> &str {
        match self {
            RecordType::Header => "H",
            RecordType::Trailer => "T",
            RecordType::Body(code) => code,
        }
    }

    /// Parse the catalog/CLI spelling: `H`, `T`, or a body code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "H" | "h" => RecordType::Header,
            "T" | "t" => RecordType::Trailer,
            other => RecordType::Body(other.to_string()),
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Classify a line by its leading four bytes.
///
/// Precedence is load-bearing: `@H`/`@T` match by containment within the
/// prefix, the numeric codes match the prefix exactly, and anything else is
/// the default body code "1". Exact numeric matching must run before the
/// default so a `@102` line is never misread as a "1" record.
pub fn classify_record(line: &str) -> RecordType {
    let prefix = &line[..line.len().min(4)];

    if prefix.contains("@H") {
        RecordType::Header
    } else if prefix.contains("@T") {
        RecordType::Trailer
    } else if prefix == "@102" {
        RecordType::body("102")
    } else if prefix == "@107" {
        RecordType::body("107")
    } else {
        RecordType::body("1")
    }
}
