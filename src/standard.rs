//! The bundled schema provider, backed by a TOML catalog.
//!
//! A catalog declares one `[[record]]` table per (file type, version,
//! record type) triple, each with ordered `[[record.field]]` entries:
//!
//! ```toml
//! [[record]]
//! file-type = "APPSEND"
//! version = 4
//! record-type = "H"          # "H", "T", or a body code such as "1"
//!
//! [[record.field]]
//! number = "1"
//! start = 1
//! length = 2
//! justify = "left"           # "left"/"right", or legacy codes "2"/"1"
//! pad = "space"              # optional; "space" means ' '; default ' '
//! ```
//!
//! Field order in the catalog is the record's byte layout and the canonical
//! decode/encode order, so it is preserved exactly.

use std::collections::HashMap;

use serde::Deserialize;

use crate::detect::{FileType, Version};
use crate::error::CommonlineError;
use crate::record_type::RecordType;
use crate::schema::{FieldDefinition, Justification, RecordSchema, SchemaProvider};

/// Schema catalog for the CommonLine standard, keyed by
/// (file type, version) and record-type code.
#[derive(Debug, Clone, Default)]
pub struct StandardSchemas {
    schemas: HashMap<(FileType, Version), HashMap<String, RecordSchema>>,
}

impl StandardSchemas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML catalog.
    pub fn from_toml_str(text: &str) -> Result<Self, CommonlineError> {
        let catalog: Catalog =
            toml::from_str(text).map_err(|e| CommonlineError::InvalidCatalog(e.to_string()))?;

        let mut schemas = Self::new();
        for record in catalog.record {
            let file_type = parse_file_type(&record.file_type)?;
            let version = parse_version(record.version)?;
            let record_type = RecordType::from_code(&record.record_type);

            if record.field.is_empty() {
                return Err(CommonlineError::InvalidCatalog(format!(
                    "{} v{} record type {}: no fields",
                    file_type, version, record_type
                )));
            }

            let mut fields = Vec::with_capacity(record.field.len());
            for field in &record.field {
                fields.push(field.to_definition(file_type, version, &record_type)?);
            }

            let replaced = schemas
                .entry(file_type, version)
                .insert(record_type.code().to_string(), RecordSchema::new(fields));
            if replaced.is_some() {
                return Err(CommonlineError::InvalidCatalog(format!(
                    "duplicate schema for {} v{} record type {}",
                    file_type, version, record_type
                )));
            }
        }

        Ok(schemas)
    }

    /// Register a schema programmatically. Replaces any existing schema for
    /// the triple.
    pub fn insert(
        &mut self,
        file_type: FileType,
        version: Version,
        record_type: RecordType,
        schema: RecordSchema,
    ) {
        self.entry(file_type, version)
            .insert(record_type.code().to_string(), schema);
    }

    fn entry(
        &mut self,
        file_type: FileType,
        version: Version,
    ) -> &mut HashMap<String, RecordSchema> {
        self.schemas.entry((file_type, version)).or_default()
    }
}

impl SchemaProvider for StandardSchemas {
    fn lookup(
        &self,
        file_type: FileType,
        version: Version,
        record_type: &RecordType,
    ) -> Option<&RecordSchema> {
        self.schemas
            .get(&(file_type, version))
            .and_then(|by_type| by_type.get(record_type.code()))
    }
}

#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(default)]
    record: Vec<CatalogRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct CatalogRecord {
    file_type: String,
    version: u8,
    record_type: String,
    #[serde(default)]
    field: Vec<CatalogField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct CatalogField {
    number: String,
    start: usize,
    length: usize,
    justify: String,
    pad: Option<String>,
}

impl CatalogField {
    fn to_definition(
        &self,
        file_type: FileType,
        version: Version,
        record_type: &RecordType,
    ) -> Result<FieldDefinition, CommonlineError> {
        let context = |msg: String| {
            CommonlineError::InvalidCatalog(format!(
                "{} v{} record type {} field {}: {}",
                file_type, version, record_type, self.number, msg
            ))
        };

        if self.start < 1 {
            return Err(context("start must be 1-based".to_string()));
        }
        if self.length < 1 {
            return Err(context("length must be at least 1".to_string()));
        }

        let justify = match self.justify.as_str() {
            // Legacy JUSTIFY codes: "1" = pad-start, "2" = pad-end.
            "left" | "2" => Justification::Left,
            "right" | "1" => Justification::Right,
            other => return Err(context(format!("unknown justify token {other:?}"))),
        };

        let pad = match self.pad.as_deref() {
            None => ' ',
            Some(token) if token.eq_ignore_ascii_case("space") => ' ',
            Some(token) => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(context(format!("pad must be one character, got {token:?}"))),
                }
            }
        };

        Ok(FieldDefinition {
            number: self.number.clone(),
            start: self.start,
            length: self.length,
            justify,
            pad,
        })
    }
}

fn parse_file_type(token: &str) -> Result<FileType, CommonlineError> {
    token
        .parse()
        .map_err(|_| CommonlineError::InvalidCatalog(format!("unknown file type {token:?}")))
}

fn parse_version(number: u8) -> Result<Version, CommonlineError> {
    match number {
        4 => Ok(Version::V4),
        5 => Ok(Version::V5),
        other => Err(CommonlineError::InvalidCatalog(format!(
            "unsupported version {other} (expected 4 or 5)"
        ))),
    }
}
