//! # commonline
//!
//! A schema-driven codec for CommonLine fixed-width interchange files, the
//! positional text format used to exchange loan application, response,
//! change, and disbursement data between institutions.
//!
//! Each file is a sequence of fixed-width lines whose layout depends on
//! three orthogonal axes:
//! - **File type**: APPSEND, RESPONSE, CHANGE, or DISB, detected from a
//!   marker token in the header line.
//! - **Version**: format revision 4 or 5.
//! - **Record type**: header, one or more body record kinds ("1", "102",
//!   "107", ...), or trailer, classified from each line's leading bytes.
//!
//! Field layouts come from a [`SchemaProvider`]; the bundled
//! [`StandardSchemas`] loads them from a TOML catalog. Decoding slices each
//! line byte-exactly into field-number keyed values, so an untouched
//! document re-encodes to the original bytes.
//!
//! ## Example
//!
//! ```
//! use commonline::{Commonline, CommonlineError, RecordType, StandardSchemas};
//!
//! # fn main() -> Result<(), CommonlineError> {
//! let schemas = StandardSchemas::from_toml_str(
//!     r#"
//!     [[record]]
//!     file-type = "APPSEND"
//!     version = 4
//!     record-type = "H"
//!     field = [
//!         { number = "1", start = 1, length = 2, justify = "left" },
//!         { number = "2", start = 3, length = 38, justify = "left" },
//!         { number = "3", start = 41, length = 4, justify = "left" },
//!     ]
//!
//!     [[record]]
//!     file-type = "APPSEND"
//!     version = 4
//!     record-type = "1"
//!     field = [
//!         { number = "1", start = 1, length = 4, justify = "left" },
//!         { number = "2", start = 5, length = 8, justify = "left" },
//!     ]
//!     "#,
//! )?;
//!
//! let raw = format!("@H{}A004\n@1  SMITH   \n", " ".repeat(38));
//!
//! let engine = Commonline::new(schemas);
//! let mut doc = engine.read_document(&raw)?;
//!
//! let body = RecordType::body("1");
//! assert_eq!(engine.get_field(&doc, &body, "2", 1)?, "SMITH   ");
//!
//! engine.set_field(&mut doc, &body, "2", 1, "DOE")?;
//! let out = engine.write_document(&doc, doc.file_type(), doc.version())?;
//! assert!(out.contains("@1  DOE     "));
//! # Ok(())
//! # }
//! ```

pub mod detect;
pub mod document;
pub mod engine;
pub mod error;
pub mod record;
pub mod record_type;
pub mod schema;
pub mod standard;

pub use detect::{FileType, Version, detect_file_type};
pub use document::Document;
pub use engine::Commonline;
pub use error::{CommonlineError, DecodeWarning};
pub use record::{FieldValueMap, RecordInstance, decode_record, encode_record};
pub use record_type::{RecordType, classify_record};
pub use schema::{FieldDefinition, Justification, RecordSchema, SchemaProvider};
pub use standard::StandardSchemas;
