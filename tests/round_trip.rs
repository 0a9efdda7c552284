//! File-level properties of the decode/encode round trip.

use commonline::{
    Commonline, CommonlineError, FileType, RecordType, StandardSchemas, Version,
};

/// APPSEND v4 catalog used by these tests: a 44-byte header, three body
/// record kinds, and a count trailer.
const CATALOG: &str = r#"
[[record]]
file-type = "APPSEND"
version = 4
record-type = "H"
field = [
    { number = "1", start = 1, length = 2, justify = "left" },
    { number = "2", start = 3, length = 38, justify = "left" },
    { number = "3", start = 41, length = 4, justify = "left" },
]

[[record]]
file-type = "APPSEND"
version = 4
record-type = "1"
field = [
    { number = "1", start = 1, length = 4, justify = "left" },
    { number = "2", start = 5, length = 8, justify = "left" },
    { number = "62a", start = 13, length = 6, justify = "left" },
]

[[record]]
file-type = "APPSEND"
version = 4
record-type = "102"
field = [
    { number = "1", start = 1, length = 4, justify = "left" },
    { number = "2", start = 5, length = 10, justify = "left" },
]

[[record]]
file-type = "APPSEND"
version = 4
record-type = "107"
field = [
    { number = "1", start = 1, length = 4, justify = "left" },
    { number = "2", start = 5, length = 4, justify = "left" },
]

[[record]]
file-type = "APPSEND"
version = 4
record-type = "T"
field = [
    { number = "1", start = 1, length = 2, justify = "left" },
    { number = "2", start = 3, length = 6, justify = "right", pad = "0" },
]
"#;

fn engine() -> Commonline<StandardSchemas> {
    Commonline::new(StandardSchemas::from_toml_str(CATALOG).unwrap())
}

fn header_line() -> String {
    format!("@H{}A004", " ".repeat(38))
}

/// A file already in canonical layout: header, body codes ascending,
/// trailer.
fn canonical_file() -> String {
    format!(
        "{}\n\
         @1  SMITH   AB1234\n\
         @1  JONES   CD5678\n\
         @102PROMISSORY\n\
         @107NOTE\n\
         @T000004\n",
        header_line()
    )
}

#[test]
fn round_trip_is_byte_exact() {
    let engine = engine();
    let raw = canonical_file();
    let doc = engine.read_document(&raw).unwrap();
    let out = engine
        .write_document(&doc, FileType::Appsend, Version::V4)
        .unwrap();
    assert_eq!(out, raw);
}

#[test]
fn field_update_touches_only_its_target() {
    let engine = engine();
    let raw = canonical_file();
    let mut doc = engine.read_document(&raw).unwrap();
    let before = doc.clone();

    let body = RecordType::body("1");
    engine.set_field(&mut doc, &body, "62a", 2, "ZZ0000").unwrap();

    // The targeted field changed.
    assert_eq!(engine.get_field(&doc, &body, "62a", 2).unwrap(), "ZZ0000");

    // Everything else is structurally identical.
    assert_eq!(doc.headers(), before.headers());
    assert_eq!(doc.trailers(), before.trailers());
    assert_eq!(doc.body("102"), before.body("102"));
    assert_eq!(doc.body("107"), before.body("107"));
    assert_eq!(doc.body("1")[0], before.body("1")[0]);
    let changed = &doc.body("1")[1];
    let original = &before.body("1")[1];
    assert_eq!(changed.ordinal(), original.ordinal());
    for (number, value) in original.values() {
        if number == "62a" {
            continue;
        }
        assert_eq!(changed.value(number), value.as_str(), "field {number} must not change");
    }
}

#[test]
fn encoded_fields_have_exact_declared_width() {
    let engine = engine();
    let raw = canonical_file();
    let mut doc = engine.read_document(&raw).unwrap();
    let body = RecordType::body("1");

    // Shorter value: padded back out to the full line width.
    engine.set_field(&mut doc, &body, "2", 1, "NG").unwrap();
    let out = engine
        .write_document(&doc, FileType::Appsend, Version::V4)
        .unwrap();
    let line = out.lines().nth(1).unwrap();
    assert_eq!(line.len(), 18);
    assert_eq!(&line[4..12], "NG      ");

    // Longer value: encode fails rather than truncating.
    engine
        .set_field(&mut doc, &body, "2", 1, "UNREASONABLY LONG")
        .unwrap();
    let err = engine
        .write_document(&doc, FileType::Appsend, Version::V4)
        .unwrap_err();
    assert!(matches!(err, CommonlineError::ValueTooLong { .. }));
}

#[test]
fn counters_are_contiguous_across_interleaving() {
    let engine = engine();
    // Two headers and two trailers around interleaved body codes.
    let raw = format!(
        "{h}\n\
         {h}\n\
         @1  SMITH   AB1234\n\
         @102PROMISSORY\n\
         @1  JONES   CD5678\n\
         @107NOTE\n\
         @1  DOE     EF9012\n\
         @T000007\n\
         @T000007\n",
        h = header_line()
    );
    let doc = engine.read_document(&raw).unwrap();

    let ordinals = |instances: &[commonline::RecordInstance]| -> Vec<usize> {
        instances.iter().map(|i| i.ordinal()).collect()
    };
    assert_eq!(ordinals(doc.headers()), vec![1, 2]);
    assert_eq!(ordinals(doc.trailers()), vec![1, 2]);
    assert_eq!(ordinals(doc.body("1")), vec![1, 2, 3]);
    assert_eq!(ordinals(doc.body("102")), vec![1]);
    assert_eq!(ordinals(doc.body("107")), vec![1]);
    // File order survives within each partition.
    assert_eq!(doc.body("1")[2].value("2"), "DOE     ");
}

#[test]
fn empty_key_body_line_is_skipped_and_not_reemitted() {
    let engine = engine();
    // The second body "1" line is blank, so its field "1" decodes empty:
    // a filler line that must be neither counted nor re-emitted.
    let raw = format!("{}\n@1  SMITH   AB1234\n\n@T000002\n", header_line());
    let doc = engine.read_document(&raw).unwrap();

    assert_eq!(doc.body("1").len(), 1);
    assert_eq!(doc.body("1")[0].ordinal(), 1);

    let out = engine
        .write_document(&doc, FileType::Appsend, Version::V4)
        .unwrap();
    let body_lines: Vec<&str> = out.lines().filter(|l| l.starts_with("@1 ")).collect();
    assert_eq!(body_lines.len(), 1);
    let expected = format!("{}\n@1  SMITH   AB1234\n@T000002\n", header_line());
    assert_eq!(out, expected);
}

#[test]
fn headers_and_trailers_are_never_skipped() {
    let engine = engine();
    let raw = canonical_file();
    let mut doc = engine.read_document(&raw).unwrap();
    engine
        .set_field(&mut doc, &RecordType::Header, "1", 1, "")
        .unwrap();
    engine
        .set_field(&mut doc, &RecordType::Trailer, "1", 1, "")
        .unwrap();
    let out = engine
        .write_document(&doc, FileType::Appsend, Version::V4)
        .unwrap();
    // Both bookends still emit, with their field "1" now all pad.
    assert_eq!(out.lines().count(), raw.lines().count());
}

#[test]
fn classification_precedence_survives_decode() {
    let engine = engine();
    let raw = format!(
        "{}\n@102PROMISSORY\n@T000002\n",
        header_line()
    );
    let doc = engine.read_document(&raw).unwrap();
    // "@102" also starts with "@1": it must land in the "102" partition.
    assert_eq!(doc.body("102").len(), 1);
    assert_eq!(doc.body("1").len(), 0);
    assert_eq!(doc.body("102")[0].value("2"), "PROMISSORY");
}

#[test]
fn document_carries_detected_type_and_version() {
    let engine = engine();
    let doc = engine.read_document(&canonical_file()).unwrap();
    assert_eq!(doc.file_type(), FileType::Appsend);
    assert_eq!(doc.version(), Version::V4);
}
