//! File type and version detection from the header line.
//!
//! Every CommonLine file opens with a header record whose bytes 41-80
//! (1-based) carry a marker token identifying the file type and format
//! revision, e.g. `A004` for an APPSEND version 4 file. Detection reads
//! that window once and returns the pair; it holds no state, so one
//! engine can safely process many files.

use crate::error::CommonlineError;

/// The four CommonLine file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Loan application send file.
    Appsend,
    /// Guarantor/lender response file.
    Response,
    /// Change transaction file.
    Change,
    /// Disbursement roster/forecast file.
    Disb,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FileType::Appsend => "APPSEND",
            FileType::Response => "RESPONSE",
            FileType::Change => "CHANGE",
            FileType::Disb => "DISB",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "APPSEND" => Ok(FileType::Appsend),
            "RESPONSE" => Ok(FileType::Response),
            "CHANGE" => Ok(FileType::Change),
            "DISB" => Ok(FileType::Disb),
            other => Err(format!(
                "unknown file type {other:?} (expected APPSEND, RESPONSE, CHANGE, or DISB)"
            )),
        }
    }
}

/// The two supported CommonLine format revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    V4,
    V5,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::V4 => f.write_str("4"),
            Version::V5 => f.write_str("5"),
        }
    }
}

impl std::str::FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4" => Ok(Version::V4),
            "5" => Ok(Version::V5),
            other => Err(format!("unsupported version {other:?} (expected 4 or 5)")),
        }
    }
}

/// Marker tokens and the (file type, version) pair each one identifies.
///
/// Disbursement files appear under three marker families (DF, E, EA); all
/// map to [`FileType::Disb`].
const MARKERS: &[(&str, FileType, Version)] = &[
    ("A004", FileType::Appsend, Version::V4),
    ("A005", FileType::Appsend, Version::V5),
    ("R004", FileType::Response, Version::V4),
    ("R005", FileType::Response, Version::V5),
    ("C004", FileType::Change, Version::V4),
    ("C005", FileType::Change, Version::V5),
    ("DF04", FileType::Disb, Version::V4),
    ("DF05", FileType::Disb, Version::V5),
    ("E004", FileType::Disb, Version::V4),
    ("E005", FileType::Disb, Version::V5),
    ("EA04", FileType::Disb, Version::V4),
    ("EA05", FileType::Disb, Version::V5),
];

/// 1-based byte window of the header line that carries the marker.
const MARKER_WINDOW: (usize, usize) = (41, 80);

/// Identify a file's type and version from its header line.
///
/// Tests the marker window for each known token by substring containment
/// and returns the matching pair, or `UnrecognizedFileType` when no token
/// matches (including when the line is too short to hold the window).
pub fn detect_file_type(header_line: &str) -> Result<(FileType, Version), CommonlineError> {
    let start = (MARKER_WINDOW.0 - 1).min(header_line.len());
    let end = MARKER_WINDOW.1.min(header_line.len());
    let window = &header_line[start..end];

    for &(token, file_type, version) in MARKERS {
        if window.contains(token) {
            log::debug!("detected {file_type} v{version} (marker {token})");
            return Ok((file_type, version));
        }
    }

    Err(CommonlineError::UnrecognizedFileType {
        window: window.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a header line with the marker placed inside the 41-80 window.
    fn header_with_marker(marker: &str) -> String {
        format!("@H{}{}", " ".repeat(38), marker)
    }

    #[test]
    fn test_detects_all_markers() {
        let expected = [
            ("A004", FileType::Appsend, Version::V4),
            ("A005", FileType::Appsend, Version::V5),
            ("R004", FileType::Response, Version::V4),
            ("R005", FileType::Response, Version::V5),
            ("C004", FileType::Change, Version::V4),
            ("C005", FileType::Change, Version::V5),
            ("DF04", FileType::Disb, Version::V4),
            ("DF05", FileType::Disb, Version::V5),
            ("E004", FileType::Disb, Version::V4),
            ("E005", FileType::Disb, Version::V5),
            ("EA04", FileType::Disb, Version::V4),
            ("EA05", FileType::Disb, Version::V5),
        ];
        for (marker, file_type, version) in expected {
            let line = header_with_marker(marker);
            assert_eq!(
                detect_file_type(&line).unwrap(),
                (file_type, version),
                "marker {marker}"
            );
        }
    }

    #[test]
    fn test_marker_outside_window_is_not_detected() {
        // Marker in the first 40 bytes only - the window starts at byte 41.
        let line = format!("@H A004{}", " ".repeat(80));
        let err = detect_file_type(&line).unwrap_err();
        assert!(matches!(err, CommonlineError::UnrecognizedFileType { .. }));
    }

    #[test]
    fn test_unknown_marker_is_an_error() {
        let line = header_with_marker("X999");
        let err = detect_file_type(&line).unwrap_err();
        match err {
            CommonlineError::UnrecognizedFileType { window } => {
                assert!(window.contains("X999"));
            }
            other => panic!("expected UnrecognizedFileType, got {other:?}"),
        }
    }

    #[test]
    fn test_short_line_is_an_error() {
        assert!(detect_file_type("@H").is_err());
        assert!(detect_file_type("").is_err());
    }

    #[test]
    fn test_marker_anywhere_in_window() {
        // Containment test: the token need not start at byte 41.
        let line = format!("{}{}R005{}", "@H", " ".repeat(50), " ".repeat(10));
        assert_eq!(
            detect_file_type(&line).unwrap(),
            (FileType::Response, Version::V5)
        );
    }
}
