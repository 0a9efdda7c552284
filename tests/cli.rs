//! End-to-end tests for the cl-tool binary.

use std::fs;
use std::process::Command;

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

fn sample_file() -> String {
    format!("@H{}A004\n@1  SMITH   \n@T000002\n", " ".repeat(38))
}

struct Fixture {
    _dir: tempfile::TempDir,
    schema: std::path::PathBuf,
    input: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("catalog.toml");
    let input = dir.path().join("APPSEND.sis");
    fs::write(&schema, CATALOG).unwrap();
    fs::write(&input, sample_file()).unwrap();
    Fixture {
        schema,
        input,
        _dir: dir,
    }
}

fn cl_tool() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cl-tool"))
}

#[test]
fn get_prints_field_value() {
    let fx = fixture();
    let output = cl_tool()
        .arg("--schema")
        .arg(&fx.schema)
        .arg("get")
        .arg(&fx.input)
        .args(["--record-type", "1", "--field", "2"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "SMITH   \n");
}

#[test]
fn set_rewrites_the_file() {
    let fx = fixture();
    let out_path = fx.input.with_file_name("out.sis");
    let output = cl_tool()
        .arg("--schema")
        .arg(&fx.schema)
        .arg("set")
        .arg(&fx.input)
        .args(["--record-type", "1", "--field", "2", "--value", "DOE"])
        .arg("--output")
        .arg(&out_path)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("@1  DOE     \n"));
    assert!(written.starts_with("@H"));
    assert!(written.ends_with("@T000002\n"));
}

#[test]
fn rewrite_round_trips_to_stdout() {
    let fx = fixture();
    let output = cl_tool()
        .arg("--schema")
        .arg(&fx.schema)
        .arg("rewrite")
        .arg(&fx.input)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), sample_file());
}

#[test]
fn unknown_field_fails_with_message() {
    let fx = fixture();
    let output = cl_tool()
        .arg("--schema")
        .arg(&fx.schema)
        .arg("get")
        .arg(&fx.input)
        .args(["--record-type", "1", "--field", "99"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("field \"99\" not defined"), "stderr: {stderr}");
}
