//! CLI tool to inspect and edit CommonLine fixed-width files.
//!
//! Usage:
//!   cl-tool --schema <catalog.toml> get <file> --record-type 1 --field 62a
//!   cl-tool --schema <catalog.toml> set <file> --record-type 1 --field 62a --value X -o <out>
//!   cl-tool --schema <catalog.toml> rewrite <file> -o <out> [--file-type DISB --version 5]
//!
//! Record types are spelled `H`, `T`, or a body code such as `1` or `102`.
//! If no output file is specified, `set` and `rewrite` write to stdout.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commonline::{Commonline, FileType, RecordType, StandardSchemas, Version};

#[derive(Parser)]
#[command(name = "cl-tool", version, about = "Inspect and edit CommonLine files")]
struct Cli {
    /// Schema catalog file (TOML).
    #[arg(short, long)]
    schema: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one field value from a record instance.
    Get {
        /// CommonLine file to read.
        file: PathBuf,
        /// Record type: H, T, or a body code (1, 102, ...).
        #[arg(short, long)]
        record_type: String,
        /// Field id, e.g. 2 or 62a.
        #[arg(short, long)]
        field: String,
        /// 1-based instance index within the record type.
        #[arg(short, long, default_value_t = 1)]
        index: usize,
    },
    /// Update one field value and re-serialize the file.
    Set {
        /// CommonLine file to read.
        file: PathBuf,
        /// Record type: H, T, or a body code (1, 102, ...).
        #[arg(short, long)]
        record_type: String,
        /// Field id, e.g. 2 or 62a.
        #[arg(short, long)]
        field: String,
        /// 1-based instance index within the record type.
        #[arg(short, long, default_value_t = 1)]
        index: usize,
        /// New field value.
        #[arg(short, long)]
        value: String,
        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode and re-encode a file, optionally converting type/version.
    Rewrite {
        /// CommonLine file to read.
        file: PathBuf,
        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Target file type (default: the file's own).
        #[arg(long)]
        file_type: Option<FileType>,
        /// Target version (default: the file's own).
        #[arg(long)]
        version: Option<Version>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = fs::read_to_string(&cli.schema)
        .map_err(|e| format!("reading schema catalog '{}': {e}", cli.schema.display()))?;
    let engine = Commonline::new(StandardSchemas::from_toml_str(&catalog)?);

    match cli.command {
        Command::Get {
            file,
            record_type,
            field,
            index,
        } => {
            let raw = read_input(&file)?;
            let doc = engine.read_document(&raw)?;
            let value =
                engine.get_field(&doc, &RecordType::from_code(&record_type), &field, index)?;
            println!("{value}");
        }
        Command::Set {
            file,
            record_type,
            field,
            index,
            value,
            output,
        } => {
            let raw = read_input(&file)?;
            let mut doc = engine.read_document(&raw)?;
            engine.set_field(
                &mut doc,
                &RecordType::from_code(&record_type),
                &field,
                index,
                &value,
            )?;
            let out = engine.write_document(&doc, doc.file_type(), doc.version())?;
            write_output(output.as_deref(), &out)?;
        }
        Command::Rewrite {
            file,
            output,
            file_type,
            version,
        } => {
            let raw = read_input(&file)?;
            let doc = engine.read_document(&raw)?;
            let file_type = file_type.unwrap_or(doc.file_type());
            let version = version.unwrap_or(doc.version());
            let out = engine.write_document(&doc, file_type, version)?;
            write_output(output.as_deref(), &out)?;
        }
    }

    Ok(())
}

fn read_input(path: &std::path::Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("reading '{}': {e}", path.display()))
}

fn write_output(path: Option<&std::path::Path>, content: &str) -> Result<(), String> {
    match path {
        Some(path) => fs::write(path, content)
            .map_err(|e| format!("writing '{}': {e}", path.display())),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| format!("writing output: {e}")),
    }
}
