//! wren-analyzer CLI — analyze Wren source files and report
//! diagnostics.
//!
//! Usage:
//!   wren-analyzer [--json] <path>
//!
//! `path` is a single `.wren` file or a directory; for a directory,
//! every `.wren` file directly inside it is analyzed (no recursion).
//! Default output is the pretty reporter with source-line
//! underlining; `--json` emits one JSON array of diagnostics in
//! pipeline order.

mod report;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use wren_analyzer::analyze;
use wren_diagnostics::Diagnostic;
use wren_lexer::SourceBuffer;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => process::exit(0),
        Err(code) => process::exit(code),
    }
}

fn run(args: &[String]) -> Result<(), i32> {
    let mut json = false;
    let mut path: Option<&str> = None;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("wren-analyzer {VERSION}");
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("error: unknown option '{other}'");
                eprintln!("Run 'wren-analyzer --help' for usage.");
                return Err(1);
            }
            other => {
                if path.is_some() {
                    eprintln!("error: more than one path given");
                    return Err(1);
                }
                path = Some(other);
            }
        }
    }

    let Some(path) = path else {
        print_usage();
        return Err(1);
    };

    let files = collect_wren_files(Path::new(path)).map_err(|message| {
        eprintln!("error: {message}");
        1
    })?;

    let mut analyzed = Vec::new();
    for file in &files {
        let source = fs::read_to_string(file).map_err(|e| {
            eprintln!("error: failed to read {}: {e}", file.display());
            1
        })?;
        let display_path = file.display().to_string();
        let analysis = analyze(&source, &display_path);
        analyzed.push((SourceBuffer::new(display_path, source), analysis.diagnostics));
    }

    if json {
        let diagnostics: Vec<&Diagnostic> =
            analyzed.iter().flat_map(|(_, diags)| diags.iter()).collect();
        match serde_json::to_string(&diagnostics) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("error: failed to serialize diagnostics: {e}");
                return Err(1);
            }
        }
    } else {
        for (buffer, diagnostics) in &analyzed {
            for diagnostic in diagnostics {
                print!("{}", report::pretty(buffer, diagnostic));
            }
        }
    }

    Ok(())
}

fn print_usage() {
    println!("wren-analyzer {VERSION} — static analyzer for Wren");
    println!();
    println!("USAGE:");
    println!("    wren-analyzer [--json] <path>");
    println!();
    println!("ARGUMENTS:");
    println!("    <path>    A .wren file, or a directory whose .wren files are analyzed");
    println!();
    println!("OPTIONS:");
    println!("    --json    Emit diagnostics as a JSON array instead of pretty text");
    println!("    -h, --help");
    println!("    -V, --version");
}

/// Resolve the CLI path argument into the list of files to analyze.
/// Directories are walked one level deep.
fn collect_wren_files(path: &Path) -> Result<Vec<PathBuf>, String> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(format!("'{}' is not a file or directory", path.display()));
    }

    let entries =
        fs::read_dir(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("directory entry error: {e}"))?;
        let entry_path = entry.path();
        if entry_path.is_file() && entry_path.extension().map(|e| e == "wren").unwrap_or(false) {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
