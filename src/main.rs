//! LXFML CLI - Command-line tool for inspecting LEGO LXFML model files.
//!
//! This is the main entry point for the `lxfml` command-line application.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::{MatchOptions, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use lxfml::prelude::*;

/// File extension picked up by `check` when no filter is given.
const LXFML_EXTENSION: &str = "lxfml";

/// LXFML - LEGO digital model inspection tool
#[derive(Parser)]
#[command(name = "lxfml")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a model and print a summary
    Info {
        /// Path to the LXFML file
        #[arg(env = "LXFML_INPUT")]
        path: PathBuf,
    },

    /// Load a model and print it as JSON
    Dump {
        /// Path to the LXFML file
        #[arg(env = "LXFML_INPUT")]
        path: PathBuf,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate many LXFML files in parallel
    Check {
        /// Files or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Filter pattern for file names (glob-style, case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { path } => Ok(cmd_info(&path)),
        Commands::Dump { path, pretty } => cmd_dump(&path, pretty),
        Commands::Check { paths, filter } => cmd_check(&paths, filter.as_deref()),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_info(path: &Path) -> ExitCode {
    if !path.is_file() {
        eprintln!("File not found: \"{}\"", path.display());
        return ExitCode::FAILURE;
    }

    let start = Instant::now();
    match lxfml::load(path) {
        Ok(model) => {
            debug!(elapsed = ?start.elapsed(), "model loaded");
            println!("SUCCESS: model loaded");
            println!("  Metadata: {}", model.version);
            println!("  Bricks: {}", model.bricks.len());
            println!("  Parts: {}", model.part_count());
            println!("  Bones: {}", model.bone_count());
            println!("  Materials: {}", model.material_count());
            ExitCode::SUCCESS
        }
        Err(err) => {
            for line in describe_error(&err) {
                eprintln!("{}", line);
            }
            ExitCode::FAILURE
        }
    }
}

fn cmd_dump(path: &Path, pretty: bool) -> Result<ExitCode> {
    let model = lxfml::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let json = if pretty {
        serde_json::to_string_pretty(&model)
    } else {
        serde_json::to_string(&model)
    }
    .context("Failed to serialize model")?;

    println!("{}", json);

    Ok(ExitCode::SUCCESS)
}

fn cmd_check(paths: &[PathBuf], filter: Option<&str>) -> Result<ExitCode> {
    let files = collect_files(paths, filter)?;
    println!("Checking {} files...", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let results: Vec<(&PathBuf, lxfml::Result<Model>)> = files
        .par_iter()
        .map(|path| {
            let result = lxfml::load(path);
            pb.inc(1);
            (path, result)
        })
        .collect();
    pb.finish_with_message("Done");

    let mut failed = 0;
    let mut bricks = 0;
    for (path, result) in &results {
        match result {
            Ok(model) => bricks += model.bricks.len(),
            Err(err) => {
                failed += 1;
                eprintln!("{}", path.display());
                for line in describe_error(err) {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    println!(
        "Checked {} files in {:?}: {} ok ({} bricks), {} failed",
        results.len(),
        start.elapsed(),
        results.len() - failed,
        bricks,
        failed
    );

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Render a load error as the top-level message followed by its causes.
fn describe_error(err: &Error) -> Vec<String> {
    match err {
        Error::Structure(structure) => std::iter::once(format!("PARSE ERROR: {}", structure))
            .chain(structure.causes().map(|cause| format!("  Cause: {}", cause)))
            .collect(),
        other => vec![format!("ERROR: {}", other)],
    }
}

/// Expand files and directories into the list of files to check.
fn collect_files(paths: &[PathBuf], filter: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = filter
        .map(Pattern::new)
        .transpose()
        .context("Invalid filter pattern")?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut files = Vec::new();

    for root in paths {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let keep = match &pattern {
                Some(pattern) => pattern.matches_with(&name, options),
                None => entry
                    .path()
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case(LXFML_EXTENSION)),
            };

            if keep {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("a.lxfml"), "").unwrap();
        std::fs::write(dir.path().join("b.LXFML"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::write(dir.path().join("nested/c.lxfml"), "").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], None).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.lxfml", "b.LXFML", "c.lxfml"]);

        let files = collect_files(&[dir.path().to_path_buf()], Some("*.txt")).unwrap();
        assert_eq!(files.len(), 1);

        let files = collect_files(&[dir.path().to_path_buf()], Some("?.LXFML")).unwrap();
        assert_eq!(files.len(), 3);

        let files = collect_files(&[dir.path().to_path_buf()], Some("NOTES*")).unwrap();
        assert_eq!(files.len(), 1);

        assert!(collect_files(&[dir.path().to_path_buf()], Some("[")).is_err());
    }

    #[test]
    fn test_describe_structure_error() {
        let xml = r#"<LXFML versionMajor="1"><Bricks><Brick designId="1"><Part designId="1"><Bone t="1,2,3"/></Part></Brick></Bricks></LXFML>"#;
        let err = lxfml::load_from_str(xml).unwrap_err();
        let lines = describe_error(&err);

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("PARSE ERROR: line 1,"), "{}", lines[0]);
        assert!(lines[0].ends_with("expected 12 transform values, got 3"));
        assert_eq!(lines[1], "  Cause: expected 12 transform values, got 3");
    }

    #[test]
    fn test_describe_other_error() {
        let err = lxfml::load("/no/such/file.lxfml").unwrap_err();
        let lines = describe_error(&err);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ERROR: I/O error"));
    }
}
