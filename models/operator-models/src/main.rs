//! drive-status
//!
//! Inspect drive status records from the operator management API.
//!
//! # Usage
//!
//! ```text
//! drive-status inspect drives.json
//! drive-status inspect --json < drives.json
//! drive-status normalize --pretty drives.json
//! drive-status schema
//! ```

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use model_common::{validate_all, Registry};
use operator_models::config::Config;
use operator_models::report::{self, DriveDocument};
use operator_models::{InventorySummary, ServerDrives};

#[derive(Parser)]
#[command(name = "drive-status")]
#[command(about = "Inspect drive status records from the operator management API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate drives and print one line per drive plus a summary
    Inspect {
        /// JSON file with a drive or a list of drives (stdin if omitted)
        file: Option<PathBuf>,
        /// Print the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Re-emit drives as canonical JSON with zero-valued fields dropped
    Normalize {
        /// JSON file with a drive or a list of drives (stdin if omitted)
        file: Option<PathBuf>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the JSON schema of the drive record
    Schema,
}

fn main() -> Result<()> {
    model_common::init_tracing(env!("CARGO_CRATE_NAME"))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file, json } => {
            let config = Config::load(cli.config.as_deref())?;
            run_inspect(file.as_deref(), json, &config)?;
        }
        Commands::Normalize { file, pretty } => {
            run_normalize(file.as_deref(), pretty)?;
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(ServerDrives);
            write_stdout(&format!("{}\n", serde_json::to_string_pretty(&schema)?))?;
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn read_document(file: Option<&Path>) -> Result<DriveDocument> {
    let bytes = read_input(file)?;
    let document = DriveDocument::from_slice(&bytes).context("invalid drive document")?;
    tracing::info!(drives = document.drives().len(), "Loaded drive document");
    Ok(document)
}

fn run_inspect(file: Option<&Path>, json: bool, config: &Config) -> Result<()> {
    let document = read_document(file)?;
    let drives = document.drives();

    validate_all(drives, &Registry::default()).context("drive validation failed")?;

    for drive in report::critical_drives(drives, config) {
        tracing::warn!(
            drive_path = %drive.drive_path,
            endpoint = %drive.endpoint,
            usage = drive.usage_percent(),
            "Drive above critical capacity threshold"
        );
    }

    if json {
        let summary = InventorySummary::from_drives(drives);
        write_stdout(&format!("{}\n", serde_json::to_string_pretty(&summary)?))?;
    } else {
        write_stdout(&report::render_report(drives, config))?;
    }

    Ok(())
}

fn run_normalize(file: Option<&Path>, pretty: bool) -> Result<()> {
    let document = read_document(file)?;
    let mut encoded = document.to_vec(pretty)?;
    encoded.push(b'\n');
    write_stdout_bytes(&encoded)
}

fn write_stdout(output: &str) -> Result<()> {
    write_stdout_bytes(output.as_bytes())
}

/// Write to stdout, exiting quietly when the reader has gone away
fn write_stdout_bytes(output: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(output).and_then(|()| stdout.flush()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed early, output truncated");
            Ok(())
        }
        result => result.context("failed to write to stdout"),
    }
}
