//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_ledger_json, export_transactions_csv, ExportFormat};
use crate::services::Ledger;
use crate::storage::KeyValueStore;

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// csv (transactions) or json (full ledger)
    pub format: String,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn write_export<S: KeyValueStore, W: Write>(
    ledger: &Ledger<S>,
    format: ExportFormat,
    writer: W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Csv => export_transactions_csv(ledger.transactions(), writer),
        ExportFormat::Json => export_ledger_json(ledger.state(), writer, true),
    }
}

/// Handle `export`
pub fn handle_export_command<S: KeyValueStore>(
    ledger: &Ledger<S>,
    args: &ExportArgs,
) -> LedgerResult<()> {
    let format: ExportFormat = args.format.parse()?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Cannot create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(ledger, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;

            info!(path = %path.display(), %format, "ledger exported");
            println!(
                "Exported {} transaction(s) as {} to {}",
                ledger.transactions().len(),
                format,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_export(ledger, format, &mut handle)?;
            if format == ExportFormat::Json {
                writeln!(handle)?;
            }
        }
    }

    Ok(())
}
