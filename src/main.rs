use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use pocket_ledger::cli::{
    handle_add_command, handle_balance_command, handle_clear_command, handle_export_command,
    handle_list_command, handle_recent_command, handle_remove_command, handle_report_command,
    handle_years_command, AddArgs, BalanceCommands, ConsoleNotifier, ExportArgs, ListArgs,
    ReportCommands,
};
use pocket_ledger::config::paths::DATA_DIR_ENV;
use pocket_ledger::config::{LedgerPaths, Settings};
use pocket_ledger::display::DisplayOptions;
use pocket_ledger::logging::init_tracing;
use pocket_ledger::services::Ledger;
use pocket_ledger::storage::open_file_store;

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "Personal income and expense ledger",
    long_about = "pocket keeps a running balance of your income and expenses \
                  and summarizes them by month and year. Data is stored in \
                  POCKET_LEDGER_DATA_DIR, or the platform config directory."
)]
struct Cli {
    /// Log debug diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the ledger and settings
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current balance, or set the initial one
    Balance {
        #[command(subcommand)]
        action: Option<BalanceCommands>,
    },

    /// Record an income or expense
    Add(AddArgs),

    /// Remove a transaction by id (full id or the txn-xxxxxxxx short form)
    #[command(alias = "rm")]
    Remove {
        /// Transaction id
        id: String,
    },

    /// Remove every transaction, keeping the initial balance
    Clear {
        /// Confirm removal
        #[arg(long)]
        yes: bool,
    },

    /// List transactions, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the most recent transactions
    Recent {
        /// How many to show (defaults to the configured count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Monthly and annual reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Years that have transactions
    Years,

    /// Export the ledger as CSV or JSON
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    let options = DisplayOptions::from_settings(&settings);

    let Some(command) = cli.command else {
        println!("pocket - personal income and expense ledger");
        println!();
        println!("Run 'pocket --help' for usage information.");
        return Ok(());
    };

    if let Commands::Config = command {
        println!("pocket-ledger Configuration");
        println!("===========================");
        println!("Base directory:  {}", paths.base_dir().display());
        println!("Data directory:  {}", paths.data_dir().display());
        println!("Settings file:   {}", paths.settings_file().display());
        println!();
        println!("Settings:");
        println!("  Currency symbol: {}", settings.currency_symbol);
        println!("  Date format:     {}", options.date_format);
        println!("  Recent count:    {}", settings.recent_count);
        return Ok(());
    }

    let store = open_file_store(&paths)?;
    debug!(dir = %store.dir().display(), "using file store");
    let mut ledger = Ledger::open(store)?.with_notifier(ConsoleNotifier);

    match command {
        Commands::Balance { action } => handle_balance_command(&mut ledger, &options, action)?,
        Commands::Add(args) => handle_add_command(&mut ledger, &options, args)?,
        Commands::Remove { id } => handle_remove_command(&mut ledger, &options, &id)?,
        Commands::Clear { yes } => handle_clear_command(&mut ledger, &options, yes)?,
        Commands::List(args) => handle_list_command(&ledger, &options, &args)?,
        Commands::Recent { count } => {
            let count = count.unwrap_or(settings.recent_count);
            handle_recent_command(&ledger, &options, count)?
        }
        Commands::Report(cmd) => handle_report_command(&ledger, &options, cmd)?,
        Commands::Years => handle_years_command(&ledger)?,
        Commands::Export(args) => handle_export_command(&ledger, &args)?,
        Commands::Config => {}
    }

    Ok(())
}
