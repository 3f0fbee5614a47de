//! Balance CLI commands

use clap::Subcommand;

use super::parse_balance;
use crate::display::{format_balance_summary, DisplayOptions};
use crate::error::LedgerResult;
use crate::services::Ledger;
use crate::storage::KeyValueStore;

/// Balance subcommands; with none, the current balance is shown
#[derive(Subcommand, Debug)]
pub enum BalanceCommands {
    /// Set the initial balance everything else is added to
    Set {
        /// Amount, may be negative (e.g. "1250.50" or "-20")
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Handle `balance` and its subcommands
pub fn handle_balance_command<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    options: &DisplayOptions,
    cmd: Option<BalanceCommands>,
) -> LedgerResult<()> {
    match cmd {
        None => {
            print!(
                "{}",
                format_balance_summary(
                    ledger.initial_balance(),
                    ledger.current_balance(),
                    ledger.transactions().len(),
                    options,
                )
            );
        }
        Some(BalanceCommands::Set { value }) => {
            let value = parse_balance(&value)?;
            ledger.set_initial_balance(value)?;

            println!("Initial balance set to {}", options.money(value));
            println!("Current balance: {}", options.money(ledger.current_balance()));
        }
    }

    Ok(())
}
