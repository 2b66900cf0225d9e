//! Plan CLI commands
//!
//! Shows and edits the categories and planned amounts in the active
//! category file.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::category::format_plan;
use crate::error::BudgetResult;
use crate::models::TransactionKind;
use crate::services::{PlanEditor, TransactionLoader};
use crate::storage::Storage;

use super::parse_amount;

/// Plan subcommands
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show categories and planned amounts
    Show,
    /// Add a category
    Add {
        /// expense or income
        kind: TransactionKind,
        /// Category name
        name: String,
        /// Initial planned amount
        #[arg(short, long, default_value = "0")]
        planned: String,
    },
    /// Remove a category that no transaction uses
    Remove {
        /// expense or income
        kind: TransactionKind,
        /// Category name
        name: String,
    },
    /// Change a planned amount
    Set {
        /// expense or income
        kind: TransactionKind,
        /// Category name
        name: String,
        /// New planned amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Print the active category file and where it came from
    Path,
}

/// Handle a plan command
pub fn handle_plan_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PlanCommands,
) -> BudgetResult<()> {
    let repo = &storage.categories;
    let editor = PlanEditor::new(repo);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        PlanCommands::Show => {
            let config = repo.load()?;
            print!("{}", format_plan(&config, symbol));
        }

        PlanCommands::Add {
            kind,
            name,
            planned,
        } => {
            let config = repo.load()?;
            let planned = parse_amount(&planned)?;
            editor.add(&config, kind, &name, planned)?;
            println!(
                "Added {} category '{}' with planned amount {}",
                kind,
                name.trim(),
                planned.format_with_symbol(symbol)
            );
        }

        PlanCommands::Remove { kind, name } => {
            let config = repo.load()?;
            let in_use = TransactionLoader::new(&storage.transactions, settings.date_order)
                .load(kind)?
                .categories_in_use();
            editor.remove(&config, kind, &name, &in_use)?;
            println!("Removed {} category '{}'", kind, name.trim());
        }

        PlanCommands::Set { kind, name, amount } => {
            let config = repo.load()?;
            let planned = parse_amount(&amount)?;
            editor.set_planned(&config, kind, &name, planned)?;
            println!(
                "Planned amount for {} category '{}' set to {}",
                kind,
                name.trim(),
                planned.format_with_symbol(symbol)
            );
        }

        PlanCommands::Path => {
            println!("{}", repo.describe());
        }
    }

    Ok(())
}
