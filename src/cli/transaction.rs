//! Expense and income CLI commands
//!
//! The same subcommands serve both kinds; the kind comes from the parent
//! command (`budget expense ...` or `budget income ...`).

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{
    apply_bullets, format_transaction_details, format_transaction_list,
};
use crate::error::{BudgetError, BudgetResult};
use crate::models::TransactionKind;
use crate::services::{TransactionInput, TransactionLoader, TransactionService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_id, parse_period};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Amount (e.g., "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name (defaults to "Other")
        #[arg(short, long)]
        category: Option<String>,
        /// Date (DD-MM-YYYY or YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Prefix each description line with a bullet
        #[arg(long)]
        bullets: bool,
    },
    /// List transactions, newest first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only show this month (YYYY-MM)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Prefix each description line with a bullet
        #[arg(long)]
        bullets: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command for `kind`
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    kind: TransactionKind,
    cmd: TransactionCommands,
) -> BudgetResult<()> {
    let service = TransactionService::new(&storage.transactions);
    let loader = TransactionLoader::new(&storage.transactions, settings.date_order);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            date,
            description,
            bullets,
        } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => chrono::Local::now().date_naive(),
            };
            let mut description = description.unwrap_or_default();
            if bullets {
                description = apply_bullets(&description);
            }
            let input = TransactionInput {
                amount: Some(parse_amount(&amount)?),
                date: Some(date),
                description,
                category: category.unwrap_or_default(),
            };

            let id = service.add(kind, &input)?;
            let table = loader.load(kind)?;
            match table.find(id) {
                Some(row) => {
                    println!("Recorded {} {}", kind, id);
                    print!("{}", format_transaction_details(kind, row, symbol));
                }
                None => println!("Recorded {} {}", kind, id),
            }
        }

        TransactionCommands::List { limit, period } => {
            let table = loader.load(kind)?;
            let period = period.as_deref().map(|p| parse_period(Some(p))).transpose()?;

            let rows: Vec<_> = table
                .newest_first()
                .into_iter()
                .filter(|row| period.map_or(true, |p| row.in_period(&p)))
                .take(limit)
                .collect();

            print!("{}", format_transaction_list(kind, &rows, symbol));

            let unparsed = table.unparsed().count();
            if unparsed > 0 && period.is_none() {
                println!("\n{} row(s) have unreadable dates (marked with ?).", unparsed);
            }
        }

        TransactionCommands::Show { id } => {
            let id = parse_id(&id)?;
            let table = loader.load(kind)?;
            let row = table
                .find(id)
                .ok_or_else(|| BudgetError::transaction_not_found(kind, id))?;
            print!("{}", format_transaction_details(kind, row, symbol));
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            date,
            description,
            bullets,
        } => {
            let id = parse_id(&id)?;
            let table = loader.load(kind)?;
            let row = table
                .find(id)
                .ok_or_else(|| BudgetError::transaction_not_found(kind, id))?;

            let mut input = TransactionInput::from_loaded(row);
            if let Some(raw) = amount {
                input.amount = Some(parse_amount(&raw)?);
            }
            if let Some(raw) = date {
                input.date = Some(parse_date(&raw)?);
            }
            if let Some(category) = category {
                input.category = category;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if bullets {
                input.description = apply_bullets(&input.description);
            }

            service.update(kind, id, &input)?;
            println!("Updated {} {}", kind, id);
        }

        TransactionCommands::Delete { id } => {
            let id = parse_id(&id)?;
            service.delete(kind, id)?;
            println!("Deleted {} {}", kind, id);
        }
    }

    Ok(())
}
