use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use budget_tracker::cli::{
    handle_plan_command, handle_summary_command, handle_transaction_command, PlanCommands,
    TransactionCommands,
};
use budget_tracker::config::{BudgetPaths, Settings};
use budget_tracker::models::TransactionKind;
use budget_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Personal finance tracker with planned-vs-actual monthly summaries",
    long_about = "Records expenses and income in a local SQLite database, \
                  checks them against the planned amounts in categories.csv \
                  and prints month-by-month planned-vs-actual summaries."
)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense commands
    #[command(subcommand, alias = "expenses")]
    Expense(TransactionCommands),

    /// Income commands
    #[command(subcommand)]
    Income(TransactionCommands),

    /// Planned vs actual summary for a month
    Summary {
        /// Month to summarize (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        period: Option<String>,
        /// Write CSV to this file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Category and planned amount commands
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level.to_string().to_lowercase());

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_transaction_command(&storage, &settings, TransactionKind::Expense, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_transaction_command(&storage, &settings, TransactionKind::Income, cmd)?;
        }
        Some(Commands::Summary { period, output }) => {
            handle_summary_command(&storage, &settings, period, output)?;
        }
        Some(Commands::Plan(cmd)) => {
            handle_plan_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("Budget Tracker Configuration");
            println!("============================");
            println!("Config directory: {}", paths.user_config_dir().display());
            println!("Categories file:  {}", storage.categories.describe());
            println!("Database:         {}", paths.database_file().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date order:      {:?}", settings.date_order);
        }
        None => {
            println!("Budget Tracker - planned vs actual, month by month");
            println!();
            println!("Run 'budget --help' for usage information.");
        }
    }

    Ok(())
}

/// Install the stderr subscriber; `RUST_LOG` wins over `--log-level`
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            env!("CARGO_PKG_NAME").replace('-', "_"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
