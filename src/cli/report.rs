//! Summary CLI command
//!
//! Prints the monthly planned-vs-actual summary or exports it to CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::reports::MonthlySummaryReport;
use crate::services::TransactionLoader;
use crate::storage::Storage;

use super::parse_period;

/// Handle the summary command
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    period: Option<String>,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let period = parse_period(period.as_deref())?;

    let config = storage.categories.load()?;
    let (expenses, income) =
        TransactionLoader::new(&storage.transactions, settings.date_order).load_all()?;

    let report = MonthlySummaryReport::generate(
        &config,
        &expenses,
        &income,
        period,
        &settings.currency_symbol,
    );

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            BudgetError::Export(format!(
                "Failed to create file {}: {}",
                path.display(),
                e
            ))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("Summary exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}
