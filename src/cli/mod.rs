//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod plan;
pub mod report;
pub mod transaction;

pub use plan::{handle_plan_command, PlanCommands};
pub use report::handle_summary_command;
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, ReportingPeriod, TransactionId};
use crate::services::dates::parse_input_date;

/// Parse an amount argument such as `12.50` or `$12.50`
pub(crate) fn parse_amount(raw: &str) -> BudgetResult<Money> {
    Money::parse(raw).map_err(|e| {
        BudgetError::Validation(format!(
            "Invalid amount '{}'. Use a format like '12.50'. Error: {}",
            raw, e
        ))
    })
}

/// Parse a date argument in `dd-mm-yyyy` or `yyyy-mm-dd` form
pub(crate) fn parse_date(raw: &str) -> BudgetResult<NaiveDate> {
    parse_input_date(raw).ok_or_else(|| {
        BudgetError::Validation(format!(
            "Invalid date '{}'. Use DD-MM-YYYY or YYYY-MM-DD",
            raw
        ))
    })
}

/// Parse a `--period` argument, defaulting to the current month
pub(crate) fn parse_period(raw: Option<&str>) -> BudgetResult<ReportingPeriod> {
    match raw {
        Some(raw) => ReportingPeriod::parse(raw).map_err(|e| {
            BudgetError::Validation(format!(
                "{}. Use YYYY-MM (e.g., 2025-01)",
                e
            ))
        }),
        None => Ok(ReportingPeriod::current_month()),
    }
}

pub(crate) fn parse_id(raw: &str) -> BudgetResult<TransactionId> {
    raw.parse()
        .map_err(|_| BudgetError::Validation(format!("Invalid transaction ID: '{}'", raw)))
}
