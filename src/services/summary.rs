//! Planned vs actual aggregation
//!
//! Produces one row per configured category for a reporting period. The
//! reserved "Totals" category sums every transaction in the period.

use std::collections::HashMap;

use crate::models::{Money, ReportingPeriod, TOTALS};

use super::loader::LoadedTransaction;

/// One line of a period summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub category: String,
    pub planned: Money,
    pub actual: Money,
    /// `planned - actual`; negative means overspent (or under-earned)
    pub diff: Money,
}

/// Summarize `transactions` against `categories` for `period`
///
/// Rows follow the order of `categories`. Transactions without a readable
/// date are never counted.
pub fn summarize(
    transactions: &[LoadedTransaction],
    categories: &[String],
    planned: &HashMap<String, Money>,
    period: ReportingPeriod,
) -> Vec<SummaryRow> {
    let in_period: Vec<&LoadedTransaction> = transactions
        .iter()
        .filter(|txn| txn.in_period(&period))
        .collect();

    categories
        .iter()
        .map(|category| {
            let actual: Money = if category == TOTALS {
                in_period.iter().map(|txn| txn.amount).sum()
            } else {
                in_period
                    .iter()
                    .filter(|txn| &txn.category == category)
                    .map(|txn| txn.amount)
                    .sum()
            };
            let planned = planned.get(category).copied().unwrap_or_default();

            SummaryRow {
                category: category.clone(),
                planned,
                actual,
                diff: planned - actual,
            }
        })
        .collect()
}
