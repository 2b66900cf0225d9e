//! Monthly Summary Report
//!
//! Planned vs actual amounts for both kinds over one reporting period.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryConfiguration, Money, ReportingPeriod, TransactionKind};
use crate::services::loader::TransactionTable;
use crate::services::summary::{summarize, SummaryRow};

/// Planned vs actual report for one month
#[derive(Debug, Clone)]
pub struct MonthlySummaryReport {
    pub period: ReportingPeriod,
    pub expenses: Vec<SummaryRow>,
    pub income: Vec<SummaryRow>,
    /// Sum of every expense in the period
    pub total_expenses: Money,
    /// Sum of every income row in the period
    pub total_income: Money,
    /// Rows of either kind left out because their date could not be read
    pub unparsed_count: usize,
    currency_symbol: String,
}

impl MonthlySummaryReport {
    /// Generate the report from loaded tables and the active configuration
    pub fn generate(
        config: &CategoryConfiguration,
        expenses: &TransactionTable,
        income: &TransactionTable,
        period: ReportingPeriod,
        currency_symbol: &str,
    ) -> Self {
        let expense_plan = config.for_kind(TransactionKind::Expense);
        let income_plan = config.for_kind(TransactionKind::Income);

        Self {
            period,
            expenses: summarize(
                expenses.rows(),
                expense_plan.categories(),
                expense_plan.planned_map(),
                period,
            ),
            income: summarize(
                income.rows(),
                income_plan.categories(),
                income_plan.planned_map(),
                period,
            ),
            total_expenses: expenses.in_period(&period).map(|row| row.amount).sum(),
            total_income: income.in_period(&period).map(|row| row.amount).sum(),
            unparsed_count: expenses.unparsed().count() + income.unparsed().count(),
            currency_symbol: currency_symbol.to_string(),
        }
    }

    /// Rows of one kind
    pub fn rows(&self, kind: TransactionKind) -> &[SummaryRow] {
        match kind {
            TransactionKind::Expense => &self.expenses,
            TransactionKind::Income => &self.income,
        }
    }

    /// Income minus expenses for the period
    pub fn net(&self) -> Money {
        self.total_income - self.total_expenses
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let symbol = self.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str(&format!("Summary for {}\n", self.period.label()));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        for kind in TransactionKind::ALL {
            output.push_str(&format!("\n{}\n", kind.label().to_uppercase()));
            output.push_str(&format!(
                "{:<28} {:>11} {:>11} {:>11}\n",
                "Category", "Planned", "Actual", "Diff"
            ));
            output.push_str(&"-".repeat(64));
            output.push('\n');

            let rows = self.rows(kind);
            if rows.is_empty() {
                output.push_str("  (no categories configured)\n");
            }
            for row in rows {
                output.push_str(&format!(
                    "{:<28} {:>11} {:>11} {:>11}\n",
                    row.category,
                    row.planned.format_with_symbol(symbol),
                    row.actual.format_with_symbol(symbol),
                    row.diff.format_signed(symbol)
                ));
            }
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>11}\n",
            "Net (income - expenses)",
            self.net().format_signed(symbol)
        ));

        if self.unparsed_count > 0 {
            output.push_str(&format!(
                "\nNote: {} transaction(s) with unreadable dates were left out.\n",
                self.unparsed_count
            ));
        }

        output
    }

    /// Export the report to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Kind", "Category", "Planned", "Actual", "Diff"])
            .map_err(|e| BudgetError::Export(e.to_string()))?;

        for kind in TransactionKind::ALL {
            for row in self.rows(kind) {
                csv.write_record([
                    kind.as_str(),
                    row.category.as_str(),
                    row.planned.format_with_symbol("").as_str(),
                    row.actual.format_with_symbol("").as_str(),
                    row.diff.format_with_symbol("").as_str(),
                ])
                .map_err(|e| BudgetError::Export(e.to_string()))?;
            }
        }

        csv.flush().map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}
