//! Transaction display formatting
//!
//! Formats loaded transactions for terminal display: list rows and a
//! detail view.

use crate::models::TransactionKind;
use crate::services::loader::LoadedTransaction;
use crate::services::dates::STORAGE_FORMAT;

/// Date column text; unreadable dates show the stored value marked with `?`
fn format_date(txn: &LoadedTransaction) -> String {
    match txn.date {
        Some(date) => date.format(STORAGE_FORMAT).to_string(),
        None => format!("?{}", txn.raw_date),
    }
}

/// Format a single transaction as a list row
pub fn format_transaction_row(txn: &LoadedTransaction, symbol: &str) -> String {
    let description = txn.description.lines().next().unwrap_or("");
    format!(
        "{:>5} {:10} {:>12} {:16} {}",
        txn.id.get(),
        truncate(&format_date(txn), 10),
        txn.amount.format_with_symbol(symbol),
        truncate(&txn.category, 16),
        description
    )
    .trim_end()
    .to_string()
}

/// Format a list of transactions with a header
pub fn format_transaction_list(
    kind: TransactionKind,
    transactions: &[&LoadedTransaction],
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return format!("No {} transactions found.\n", kind);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5} {:10} {:>12} {:16} {}\n",
        "ID", "Date", "Amount", "Category", "Description"
    ));
    output.push_str(&"-".repeat(64));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    kind: TransactionKind,
    txn: &LoadedTransaction,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", kind.label(), txn.id));
    output.push_str(&format!("Date:        {}\n", format_date(txn)));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));

    if !txn.description.is_empty() {
        let mut lines = txn.description.lines();
        if let Some(first) = lines.next() {
            output.push_str(&format!("Description: {}\n", first));
        }
        for line in lines {
            output.push_str(&format!("             {}\n", line));
        }
    }

    output
}

const BULLET_PREFIXES: [&str; 3] = ["•", "- ", "* "];

/// Prefix every non-blank description line with `• `
///
/// Lines are trimmed. Lines already starting with a bullet marker are kept
/// as they are and blank lines stay blank.
pub fn apply_bullets(text: &str) -> String {
    text.lines()
        .map(|line| {
            let line = line.trim();
            if line.is_empty() || BULLET_PREFIXES.iter().any(|p| line.starts_with(*p)) {
                line.to_string()
            } else {
                format!("• {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pad or cut a string to `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateCell, Money, TransactionId};
    use chrono::NaiveDate;

    fn sample() -> LoadedTransaction {
        LoadedTransaction {
            id: TransactionId::new(3),
            date: NaiveDate::from_ymd_opt(2025, 1, 15),
            raw_date: DateCell::Text("15-01-2025".into()),
            amount: Money::from_cents(5000),
            description: "Weekly shop\nplus snacks".into(),
            category: "Groceries".into(),
        }
    }

    #[test]
    fn test_format_transaction_row() {
        let formatted = format_transaction_row(&sample(), "$");
        assert!(formatted.contains("15-01-2025"));
        assert!(formatted.contains("Groceries"));
        assert!(formatted.contains("$50.00"));
        assert!(formatted.ends_with("Weekly shop"));
    }

    #[test]
    fn test_unreadable_date_shows_raw_value() {
        let txn = LoadedTransaction {
            date: None,
            raw_date: DateCell::Text("someday".into()),
            ..sample()
        };
        assert!(format_transaction_row(&txn, "$").contains("?someday"));
    }

    #[test]
    fn test_format_empty_list() {
        let formatted = format_transaction_list(TransactionKind::Income, &[], "$");
        assert_eq!(formatted, "No income transactions found.\n");
    }

    #[test]
    fn test_format_transaction_details() {
        let formatted = format_transaction_details(TransactionKind::Expense, &sample(), "€");
        assert!(formatted.starts_with("Expense: 3\n"));
        assert!(formatted.contains("€50.00"));
        assert!(formatted.contains("Description: Weekly shop\n             plus snacks\n"));
    }

    #[test]
    fn test_apply_bullets() {
        assert_eq!(
            apply_bullets("milk\n  eggs  \n\n- bread\n* jam\n• tea\n"),
            "• milk\n• eggs\n\n- bread\n* jam\n• tea"
        );
        assert_eq!(apply_bullets(""), "");
        assert_eq!(apply_bullets(&apply_bullets("a\nb")), "• a\n• b");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10).trim(), "Short");
        let result = truncate("A very long category", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
    }
}
