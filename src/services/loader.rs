//! Transaction loading
//!
//! Reads every stored row of both kinds into in-memory tables with their
//! date column normalized.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::DateOrder;
use crate::error::BudgetResult;
use crate::models::{
    DateCell, Money, ReportingPeriod, Transaction, TransactionId, TransactionKind,
};
use crate::storage::transactions::{StoredRow, TransactionStore};

use super::dates::normalize_dates;

/// A stored transaction with its date normalized
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTransaction {
    pub id: TransactionId,
    /// `None` when the stored value could not be read as a date
    pub date: Option<NaiveDate>,
    /// The value as stored
    pub raw_date: DateCell,
    pub amount: Money,
    pub description: String,
    pub category: String,
}

impl LoadedTransaction {
    /// Whether the date falls inside `period`; unreadable dates never do
    pub fn in_period(&self, period: &ReportingPeriod) -> bool {
        self.date.is_some_and(|date| period.contains(date))
    }

    /// Convert to the model type, if the date could be read
    pub fn to_transaction(&self, kind: TransactionKind) -> Option<Transaction> {
        let date = self.date?;
        let mut txn = Transaction::new(kind, date, self.amount)
            .with_category(self.category.clone())
            .with_description(self.description.clone());
        txn.id = Some(self.id);
        Some(txn)
    }
}

/// All loaded rows of one kind, in identifier order
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTable {
    kind: TransactionKind,
    rows: Vec<LoadedTransaction>,
}

impl TransactionTable {
    /// Build a table from stored rows, normalizing the date column
    pub fn from_rows(kind: TransactionKind, rows: Vec<StoredRow>, order: DateOrder) -> Self {
        let cells: Vec<DateCell> = rows.iter().map(|row| row.date.clone()).collect();
        let dates = normalize_dates(&cells, order);

        let rows = rows
            .into_iter()
            .zip(dates)
            .map(|(row, date)| LoadedTransaction {
                id: row.id,
                date,
                raw_date: row.date,
                amount: row.amount,
                description: row.description.unwrap_or_default(),
                category: row.category.unwrap_or_default(),
            })
            .collect();

        Self { kind, rows }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn rows(&self) -> &[LoadedTransaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: TransactionId) -> Option<&LoadedTransaction> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Category names referenced by at least one row
    pub fn categories_in_use(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .filter(|row| !row.category.is_empty())
            .map(|row| row.category.clone())
            .collect()
    }

    /// Rows whose date could not be read
    pub fn unparsed(&self) -> impl Iterator<Item = &LoadedTransaction> {
        self.rows.iter().filter(|row| row.date.is_none())
    }

    /// Rows inside `period`
    pub fn in_period<'a>(
        &'a self,
        period: &'a ReportingPeriod,
    ) -> impl Iterator<Item = &'a LoadedTransaction> {
        self.rows.iter().filter(move |row| row.in_period(period))
    }

    /// Rows sorted newest first, unreadable dates last, ties by newest id
    pub fn newest_first(&self) -> Vec<&LoadedTransaction> {
        let mut rows: Vec<_> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        rows
    }
}

/// Reads both transaction tables from the store
pub struct TransactionLoader<'a> {
    store: &'a TransactionStore,
    order: DateOrder,
}

impl<'a> TransactionLoader<'a> {
    pub fn new(store: &'a TransactionStore, order: DateOrder) -> Self {
        Self { store, order }
    }

    /// Load one kind
    pub fn load(&self, kind: TransactionKind) -> BudgetResult<TransactionTable> {
        let rows = self.store.fetch_all(kind)?;
        let table = TransactionTable::from_rows(kind, rows, self.order);

        let unparsed = table.unparsed().count();
        if unparsed > 0 {
            warn!(table = kind.table(), unparsed, "Some stored dates could not be read");
        }
        debug!(table = kind.table(), rows = table.len(), "Loaded transactions");

        Ok(table)
    }

    /// Load `(expenses, income)`
    pub fn load_all(&self) -> BudgetResult<(TransactionTable, TransactionTable)> {
        Ok((
            self.load(TransactionKind::Expense)?,
            self.load(TransactionKind::Income)?,
        ))
    }
}
