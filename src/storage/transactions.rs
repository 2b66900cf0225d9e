//! Transaction store backed by SQLite
//!
//! Expenses and income live in two identical tables. Every operation opens
//! its own connection, runs a single statement and drops the connection.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::error::BudgetError;
use crate::models::{DateCell, DateValue, Money, Transaction, TransactionId, TransactionKind};
use crate::services::dates::{has_day_first_shape, ISO_FORMAT, STORAGE_FORMAT};

use super::init::create_schema;

/// A row exactly as stored, before date normalization
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub id: TransactionId,
    pub date: DateCell,
    pub amount: Money,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Convert a date value into the text written to the `date` column
///
/// Dates become `dd-mm-yyyy`. Text already in that shape is kept, ISO text
/// is reformatted and anything else is stored as given.
pub fn format_date(value: &DateValue) -> String {
    match value {
        DateValue::Date(date) => date.format(STORAGE_FORMAT).to_string(),
        DateValue::DateTime(datetime) => datetime.format(STORAGE_FORMAT).to_string(),
        DateValue::Text(text) => {
            if has_day_first_shape(text) {
                return text.clone();
            }
            match NaiveDate::parse_from_str(text, ISO_FORMAT) {
                Ok(date) => date.format(STORAGE_FORMAT).to_string(),
                Err(_) => text.clone(),
            }
        }
    }
}

/// SQLite-backed store for both transaction kinds
#[derive(Debug, Clone)]
pub struct TransactionStore {
    db_path: PathBuf,
}

impl TransactionStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, BudgetError> {
        Connection::open(&self.db_path).map_err(|e| {
            BudgetError::Database(format!(
                "Failed to open {}: {}",
                self.db_path.display(),
                e
            ))
        })
    }

    /// Create the tables if they are absent
    pub fn init(&self) -> Result<(), BudgetError> {
        let conn = self.connect()?;
        create_schema(&conn)
    }

    /// Insert a row and return its new identifier
    pub fn insert(
        &self,
        kind: TransactionKind,
        date: impl Into<DateValue>,
        amount: Money,
        description: &str,
        category: &str,
    ) -> Result<TransactionId, BudgetError> {
        let conn = self.connect()?;
        let sql = format!(
            "INSERT INTO {} (date, amount, description, category) VALUES (?1, ?2, ?3, ?4)",
            kind.table()
        );
        conn.execute(
            &sql,
            params![
                format_date(&date.into()),
                amount.to_f64(),
                description,
                category
            ],
        )?;

        let id = TransactionId::new(conn.last_insert_rowid());
        debug!(%kind, %id, "Inserted transaction");
        Ok(id)
    }

    /// Insert a model transaction, ignoring any identifier it carries
    pub fn insert_transaction(&self, txn: &Transaction) -> Result<TransactionId, BudgetError> {
        self.insert(
            txn.kind,
            txn.date,
            txn.amount,
            &txn.description,
            &txn.category,
        )
    }

    /// Replace every column of an existing row
    pub fn update(
        &self,
        kind: TransactionKind,
        id: TransactionId,
        date: impl Into<DateValue>,
        amount: Money,
        description: &str,
        category: &str,
    ) -> Result<(), BudgetError> {
        let conn = self.connect()?;
        let sql = format!(
            "UPDATE {} SET date = ?1, amount = ?2, description = ?3, category = ?4 WHERE id = ?5",
            kind.table()
        );
        let changed = conn.execute(
            &sql,
            params![
                format_date(&date.into()),
                amount.to_f64(),
                description,
                category,
                id.get()
            ],
        )?;

        if changed == 0 {
            return Err(BudgetError::transaction_not_found(kind, id));
        }
        debug!(%kind, %id, "Updated transaction");
        Ok(())
    }

    pub fn delete(&self, kind: TransactionKind, id: TransactionId) -> Result<(), BudgetError> {
        let conn = self.connect()?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
        let changed = conn.execute(&sql, params![id.get()])?;

        if changed == 0 {
            return Err(BudgetError::transaction_not_found(kind, id));
        }
        debug!(%kind, %id, "Deleted transaction");
        Ok(())
    }

    /// Fetch one row by identifier
    pub fn get(&self, kind: TransactionKind, id: TransactionId) -> Result<StoredRow, BudgetError> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT id, date, amount, description, category FROM {} WHERE id = ?1",
            kind.table()
        );
        conn.query_row(&sql, params![id.get()], read_row)
            .optional()?
            .ok_or_else(|| BudgetError::transaction_not_found(kind, id))?
    }

    /// Fetch every row of a kind in identifier order
    pub fn fetch_all(&self, kind: TransactionKind) -> Result<Vec<StoredRow>, BudgetError> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT id, date, amount, description, category FROM {} ORDER BY id",
            kind.table()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row??);
        }
        Ok(result)
    }
}

/// Map a result row; the outer error is SQLite's, the inner one ours
fn read_row(row: &Row<'_>) -> rusqlite::Result<Result<StoredRow, BudgetError>> {
    let id: i64 = row.get(0)?;
    let date = match row.get_ref(1)? {
        ValueRef::Null => Ok(DateCell::Missing),
        ValueRef::Text(bytes) => Ok(DateCell::Text(
            String::from_utf8_lossy(bytes).into_owned(),
        )),
        ValueRef::Integer(value) => Ok(DateCell::Text(value.to_string())),
        ValueRef::Real(value) => Ok(DateCell::Text(value.to_string())),
        ValueRef::Blob(_) => Err(BudgetError::UnsupportedDate(format!(
            "binary value in row {}",
            id
        ))),
    };
    let amount = read_amount(row.get_ref(2)?);
    let description = read_text(row.get_ref(3)?);
    let category = read_text(row.get_ref(4)?);

    Ok(date.map(|date| StoredRow {
        id: TransactionId::new(id),
        date,
        amount,
        description,
        category,
    }))
}

/// Amount cell as money; anything unreadable counts as zero
fn read_amount(value: ValueRef<'_>) -> Money {
    match value {
        ValueRef::Real(value) => Money::from_f64(value),
        ValueRef::Integer(value) => Money::from_f64(value as f64),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Money::from_f64(value),
                _ => Money::parse(&text).unwrap_or_default(),
            }
        }
        ValueRef::Null | ValueRef::Blob(_) => Money::zero(),
    }
}

/// Text cell with invalid UTF-8 replaced; NULL stays `None`
fn read_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
    }
}
