//! Transaction model
//!
//! Represents an expense or income record as it is written to the store.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::OTHER;
use super::ids::TransactionId;
use super::kind::TransactionKind;
use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier, `None` until persisted
    pub id: Option<TransactionId>,

    /// Expense or income
    pub kind: TransactionKind,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount, never negative
    pub amount: Money,

    /// Free text, may span several lines
    #[serde(default)]
    pub description: String,

    /// Category label
    pub category: String,
}

impl Transaction {
    /// Create a new, not yet persisted transaction in the "Other" category
    pub fn new(kind: TransactionKind, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: None,
            kind,
            date,
            amount,
            description: String::new(),
            category: OTHER.to_string(),
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validate the transaction against `today`
    ///
    /// The store does not enforce these rules; callers check before writing.
    pub fn validate(&self, today: NaiveDate) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }

        if self.date > today {
            return Err(TransactionValidationError::FutureDate(self.date));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%d-%m-%Y"),
            self.kind,
            self.amount,
            self.category
        )
    }
}

/// A date as handed to the store for writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::DateTime(datetime)
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A date exactly as read back from the store, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCell {
    /// Already a calendar date
    Native(NaiveDate),
    /// Stored text in whatever format it was written
    Text(String),
    /// NULL or absent
    Missing,
}

impl DateCell {
    /// The stored text, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for DateCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(date) => write!(f, "{}", date.format("%d-%m-%Y")),
            Self::Text(text) => f.write_str(text),
            Self::Missing => Ok(()),
        }
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    MissingAmount,
    NegativeAmount(Money),
    MissingDate,
    FutureDate(NaiveDate),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAmount => write!(f, "Amount is required"),
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative (got {})", amount)
            }
            Self::MissingDate => write!(f, "Date is required"),
            Self::FutureDate(date) => {
                write!(f, "Date {} is in the future", date.format("%d-%m-%Y"))
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
