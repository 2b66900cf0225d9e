//! Transaction service
//!
//! Validates user input before it reaches the store. The store itself
//! accepts anything; the amount and date rules live here.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Money, Transaction, TransactionId, TransactionKind, TransactionValidationError, OTHER,
};
use crate::storage::TransactionStore;

use super::loader::LoadedTransaction;

/// Values entered for a new or edited transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionInput {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub category: String,
}

impl TransactionInput {
    /// Start from an existing row, e.g. for editing
    pub fn from_loaded(row: &LoadedTransaction) -> Self {
        Self {
            amount: Some(row.amount),
            date: row.date,
            description: row.description.clone(),
            category: row.category.clone(),
        }
    }

    /// Check the input and turn it into a transaction of `kind`
    ///
    /// A blank category becomes "Other".
    pub fn validate(
        &self,
        kind: TransactionKind,
        today: NaiveDate,
    ) -> Result<Transaction, TransactionValidationError> {
        let amount = self.amount.ok_or(TransactionValidationError::MissingAmount)?;
        let date = self.date.ok_or(TransactionValidationError::MissingDate)?;

        let category = match self.category.trim() {
            "" => OTHER,
            name => name,
        };

        let txn = Transaction::new(kind, date, amount)
            .with_category(category)
            .with_description(self.description.clone());
        txn.validate(today)?;
        Ok(txn)
    }
}

/// Service for recording, editing and deleting transactions
pub struct TransactionService<'a> {
    store: &'a TransactionStore,
    today: NaiveDate,
}

impl<'a> TransactionService<'a> {
    /// Create a service that validates against the local calendar date
    pub fn new(store: &'a TransactionStore) -> Self {
        Self::with_today(store, chrono::Local::now().date_naive())
    }

    /// Create a service with a fixed notion of "today"
    pub fn with_today(store: &'a TransactionStore, today: NaiveDate) -> Self {
        Self { store, today }
    }

    fn check(&self, kind: TransactionKind, input: &TransactionInput) -> BudgetResult<Transaction> {
        input
            .validate(kind, self.today)
            .map_err(|e| BudgetError::Validation(e.to_string()))
    }

    /// Record a new transaction
    pub fn add(
        &self,
        kind: TransactionKind,
        input: &TransactionInput,
    ) -> BudgetResult<TransactionId> {
        let txn = self.check(kind, input)?;
        let id = self.store.insert_transaction(&txn)?;
        info!(%kind, %id, amount = %txn.amount, category = %txn.category, "Recorded transaction");
        Ok(id)
    }

    /// Replace an existing transaction
    pub fn update(
        &self,
        kind: TransactionKind,
        id: TransactionId,
        input: &TransactionInput,
    ) -> BudgetResult<()> {
        let txn = self.check(kind, input)?;
        self.store.update(
            kind,
            id,
            txn.date,
            txn.amount,
            &txn.description,
            &txn.category,
        )?;
        info!(%kind, %id, "Updated transaction");
        Ok(())
    }

    pub fn delete(&self, kind: TransactionKind, id: TransactionId) -> BudgetResult<()> {
        self.store.delete(kind, id)?;
        info!(%kind, %id, "Deleted transaction");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateCell;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (TempDir, TransactionStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = TransactionStore::new(temp_dir.path().join("budget.db"));
        store.init().unwrap();
        (temp_dir, store)
    }

    fn input(cents: i64, when: NaiveDate, category: &str) -> TransactionInput {
        TransactionInput {
            amount: Some(Money::from_cents(cents)),
            date: Some(when),
            description: String::new(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_add_valid() {
        let (_temp, store) = setup();
        let service = TransactionService::with_today(&store, date(2024, 3, 31));

        let id = service
            .add(TransactionKind::Expense, &input(1500, date(2024, 3, 31), "Food"))
            .unwrap();

        let row = store.get(TransactionKind::Expense, id).unwrap();
        assert_eq!(row.date, DateCell::Text("31-03-2024".into()));
        assert_eq!(row.amount, Money::from_cents(1500));
    }

    #[test]
    fn test_blank_category_becomes_other() {
        let (_temp, store) = setup();
        let service = TransactionService::with_today(&store, date(2024, 3, 31));

        let id = service
            .add(TransactionKind::Income, &input(100, date(2024, 3, 1), "  "))
            .unwrap();
        let row = store.get(TransactionKind::Income, id).unwrap();
        assert_eq!(row.category.as_deref(), Some("Other"));
    }

    #[test]
    fn test_rejects_invalid_input_without_writing() {
        let (_temp, store) = setup();
        let service = TransactionService::with_today(&store, date(2024, 3, 31));

        let future = input(100, date(2024, 4, 1), "Food");
        let negative = input(-100, date(2024, 3, 1), "Food");
        let no_amount = TransactionInput {
            amount: None,
            ..input(0, date(2024, 3, 1), "Food")
        };
        let no_date = TransactionInput {
            date: None,
            ..input(100, date(2024, 3, 1), "Food")
        };

        for bad in [future, negative, no_amount, no_date] {
            let err = service.add(TransactionKind::Expense, &bad).unwrap_err();
            assert!(err.is_validation(), "{:?}", bad);
        }
        assert!(store.fetch_all(TransactionKind::Expense).unwrap().is_empty());
    }

    #[test]
    fn test_zero_amount_allowed() {
        let (_temp, store) = setup();
        let service = TransactionService::with_today(&store, date(2024, 3, 31));
        assert!(service
            .add(TransactionKind::Expense, &input(0, date(2024, 3, 1), "Food"))
            .is_ok());
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp, store) = setup();
        let service = TransactionService::with_today(&store, date(2024, 3, 31));
        let id = service
            .add(TransactionKind::Expense, &input(1000, date(2024, 3, 1), "Food"))
            .unwrap();

        service
            .update(TransactionKind::Expense, id, &input(2500, date(2024, 3, 2), "Rent"))
            .unwrap();
        let row = store.get(TransactionKind::Expense, id).unwrap();
        assert_eq!(row.amount, Money::from_cents(2500));
        assert_eq!(row.category.as_deref(), Some("Rent"));

        assert!(service
            .update(TransactionKind::Expense, id, &input(1, date(2025, 1, 1), "Rent"))
            .unwrap_err()
            .is_validation());

        service.delete(TransactionKind::Expense, id).unwrap();
        assert!(service
            .delete(TransactionKind::Expense, id)
            .unwrap_err()
            .is_not_found());
    }
}
