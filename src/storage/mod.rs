//! Storage layer for the budget tracker
//!
//! Category plans live in a CSV file resolved across several locations;
//! transactions live in a local SQLite database.

pub mod categories;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use categories::{CategoryRepository, ConfigSource};
pub use file_io::{write_atomic, write_json_atomic};
pub use init::initialize_storage;
pub use transactions::{StoredRow, TransactionStore};

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Main storage coordinator that provides access to both stores
pub struct Storage {
    paths: BudgetPaths,
    pub categories: CategoryRepository,
    pub transactions: TransactionStore,
}

impl Storage {
    /// Open storage, creating the database schema and provisioning the
    /// category file if needed
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        initialize_storage(&paths)?;

        Ok(Self {
            categories: CategoryRepository::new(paths.clone()),
            transactions: TransactionStore::new(paths.database_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }
}
