//! Service layer for the budget tracker
//!
//! The service layer provides the domain logic on top of the storage layer:
//! date normalization, loading, summaries, plan edits and input validation.

pub mod dates;
pub mod loader;
pub mod plan;
pub mod summary;
pub mod transaction;

pub use loader::{LoadedTransaction, TransactionLoader, TransactionTable};
pub use plan::PlanEditor;
pub use summary::{summarize, SummaryRow};
pub use transaction::{TransactionInput, TransactionService};
