//! Core data models for the budget tracker
//!
//! This module contains the data structures of the domain: transactions,
//! their kind, category plans, money amounts and reporting periods.

pub mod category;
pub mod ids;
pub mod kind;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{is_reserved, CategoryConfiguration, CategoryPlan, KindPlan, OTHER, TOTALS};
pub use ids::TransactionId;
pub use kind::TransactionKind;
pub use money::Money;
pub use period::ReportingPeriod;
pub use transaction::{DateCell, DateValue, Transaction, TransactionValidationError};
