//! Display formatting for terminal output
//!
//! Provides utilities for formatting loaded transactions and category plans
//! for terminal display.

pub mod category;
pub mod transaction;

pub use category::format_plan;
pub use transaction::{
    apply_bullets, format_transaction_details, format_transaction_list, format_transaction_row,
};
