//! Reports module for the budget tracker
//!
//! Provides the monthly planned-vs-actual summary with terminal and CSV output.

pub mod summary;

pub use summary::MonthlySummaryReport;
