//! Budget tracker - personal finance tracking with planned-vs-actual summaries
//!
//! This library records expense and income transactions in a local SQLite
//! database, categorizes them against a planned-budget sheet kept as a CSV
//! file, and produces month-by-month planned-vs-actual summaries.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, money, periods)
//! - `storage`: Category file resolution and the SQLite transaction store
//! - `services`: Date normalization, loading, summaries, plan edits
//! - `reports`: Monthly summary report with terminal and CSV output
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `budget` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::config::{BudgetPaths, Settings};
//! use budget_tracker::models::ReportingPeriod;
//! use budget_tracker::reports::MonthlySummaryReport;
//! use budget_tracker::services::TransactionLoader;
//! use budget_tracker::storage::Storage;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//!
//! let config = storage.categories.load()?;
//! let (expenses, income) =
//!     TransactionLoader::new(&storage.transactions, settings.date_order).load_all()?;
//! let report = MonthlySummaryReport::generate(
//!     &config,
//!     &expenses,
//!     &income,
//!     ReportingPeriod::current_month(),
//!     &settings.currency_symbol,
//! );
//! println!("{}", report.format_terminal());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
