//! Configuration module for the budget tracker
//!
//! This module provides configuration management including:
//! - Resolution of the project, per-user and packaged-default locations
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::{DateOrder, Settings};
