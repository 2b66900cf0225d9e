//! Path management for the budget tracker
//!
//! Provides the locations consulted when resolving the category file, plus the
//! per-user settings and database files.
//!
//! ## Per-user directory resolution
//!
//! 1. `BUDGET_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/budget` or `~/.config/budget`
//! 3. Windows: `%APPDATA%\BudgetApp`

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::BudgetError;

const CATEGORIES_CSV: &str = "categories.csv";
const SETTINGS_JSON: &str = "settings.json";
const DATABASE_FILE: &str = "budget.db";
const PACKAGE_DATA_DIR: &str = "data";

/// Environment variable overriding the per-user directory
pub const CONFIG_DIR_ENV: &str = "BUDGET_CONFIG_DIR";

/// Environment variable overriding the database file
pub const DATABASE_ENV: &str = "BUDGET_DB";

/// Manages all paths used by the budget tracker
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    /// Project root, where a `categories.csv` takes highest precedence
    project_root: PathBuf,
    /// Per-user configuration directory
    user_config_dir: PathBuf,
    /// Directory holding the packaged read-only defaults
    package_data_dir: PathBuf,
    /// Explicit database location, if overridden
    database_file: Option<PathBuf>,
}

impl BudgetPaths {
    /// Create a new BudgetPaths instance from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no per-user directory can be determined.
    pub fn new() -> Result<Self, BudgetError> {
        let user_config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        let database_file = std::env::var(DATABASE_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let project_root = project_root();
        Ok(Self {
            package_data_dir: project_root.join(PACKAGE_DATA_DIR),
            project_root,
            user_config_dir,
            database_file,
        })
    }

    /// Create BudgetPaths with explicit directories (useful for testing)
    pub fn with_dirs(project_root: PathBuf, user_config_dir: PathBuf) -> Self {
        Self {
            package_data_dir: project_root.join(PACKAGE_DATA_DIR),
            project_root,
            user_config_dir,
            database_file: None,
        }
    }

    /// Override the database location
    pub fn with_database_file(mut self, path: PathBuf) -> Self {
        self.database_file = Some(path);
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the per-user directory (~/.config/budget/ or equivalent)
    pub fn user_config_dir(&self) -> &Path {
        &self.user_config_dir
    }

    pub fn package_data_dir(&self) -> &Path {
        &self.package_data_dir
    }

    /// Category file in the project root (highest precedence)
    pub fn root_categories_file(&self) -> PathBuf {
        self.project_root.join(CATEGORIES_CSV)
    }

    /// Category file in the per-user directory
    pub fn user_categories_file(&self) -> PathBuf {
        self.user_config_dir.join(CATEGORIES_CSV)
    }

    /// Packaged read-only category file (lowest precedence)
    pub fn default_categories_file(&self) -> PathBuf {
        self.package_data_dir.join(CATEGORIES_CSV)
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.user_config_dir.join(SETTINGS_JSON)
    }

    /// Get the path to the SQLite database
    pub fn database_file(&self) -> PathBuf {
        self.database_file
            .clone()
            .unwrap_or_else(|| self.user_config_dir.join(DATABASE_FILE))
    }

    /// Ensure the per-user directory and the database's parent exist
    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        std::fs::create_dir_all(&self.user_config_dir).map_err(|e| {
            BudgetError::Io(format!(
                "Failed to create config directory {}: {}",
                self.user_config_dir.display(),
                e
            ))
        })?;

        if let Some(parent) = self.database_file().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    BudgetError::Io(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        Ok(())
    }
}

/// The directory this crate was built from
fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn home_dir() -> Result<PathBuf, BudgetError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| BudgetError::Config("Could not determine home directory".into()))
}

/// Resolve the default per-user directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BudgetError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => home_dir()?.join(".config"),
    };
    Ok(config_base.join("budget"))
}

/// Resolve the default per-user directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BudgetError> {
    let appdata = match std::env::var("APPDATA") {
        Ok(appdata) if !appdata.is_empty() => PathBuf::from(appdata),
        _ => home_dir()?.join("AppData").join("Roaming"),
    };
    Ok(appdata.join("BudgetApp"))
}
