//! Category/plan repository backed by a CSV file
//!
//! Decides which `categories.csv` governs the category lists and planned
//! amounts, provisions a per-user copy on first use, and reads or rewrites
//! the file as a whole.
//!
//! The file is header-led with the columns `type,category,planned`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::{CategoryConfiguration, CategoryPlan, Money, TransactionKind, OTHER};

use super::file_io::write_atomic;

const HEADER: [&str; 3] = ["type", "category", "planned"];

/// Content written when neither a user file nor a packaged default exists
const MINIMAL_TEMPLATE: &str = "type,category,planned\nexpense,Other,0\nincome,Other,0\n";

/// Where the active category file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `categories.csv` next to the project manifest
    Root,
    /// An existing file in the per-user directory
    UserConfig,
    /// The packaged read-only default
    PackageDefault,
    /// The packaged default copied into the per-user directory
    UserConfigCopied,
    /// A minimal template written into the per-user directory
    UserConfigCreated,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::UserConfig => "user-config",
            Self::PackageDefault => "package-default",
            Self::UserConfigCopied => "user-config-copied",
            Self::UserConfigCreated => "user-config-created",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Resolver = fn(&BudgetPaths) -> PathBuf;

/// Candidate locations, highest precedence first
const RESOLVERS: [(ConfigSource, Resolver); 3] = [
    (ConfigSource::Root, BudgetPaths::root_categories_file),
    (ConfigSource::UserConfig, BudgetPaths::user_categories_file),
    (
        ConfigSource::PackageDefault,
        BudgetPaths::default_categories_file,
    ),
];

/// Return the first existing candidate file
///
/// Falls back to the packaged-default location, which may not exist yet.
pub fn resolve_configuration_path(paths: &BudgetPaths) -> (PathBuf, ConfigSource) {
    for (source, resolver) in RESOLVERS {
        let candidate = resolver(paths);
        if candidate.is_file() {
            debug!(path = %candidate.display(), %source, "Resolved categories file");
            return (candidate, source);
        }
    }

    let fallback = paths.default_categories_file();
    debug!(path = %fallback.display(), "No categories file found, using packaged location");
    (fallback, ConfigSource::PackageDefault)
}

/// Repository for the category configuration file
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    paths: BudgetPaths,
    csv_path: PathBuf,
    source: ConfigSource,
}

impl CategoryRepository {
    /// Resolve the category file, provisioning a per-user copy when needed
    ///
    /// Provisioning problems are logged and never returned; the repository
    /// is always usable afterwards.
    pub fn new(paths: BudgetPaths) -> Self {
        Self::open(paths, true)
    }

    /// Resolve the category file without touching the filesystem
    pub fn inspect(paths: BudgetPaths) -> Self {
        Self::open(paths, false)
    }

    fn open(paths: BudgetPaths, auto_create: bool) -> Self {
        let (csv_path, source) = resolve_configuration_path(&paths);
        let mut repo = Self {
            paths,
            csv_path,
            source,
        };

        if !auto_create {
            return repo;
        }

        if !repo.csv_path.exists() {
            if let Err(e) = repo.provision() {
                warn!(error = %e, "Could not create categories.csv override");
            }
        }

        if repo.csv_path == repo.paths.default_categories_file() && repo.csv_path.is_file() {
            if let Err(e) = repo.copy_default_to_user() {
                debug!(error = %e, "Skip copy to user config");
            }
        }

        repo
    }

    /// Create the per-user file from the packaged default or the minimal template
    fn provision(&mut self) -> Result<(), BudgetError> {
        let user_file = self.paths.user_categories_file();
        fs::create_dir_all(self.paths.user_config_dir())?;

        let default_file = self.paths.default_categories_file();
        if default_file.is_file() {
            fs::copy(&default_file, &user_file)?;
            self.csv_path = user_file;
            self.source = ConfigSource::UserConfigCopied;
            info!(path = %self.csv_path.display(), "Copied default categories.csv");
        } else {
            write_atomic(&user_file, MINIMAL_TEMPLATE.as_bytes())?;
            self.csv_path = user_file;
            self.source = ConfigSource::UserConfigCreated;
            info!(path = %self.csv_path.display(), "Created minimal categories.csv");
        }

        Ok(())
    }

    /// Copy the packaged default into the per-user directory if no user copy exists
    fn copy_default_to_user(&mut self) -> Result<(), BudgetError> {
        let user_file = self.paths.user_categories_file();
        if user_file.exists() {
            return Ok(());
        }

        fs::create_dir_all(self.paths.user_config_dir())?;
        fs::copy(&self.csv_path, &user_file)?;
        self.csv_path = user_file;
        self.source = ConfigSource::UserConfigCopied;
        info!(path = %self.csv_path.display(), "Copied default categories.csv");
        Ok(())
    }

    /// The file this repository reads and writes
    pub fn active_file(&self) -> &Path {
        &self.csv_path
    }

    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Human-readable origin, e.g. `/home/me/.config/budget/categories.csv (source=user-config)`
    pub fn describe(&self) -> String {
        format!("{} (source={})", self.csv_path.display(), self.source)
    }

    /// Load the category configuration
    ///
    /// A missing file yields the fallback layout. Unreadable rows are
    /// skipped and unparseable planned amounts count as zero.
    pub fn load(&self) -> Result<CategoryConfiguration, BudgetError> {
        if !self.csv_path.exists() {
            debug!(path = %self.csv_path.display(), "Categories file missing, using fallback");
            return Ok(CategoryConfiguration::fallback());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.csv_path)?;

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let type_col = column("type");
        let category_col = column("category");
        let planned_col = column("planned");

        let mut plans = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!(line = line + 2, error = %e, "Skipping unreadable category row");
                    continue;
                }
            };

            let field = |col: Option<usize>| {
                col.and_then(|i| record.get(i)).unwrap_or("").trim()
            };

            let kind = match field(type_col).to_lowercase().as_str() {
                "expense" => TransactionKind::Expense,
                "income" => TransactionKind::Income,
                _ => continue,
            };

            let category = match field(category_col) {
                "" => OTHER.to_string(),
                name => name.to_string(),
            };

            plans.push(CategoryPlan::new(kind, category, parse_planned(field(planned_col))));
        }

        Ok(CategoryConfiguration::from_plans(plans))
    }

    /// Rewrite the active file with `config`
    ///
    /// Expense rows come first, each kind in display order.
    pub fn save_plans(&self, config: &CategoryConfiguration) -> Result<(), BudgetError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;

        for kind in TransactionKind::ALL {
            let plan = config.for_kind(kind);
            for category in plan.categories() {
                let planned = plan.planned(category).format_with_symbol("");
                writer.write_record([kind.as_str(), category.as_str(), planned.as_str()])?;
            }
        }

        let contents = writer
            .into_inner()
            .map_err(|e| BudgetError::Csv(format!("Failed to finish categories file: {}", e)))?;
        write_atomic(&self.csv_path, &contents)?;

        info!(path = %self.csv_path.display(), "Saved category plans");
        Ok(())
    }
}

fn parse_planned(raw: &str) -> Money {
    if raw.is_empty() {
        return Money::zero();
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Money::from_f64(value),
        _ => Money::parse(raw).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, BudgetPaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_dirs(
            temp_dir.path().join("project"),
            temp_dir.path().join("user"),
        );
        fs::create_dir_all(paths.project_root()).unwrap();
        (temp_dir, paths)
    }

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_root_file_takes_precedence() {
        let (_temp, paths) = setup();
        write(&paths.root_categories_file(), "type,category,planned\nexpense,Root,1\n");
        write(&paths.user_categories_file(), "type,category,planned\nexpense,User,1\n");

        let repo = CategoryRepository::new(paths.clone());
        assert_eq!(repo.source(), ConfigSource::Root);
        assert_eq!(repo.active_file(), paths.root_categories_file());
        assert_eq!(repo.load().unwrap().expense_categories(), ["Root"]);
    }

    #[test]
    fn test_user_file_beats_packaged_default() {
        let (_temp, paths) = setup();
        write(&paths.user_categories_file(), "type,category,planned\nexpense,User,1\n");
        write(&paths.default_categories_file(), "type,category,planned\nexpense,Default,1\n");

        let repo = CategoryRepository::new(paths);
        assert_eq!(repo.source(), ConfigSource::UserConfig);
        assert_eq!(repo.load().unwrap().expense_categories(), ["User"]);
    }

    #[test]
    fn test_packaged_default_copied_to_user_dir() {
        let (_temp, paths) = setup();
        let contents = "type,category,planned\nexpense,Totals,0\nexpense,Food,100\n";
        write(&paths.default_categories_file(), contents);

        let repo = CategoryRepository::new(paths.clone());
        assert_eq!(repo.source(), ConfigSource::UserConfigCopied);
        assert_eq!(repo.active_file(), paths.user_categories_file());
        assert_eq!(
            fs::read_to_string(paths.user_categories_file()).unwrap(),
            contents
        );
    }

    #[test]
    fn test_minimal_template_when_nothing_exists() {
        let (_temp, paths) = setup();

        let repo = CategoryRepository::new(paths.clone());
        assert_eq!(repo.source(), ConfigSource::UserConfigCreated);
        assert!(paths.user_categories_file().is_file());

        let config = repo.load().unwrap();
        assert_eq!(config.expense_categories(), ["Other"]);
        assert_eq!(config.income_categories(), ["Other"]);
        assert_eq!(config.planned_expenses()["Other"], Money::zero());
    }

    #[test]
    fn test_inspect_does_not_provision() {
        let (_temp, paths) = setup();

        let repo = CategoryRepository::inspect(paths.clone());
        assert_eq!(repo.source(), ConfigSource::PackageDefault);
        assert_eq!(repo.active_file(), paths.default_categories_file());
        assert!(!paths.user_categories_file().exists());
        assert_eq!(
            repo.describe(),
            format!(
                "{} (source=package-default)",
                paths.default_categories_file().display()
            )
        );
    }

    #[test]
    fn test_missing_file_loads_fallback() {
        let (_temp, paths) = setup();

        let config = CategoryRepository::inspect(paths).load().unwrap();
        assert_eq!(config, CategoryConfiguration::fallback());
        assert_eq!(config.expense_categories(), ["Totals", "Other"]);
        assert_eq!(config.planned_income()["Totals"], Money::zero());
    }

    #[test]
    fn test_provisioning_failure_is_not_raised() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let paths = BudgetPaths::with_dirs(temp_dir.path().join("project"), blocker.join("budget"));

        let repo = CategoryRepository::new(paths);
        assert_eq!(repo.source(), ConfigSource::PackageDefault);
        assert_eq!(repo.load().unwrap(), CategoryConfiguration::fallback());
    }

    #[test]
    fn test_lenient_parsing() {
        let (_temp, paths) = setup();
        write(
            &paths.root_categories_file(),
            "type,category,planned\n\
             Expense ,Food,250.5\n\
             expense,,10\n\
             expense,Rent,abc\n\
             transfer,Ignored,5\n\
             income,Salary\n\
             expense,Totals,0\n\
             income,Salary,3000\n",
        );

        let config = CategoryRepository::new(paths).load().unwrap();
        assert_eq!(
            config.expense_categories(),
            ["Totals", "Food", "Other", "Rent"]
        );
        assert_eq!(config.income_categories(), ["Salary"]);

        let expense = config.for_kind(TransactionKind::Expense);
        assert_eq!(expense.planned("Food"), Money::from_cents(25050));
        assert_eq!(expense.planned("Other"), Money::from_cents(1000));
        assert_eq!(expense.planned("Rent"), Money::zero());
        assert_eq!(
            config.for_kind(TransactionKind::Income).planned("Salary"),
            Money::from_cents(300000)
        );
    }

    #[test]
    fn test_save_plans_rewrites_file() {
        let (_temp, paths) = setup();
        write(
            &paths.root_categories_file(),
            "type,category,planned\nincome,Salary,3000\nexpense,Food,100\nexpense,Totals,0\n",
        );

        let repo = CategoryRepository::new(paths.clone());
        let config = repo.load().unwrap();
        repo.save_plans(&config).unwrap();

        assert_eq!(
            fs::read_to_string(paths.root_categories_file()).unwrap(),
            "type,category,planned\n\
             expense,Totals,0.00\n\
             expense,Food,100.00\n\
             income,Salary,3000.00\n"
        );
        assert_eq!(repo.load().unwrap(), config);
    }

    #[test]
    fn test_load_twice_is_identical() {
        let (_temp, paths) = setup();
        write(
            &paths.root_categories_file(),
            "type,category,planned\nexpense,Food,100\nincome,Salary,3000\n",
        );

        let repo = CategoryRepository::new(paths);
        assert_eq!(repo.load().unwrap(), repo.load().unwrap());
    }
}
