//! Plan editing service
//!
//! Adds, removes and re-plans categories. Every edit produces a new
//! configuration value which is written back in full; the file is then
//! reloaded so callers always continue with what is on disk.

use std::collections::BTreeSet;

use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{is_reserved, CategoryConfiguration, Money, TransactionKind};
use crate::storage::CategoryRepository;

fn validate_planned(planned: Money) -> BudgetResult<()> {
    if planned.is_negative() {
        return Err(BudgetError::Validation(format!(
            "Planned amount must not be negative (got {})",
            planned
        )));
    }
    Ok(())
}

fn editable_name(name: &str) -> BudgetResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BudgetError::Validation(
            "Category name cannot be empty".into(),
        ));
    }
    if is_reserved(name) {
        return Err(BudgetError::ReservedCategory(name.to_string()));
    }
    Ok(name)
}

/// Return `config` with `name` appended to `kind`
pub fn add_category(
    config: &CategoryConfiguration,
    kind: TransactionKind,
    name: &str,
    planned: Money,
) -> BudgetResult<CategoryConfiguration> {
    let name = editable_name(name)?;
    validate_planned(planned)?;

    if config.for_kind(kind).contains(name) {
        return Err(BudgetError::Duplicate {
            entity_type: "Category",
            identifier: format!("{} {}", kind, name),
        });
    }

    let mut draft = config.clone();
    draft.for_kind_mut(kind).push(name, planned);
    Ok(draft)
}

/// Return `config` without `name`, unless transactions still use it
pub fn remove_category(
    config: &CategoryConfiguration,
    kind: TransactionKind,
    name: &str,
    in_use: &BTreeSet<String>,
) -> BudgetResult<CategoryConfiguration> {
    let name = editable_name(name)?;

    if in_use.contains(name) {
        return Err(BudgetError::CategoryInUse {
            kind,
            category: name.to_string(),
        });
    }

    let mut draft = config.clone();
    if !draft.for_kind_mut(kind).remove(name) {
        return Err(BudgetError::category_not_found(format!("{} {}", kind, name)));
    }
    Ok(draft)
}

/// Return `config` with a new planned amount for `name`
pub fn set_planned(
    config: &CategoryConfiguration,
    kind: TransactionKind,
    name: &str,
    planned: Money,
) -> BudgetResult<CategoryConfiguration> {
    let name = editable_name(name)?;
    validate_planned(planned)?;

    let mut draft = config.clone();
    if !draft.for_kind_mut(kind).set_planned(name, planned) {
        return Err(BudgetError::category_not_found(format!("{} {}", kind, name)));
    }
    Ok(draft)
}

/// Applies plan edits and persists them through the category repository
pub struct PlanEditor<'a> {
    repo: &'a CategoryRepository,
}

impl<'a> PlanEditor<'a> {
    pub fn new(repo: &'a CategoryRepository) -> Self {
        Self { repo }
    }

    /// Add a category and return the reloaded configuration
    pub fn add(
        &self,
        config: &CategoryConfiguration,
        kind: TransactionKind,
        name: &str,
        planned: Money,
    ) -> BudgetResult<CategoryConfiguration> {
        let draft = add_category(config, kind, name, planned)?;
        info!(%kind, category = name.trim(), "Adding category");
        self.persist(&draft)
    }

    /// Remove a category and return the reloaded configuration
    pub fn remove(
        &self,
        config: &CategoryConfiguration,
        kind: TransactionKind,
        name: &str,
        in_use: &BTreeSet<String>,
    ) -> BudgetResult<CategoryConfiguration> {
        let draft = remove_category(config, kind, name, in_use)?;
        info!(%kind, category = name.trim(), "Removing category");
        self.persist(&draft)
    }

    /// Change a planned amount and return the reloaded configuration
    pub fn set_planned(
        &self,
        config: &CategoryConfiguration,
        kind: TransactionKind,
        name: &str,
        planned: Money,
    ) -> BudgetResult<CategoryConfiguration> {
        let draft = set_planned(config, kind, name, planned)?;
        self.persist(&draft)
    }

    fn persist(&self, draft: &CategoryConfiguration) -> BudgetResult<CategoryConfiguration> {
        self.repo.save_plans(draft)?;
        self.repo.load()
    }
}
