//! Category and planned-amount model
//!
//! Categories are plain labels grouped by transaction kind. Each carries a
//! planned (budgeted) amount. The configuration is loaded wholesale from the
//! category file and only ever replaced as a whole.

use std::collections::HashMap;

use super::kind::TransactionKind;
use super::money::Money;

/// Reserved synthetic row holding the aggregate of a kind
pub const TOTALS: &str = "Totals";

/// Fallback category for blank names and fresh configurations
pub const OTHER: &str = "Other";

/// Check whether `name` is the reserved "Totals" label (case-insensitive)
pub fn is_reserved(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(TOTALS)
}

/// One row of the category configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPlan {
    pub kind: TransactionKind,
    pub category: String,
    pub planned: Money,
}

impl CategoryPlan {
    pub fn new(kind: TransactionKind, category: impl Into<String>, planned: Money) -> Self {
        Self {
            kind,
            category: category.into(),
            planned,
        }
    }
}

/// Ordered categories and planned amounts for a single kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindPlan {
    categories: Vec<String>,
    planned: HashMap<String, Money>,
}

impl KindPlan {
    /// The layout used when no configuration file exists
    pub fn fallback() -> Self {
        let mut plan = Self::default();
        plan.push(TOTALS, Money::zero());
        plan.push(OTHER, Money::zero());
        plan
    }

    /// Append `category` if absent and set its planned amount (last value wins)
    pub fn push(&mut self, category: impl Into<String>, planned: Money) {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category.clone());
        }
        self.planned.insert(category, planned);
    }

    /// Remove `category`, returning whether it was present
    pub fn remove(&mut self, category: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c != category);
        self.planned.remove(category);
        self.categories.len() != before
    }

    /// Change the planned amount of an existing category
    pub fn set_planned(&mut self, category: &str, planned: Money) -> bool {
        if !self.contains(category) {
            return false;
        }
        self.planned.insert(category.to_string(), planned);
        true
    }

    /// Move "Totals" to the front if present, keeping the rest in order
    pub fn move_totals_first(&mut self) {
        if let Some(pos) = self.categories.iter().position(|c| c == TOTALS) {
            let totals = self.categories.remove(pos);
            self.categories.insert(0, totals);
        }
    }

    /// Categories in display order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Planned amount for `category`, zero when unconfigured
    pub fn planned(&self, category: &str) -> Money {
        self.planned.get(category).copied().unwrap_or_default()
    }

    /// The raw category → planned mapping
    pub fn planned_map(&self) -> &HashMap<String, Money> {
        &self.planned
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Expense and income categories with their planned amounts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryConfiguration {
    expense: KindPlan,
    income: KindPlan,
}

impl CategoryConfiguration {
    /// Build a configuration from rows in file order
    ///
    /// "Totals" is moved to the front of each kind once all rows are applied.
    pub fn from_plans(plans: impl IntoIterator<Item = CategoryPlan>) -> Self {
        let mut config = Self::default();
        for plan in plans {
            config
                .for_kind_mut(plan.kind)
                .push(plan.category, plan.planned);
        }
        config.expense.move_totals_first();
        config.income.move_totals_first();
        config
    }

    /// The configuration used when no category file exists
    pub fn fallback() -> Self {
        Self {
            expense: KindPlan::fallback(),
            income: KindPlan::fallback(),
        }
    }

    pub fn for_kind(&self, kind: TransactionKind) -> &KindPlan {
        match kind {
            TransactionKind::Expense => &self.expense,
            TransactionKind::Income => &self.income,
        }
    }

    pub fn for_kind_mut(&mut self, kind: TransactionKind) -> &mut KindPlan {
        match kind {
            TransactionKind::Expense => &mut self.expense,
            TransactionKind::Income => &mut self.income,
        }
    }

    pub fn expense_categories(&self) -> &[String] {
        self.expense.categories()
    }

    pub fn income_categories(&self) -> &[String] {
        self.income.categories()
    }

    pub fn planned_expenses(&self) -> &HashMap<String, Money> {
        self.expense.planned_map()
    }

    pub fn planned_income(&self) -> &HashMap<String, Money> {
        self.income.planned_map()
    }

    /// Split into `(expense_categories, income_categories, planned_expenses, planned_income)`
    pub fn into_parts(
        self,
    ) -> (
        Vec<String>,
        Vec<String>,
        HashMap<String, Money>,
        HashMap<String, Money>,
    ) {
        (
            self.expense.categories,
            self.income.categories,
            self.expense.planned,
            self.income.planned,
        )
    }
}
