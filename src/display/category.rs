//! Category plan display formatting

use crate::models::{CategoryConfiguration, TransactionKind};

/// Format the planned amounts of both kinds
pub fn format_plan(config: &CategoryConfiguration, symbol: &str) -> String {
    let mut output = String::new();

    for kind in TransactionKind::ALL {
        let plan = config.for_kind(kind);
        output.push_str(&format!("{}\n", kind.label().to_uppercase()));

        if plan.is_empty() {
            output.push_str("  (none)\n");
        }
        for category in plan.categories() {
            output.push_str(&format!(
                "  {:<28} {:>12}\n",
                category,
                plan.planned(category).format_with_symbol(symbol)
            ));
        }
        output.push('\n');
    }

    output
}
