use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "budget";

/// A command isolated to its own config directory and database
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
        cmd.env("BUDGET_CONFIG_DIR", self.dir.path().join("config"))
            .env("BUDGET_DB", self.dir.path().join("budget.db"))
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }
}

#[test]
fn config_reports_copied_default() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(contains("source=user-config-copied"))
        .stdout(contains("DayFirst"));

    assert!(sandbox.dir.path().join("config").join("categories.csv").is_file());
    assert!(sandbox.dir.path().join("config").join("settings.json").is_file());

    sandbox
        .cmd()
        .args(["plan", "path"])
        .assert()
        .success()
        .stdout(contains("source=user-config"));
}

#[test]
fn plan_show_lists_totals_first() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(contains("EXPENSE"))
        .stdout(contains("Totals"))
        .stdout(contains("Salary"));
}

#[test]
fn summary_matches_planned_and_actual() {
    let sandbox = Sandbox::new();
    sandbox.run(&["plan", "set", "expense", "Food", "100"]);
    sandbox.run(&["expense", "add", "30", "-c", "Food", "-d", "05-03-2024"]);
    sandbox.run(&["expense", "add", "20", "-c", "Food", "-d", "2024-03-20"]);
    sandbox.run(&["expense", "add", "10", "-c", "Transport", "-d", "01-04-2024"]);

    sandbox
        .cmd()
        .args(["summary", "--period", "2024-03"])
        .assert()
        .success()
        .stdout(contains("Summary for March 2024"))
        .stdout(contains("-$50.00"))
        .stdout(contains("+$50.00"));

    let out = sandbox.dir.path().join("summary.csv");
    sandbox
        .cmd()
        .args(["summary", "--period", "2024-03", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Summary exported to"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Kind,Category,Planned,Actual,Diff\n"));
    assert!(csv.contains("expense,Totals,0.00,50.00,-50.00\n"));
    assert!(csv.contains("expense,Food,100.00,50.00,50.00\n"));
    assert!(csv.contains("expense,Transport,0.00,0.00,0.00\n"));
}

#[test]
fn invalid_transactions_are_rejected() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["expense", "add", "5", "-d", "01-01-2999"])
        .assert()
        .failure()
        .stderr(contains("future"));

    sandbox
        .cmd()
        .args(["income", "add", "-5"])
        .assert()
        .failure()
        .stderr(contains("negative"));

    sandbox
        .cmd()
        .args(["expense", "add", "abc"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount"));

    sandbox
        .cmd()
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(contains("No expense transactions found."));
}

#[test]
fn list_edit_and_delete() {
    let sandbox = Sandbox::new();
    sandbox.run(&[
        "income",
        "add",
        "2500",
        "-c",
        "Salary",
        "-d",
        "28-02-2024",
        "-m",
        "February pay",
    ]);

    sandbox
        .cmd()
        .args(["income", "list"])
        .assert()
        .success()
        .stdout(contains("28-02-2024"))
        .stdout(contains("$2500.00"))
        .stdout(contains("February pay"));

    sandbox.run(&["income", "edit", "1", "--amount", "2600.50"]);
    sandbox
        .cmd()
        .args(["income", "show", "1"])
        .assert()
        .success()
        .stdout(contains("$2600.50"))
        .stdout(contains("Salary"));

    sandbox.run(&["income", "delete", "1"]);
    sandbox
        .cmd()
        .args(["income", "delete", "1"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn blank_category_defaults_to_other() {
    let sandbox = Sandbox::new();
    sandbox.run(&["expense", "add", "4.20", "-d", "01-03-2024"]);

    sandbox
        .cmd()
        .args(["expense", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Category:    Other"));
}

#[test]
fn plan_edits_respect_reserved_and_in_use_categories() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["plan", "add", "expense", "totals"])
        .assert()
        .failure()
        .stderr(contains("reserved"));

    sandbox
        .cmd()
        .args(["plan", "add", "expense", "Travel", "--planned", "300"])
        .assert()
        .success()
        .stdout(contains("Added expense category 'Travel'"));

    sandbox
        .cmd()
        .args(["plan", "add", "expense", "Travel"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    sandbox.run(&["expense", "add", "12", "-c", "Food", "-d", "01-03-2024"]);

    sandbox
        .cmd()
        .args(["plan", "remove", "expense", "Food"])
        .assert()
        .failure()
        .stderr(contains("existing transactions"));

    sandbox
        .cmd()
        .args(["plan", "remove", "expense", "Travel"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(contains("Food").and(contains("Travel").not()));
}

#[test]
fn bad_period_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["summary", "--period", "2024-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}

#[test]
fn bullets_prefix_description_lines() {
    let sandbox = Sandbox::new();
    sandbox.run(&[
        "expense",
        "add",
        "5",
        "-d",
        "01-03-2024",
        "-m",
        "milk\n- eggs",
        "--bullets",
    ]);
    sandbox
        .cmd()
        .args(["expense", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Description: • milk\n             - eggs\n"));

    sandbox.run(&["expense", "add", "6", "-d", "02-03-2024", "-m", "bread\njam"]);
    sandbox.run(&["expense", "edit", "2", "--bullets"]);
    sandbox
        .cmd()
        .args(["expense", "show", "2"])
        .assert()
        .success()
        .stdout(contains("Description: • bread\n             • jam\n"));
}

#[test]
fn oversized_amount_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["expense", "add", "100000000000000000", "-d", "01-03-2024"])
        .assert()
        .failure()
        .stderr(contains("too large"));
}
