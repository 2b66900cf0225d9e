//! Storage initialization
//!
//! Creates the transaction tables on first run

use rusqlite::Connection;
use tracing::debug;

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::TransactionKind;

/// Column layout shared by the `expenses` and `income` tables
const TABLE_COLUMNS: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date DATE NOT NULL,
    amount REAL NOT NULL,
    description TEXT,
    category TEXT";

/// `CREATE TABLE IF NOT EXISTS` statement for a kind's table
pub fn create_table_sql(kind: TransactionKind) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({}\n)",
        kind.table(),
        TABLE_COLUMNS
    )
}

/// Create both transaction tables if they are absent
pub fn create_schema(conn: &Connection) -> Result<(), BudgetError> {
    for kind in TransactionKind::ALL {
        conn.execute(&create_table_sql(kind), [])?;
    }
    Ok(())
}

/// Initialize storage for a fresh installation
pub fn initialize_storage(paths: &BudgetPaths) -> Result<(), BudgetError> {
    paths.ensure_directories()?;

    let db_path = paths.database_file();
    let conn = Connection::open(&db_path)?;
    create_schema(&conn)?;
    debug!(path = %db_path.display(), "Database ready");

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BudgetPaths) -> bool {
    !paths.database_file().exists()
}
