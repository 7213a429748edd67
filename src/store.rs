//! Guests table DDL, applied through the executor at startup.

use crate::db::Database;
use crate::error::AppError;

/// Columns are nullable on purpose: a full-replace update writes omitted
/// fields as NULL and the row mapper restores their defaults on read.
const GUESTS_DDL: &str = "\
CREATE TABLE IF NOT EXISTS guests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    firstName TEXT,
    lastName TEXT,
    email TEXT,
    partySize INTEGER DEFAULT 1,
    status TEXT DEFAULT 'pending',
    events TEXT DEFAULT '[]',
    meal TEXT DEFAULT '',
    dietary TEXT DEFAULT '[]',
    allergies TEXT DEFAULT '[]',
    notes TEXT DEFAULT '',
    responseDate TEXT,
    createdAt TEXT DEFAULT CURRENT_TIMESTAMP,
    updatedAt TEXT DEFAULT CURRENT_TIMESTAMP
)";

/// Create the guests table if it does not exist. Failure is fatal at
/// startup.
pub async fn ensure_guests_table(db: &dyn Database) -> Result<(), AppError> {
    db.execute(GUESTS_DDL, &[]).await?;
    tracing::info!("guests table ready");
    Ok(())
}
