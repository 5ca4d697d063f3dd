//! Schema initialization for the application's database.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, transaction::create_transaction_table};

/// Create the application's database tables if they do not already exist.
///
/// Safe to call on every startup, existing rows are left untouched.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_transactions_table() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'transactions'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn.execute(
            "INSERT INTO transactions (type, amount, description, date, month)
             VALUES ('expense', 1.0, 'test', '2024-03-01T00:00:00Z', '2024-03')",
            (),
        )
        .unwrap();

        initialize(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(id) FROM transactions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "re-initializing must not drop existing rows");
    }
}
