//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Once stored, a transaction is immutable: there is no update operation, only
/// deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The category of the transaction, e.g. "income" or "expense".
    ///
    /// The value set is chosen by the client and is not validated here.
    #[serde(rename = "type")]
    pub kind: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction was recorded, as an RFC 3339 timestamp.
    ///
    /// Assigned by the server at creation time and never changed afterwards.
    pub date: String,
    /// The month key the transaction is filed under, e.g. "2024-03".
    ///
    /// An opaque string used only for filtering; it is not parsed or checked
    /// against `date`.
    pub month: String,
}

/// The payload for creating a new transaction.
///
/// All four fields are required; serde rejects a payload with any of them
/// missing. `id` and `date` are assigned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The category of the transaction, e.g. "income" or "expense".
    #[serde(rename = "type")]
    pub kind: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The month key to file the transaction under, e.g. "2024-03".
    pub month: String,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// The `date` field is set to the current UTC time. After the insert, the row
/// is read back from the database so the returned value reflects exactly what
/// was committed.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let date = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("formatting a UTC timestamp as RFC 3339 should not fail");

    connection.execute(
        "INSERT INTO transactions (type, amount, description, date, month)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            &new_transaction.kind,
            new_transaction.amount,
            &new_transaction.description,
            &date,
            &new_transaction.month,
        ),
    )?;

    let transaction_id = connection.last_insert_rowid();

    get_transaction(transaction_id, connection)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, type, amount, description, date, month FROM transactions WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions filed under `month`, ordered by ascending ID
/// (insertion order).
///
/// Returns an empty vector when no transactions match.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn get_transactions_by_month(
    month: &str,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, type, amount, description, date, month FROM transactions
             WHERE month = :month
             ORDER BY id ASC",
        )?
        .query_map(&[(":month", &month)], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// The number of rows affected by a delete.
pub type RowsAffected = usize;

/// Delete the transaction with the given `id` if it exists.
///
/// Deleting an ID with no matching row is not an error; the returned count is
/// simply 0.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])
        .map_err(|err| err.into())
}

/// Create the transactions table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                month TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transactions', 0)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let kind = row.get(1)?;
    let amount = row.get(2)?;
    let description = row.get(3)?;
    let date = row.get(4)?;
    let month = row.get(5)?;

    Ok(Transaction {
        id,
        kind,
        amount,
        description,
        date,
        month,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::{OffsetDateTime, format_description::well_known::Rfc3339};

    use crate::{
        Error,
        db::initialize,
        transaction::{
            NewTransaction, create_transaction, delete_transaction, get_transaction,
            get_transactions_by_month,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn groceries() -> NewTransaction {
        NewTransaction {
            kind: "expense".to_owned(),
            amount: 42.5,
            description: "Groceries".to_owned(),
            month: "2024-03".to_owned(),
        }
    }

    #[test]
    fn create_assigns_id_and_date() {
        let conn = get_test_connection();

        let transaction = create_transaction(groceries(), &conn).unwrap();

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.kind, "expense");
        assert_eq!(transaction.amount, 42.5);
        assert_eq!(transaction.description, "Groceries");
        assert_eq!(transaction.month, "2024-03");
        OffsetDateTime::parse(&transaction.date, &Rfc3339)
            .expect("date should be a valid RFC 3339 timestamp");
    }

    #[test]
    fn create_returns_committed_row() {
        let conn = get_test_connection();

        let created = create_transaction(groceries(), &conn).unwrap();

        let stored = get_transaction(created.id, &conn).unwrap();
        assert_eq!(created, stored);
    }

    #[test]
    fn get_fails_on_invalid_id() {
        let conn = get_test_connection();
        let transaction = create_transaction(groceries(), &conn).unwrap();

        let maybe_transaction = get_transaction(transaction.id + 654, &conn);

        assert_eq!(maybe_transaction, Err(Error::NotFound));
    }

    #[test]
    fn list_filters_by_month() {
        let conn = get_test_connection();
        let want = create_transaction(groceries(), &conn).unwrap();
        create_transaction(
            NewTransaction {
                month: "2024-04".to_owned(),
                ..groceries()
            },
            &conn,
        )
        .unwrap();

        let got = get_transactions_by_month("2024-03", &conn).unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn list_orders_by_ascending_id() {
        let conn = get_test_connection();
        let mut want = Vec::new();
        for i in 1..=5 {
            let transaction = create_transaction(
                NewTransaction {
                    amount: i as f64,
                    ..groceries()
                },
                &conn,
            )
            .unwrap();
            want.push(transaction);
        }

        let got = get_transactions_by_month("2024-03", &conn).unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn list_returns_empty_for_unknown_month() {
        let conn = get_test_connection();
        create_transaction(groceries(), &conn).unwrap();

        let got = get_transactions_by_month("2024-04", &conn).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        let transaction = create_transaction(groceries(), &conn).unwrap();

        let rows_affected = delete_transaction(transaction.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_transaction(transaction.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_transaction_is_not_an_error() {
        let conn = get_test_connection();

        let rows_affected = delete_transaction(999, &conn).unwrap();

        assert_eq!(rows_affected, 0);
    }
}
