//! Defines the endpoint for listing the transactions recorded under a month.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{Transaction, core::get_transactions_by_month},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing all transactions filed under a month key.
///
/// The month key is an opaque string; a month with no transactions yields an
/// empty array, not an error.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Path(month): Path<String>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = state.db_connection.lock().unwrap();

    let transactions = get_transactions_by_month(&month, &connection)?;

    Ok(Json(transactions))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        transaction::{
            NewTransaction, create_transaction,
            list_endpoint::{ListTransactionsState, list_transactions_endpoint},
        },
    };

    fn get_test_state() -> ListTransactionsState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        ListTransactionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn lists_transactions_for_month() {
        let state = get_test_state();
        let want = {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                NewTransaction {
                    kind: "income".to_owned(),
                    amount: 1250.0,
                    description: "Salary".to_owned(),
                    month: "2024-03".to_owned(),
                },
                &connection,
            )
            .unwrap()
        };

        let response =
            list_transactions_endpoint(State(state), Path("2024-03".to_owned())).await;

        assert_eq!(response.unwrap().0, vec![want]);
    }

    #[tokio::test]
    async fn lists_nothing_for_unknown_month() {
        let state = get_test_state();

        let response =
            list_transactions_endpoint(State(state), Path("1999-12".to_owned())).await;

        assert!(response.unwrap().0.is_empty());
    }
}
