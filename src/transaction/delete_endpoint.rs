//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::TransactionId, transaction::core::delete_transaction};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction by its ID.
///
/// Responds with 204 No Content whether or not a matching transaction
/// existed, so the delete is idempotent from the client's point of view.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    let connection = state.db_connection.lock().unwrap();

    let rows_affected = delete_transaction(transaction_id, &connection)?;

    if rows_affected == 0 {
        tracing::debug!("delete for missing transaction {transaction_id}");
    }

    Ok(StatusCode::NO_CONTENT)
}
