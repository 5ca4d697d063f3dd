//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{NewTransaction, Transaction, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction.
///
/// Assigns the transaction's ID and date, re-reads the committed row and
/// returns it with status 201. A payload with a missing or malformed field is
/// rejected with status 422 and the error envelope.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    payload: Result<Json<NewTransaction>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let Json(new_transaction) =
        payload.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let connection = state.db_connection.lock().unwrap();

    let transaction = create_transaction(new_transaction, &connection)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
