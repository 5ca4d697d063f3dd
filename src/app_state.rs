//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::http::HeaderValue;
use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The origin that is allowed to make cross-origin requests to the API.
    pub allowed_origin: HeaderValue,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the table for the
    /// transaction model. `allowed_origin` is the origin of the companion
    /// browser client, e.g. `http://localhost:3000`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, allowed_origin: HeaderValue) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            allowed_origin,
        })
    }
}
