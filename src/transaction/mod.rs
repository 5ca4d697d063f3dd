//! Transaction management for the ledger service.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `NewTransaction` create payload
//! - Database functions for storing, querying, and deleting transactions
//! - The route handlers for the transaction API

pub(crate) mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{NewTransaction, Transaction, create_transaction_table};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;

#[cfg(test)]
pub use core::{create_transaction, delete_transaction, get_transaction, get_transactions_by_month};
