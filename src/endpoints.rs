//! The API endpoint URIs.

/// The route for listing the transactions recorded under a month key.
pub const TRANSACTIONS: &str = "/transactions/{month}";
/// The route for creating a transaction.
pub const TRANSACTION: &str = "/transaction";
/// The route for deleting a transaction by its ID.
pub const DELETE_TRANSACTION: &str = "/transaction/{transaction_id}";
