//! Application router configuration.

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Cross-origin requests are allowed from the single origin configured in
/// `state`, restricted to the methods and headers the companion browser
/// client uses, with credentialed requests enabled.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint))
        .route(endpoints::TRANSACTION, post(create_transaction_endpoint))
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .with_state(state)
}
