//! HTTP route handlers for the customer API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                                  - Liveness check
//!
//! # Addresses
//! GET    /api/customers/{customerId}/addresses                    - List (default first, oldest first)
//! POST   /api/customers/{customerId}/addresses                    - Add address
//! PUT    /api/customers/{customerId}/addresses/{addressId}        - Update address
//! DELETE /api/customers/{customerId}/addresses/{addressId}        - Delete address
//! PATCH  /api/customers/{customerId}/addresses/{addressId}/default - Set default address
//! ```

pub mod addresses;

use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::state::AppState;

/// Create the address routes router, scoped under a customer id.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{customer_id}/addresses",
            get(addresses::list_addresses).post(addresses::add_address),
        )
        .route(
            "/{customer_id}/addresses/{address_id}",
            put(addresses::update_address).delete(addresses::delete_address),
        )
        .route(
            "/{customer_id}/addresses/{address_id}/default",
            patch(addresses::set_default_address),
        )
}

/// Create the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/customers", address_routes())
}

/// Liveness check.
async fn health() -> &'static str {
    "OK"
}
