//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::addresses::PgAddressStore;
use crate::db::customers::PgCustomerStore;
use crate::db::{AddressStore, CustomerStore};
use crate::services::addresses::AddressService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the customer store (the add endpoint
/// prechecks customer existence itself) and the address service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    customers: Arc<dyn CustomerStore>,
    addresses: AddressService,
}

impl AppState {
    /// Create application state backed by Postgres stores on the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let customers: Arc<dyn CustomerStore> = Arc::new(PgCustomerStore::new(pool.clone()));
        let addresses: Arc<dyn AddressStore> = Arc::new(PgAddressStore::new(pool));
        Self::with_stores(customers, addresses)
    }

    /// Create application state with explicit store collaborators.
    ///
    /// Tests use this with the in-memory store.
    #[must_use]
    pub fn with_stores(
        customers: Arc<dyn CustomerStore>,
        addresses: Arc<dyn AddressStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                customers: customers.clone(),
                addresses: AddressService::new(customers, addresses),
            }),
        }
    }

    /// Get the customer store.
    #[must_use]
    pub fn customers(&self) -> &Arc<dyn CustomerStore> {
        &self.inner.customers
    }

    /// Get the address service.
    #[must_use]
    pub fn addresses(&self) -> &AddressService {
        &self.inner.addresses
    }
}
