//! Persistence layer for the customer API.
//!
//! The service talks to storage through the [`CustomerStore`] and
//! [`AddressStore`] traits so it can be constructed with any collaborator:
//! the Postgres implementations in [`customers`] and [`addresses`] in
//! production, the [`memory`] store in tests.
//!
//! # Tables
//!
//! - `customers` - existence checks only (customer data is owned elsewhere)
//! - `addresses` - shipping addresses with the single-default flag
//!
//! Migrations live in `crates/customer-api/migrations/` and are applied at
//! startup via `sqlx::migrate!`.

pub mod addresses;
pub mod customers;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use lidshop_core::{AddressId, CustomerId};

use crate::models::address::{Address, NewAddress};

/// Errors surfaced by a persistence collaborator.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A write targeted a row that no longer exists.
    #[error("row not found")]
    NotFound,
}

/// Read access to customers. Customer records are owned by the wider
/// platform; this service only ever asks whether one exists.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Whether a customer with this id exists.
    async fn exists(&self, id: CustomerId) -> Result<bool, RepositoryError>;
}

/// Storage contract for shipping addresses.
///
/// The mutating operations own the single-default invariant at the storage
/// level: wherever a write makes an address the default, clearing the
/// customer's other defaults happens in the same transaction as that write,
/// so two concurrent mutations can never each end up with their own default.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Fetch one address by id, across all customers.
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError>;

    /// All of a customer's addresses, default first, then oldest first.
    async fn list_by_customer(&self, customer: CustomerId)
    -> Result<Vec<Address>, RepositoryError>;

    /// Insert a new address and return it with its generated id.
    ///
    /// When `new.is_default` is set, every other default for the customer is
    /// cleared in the same transaction as the insert.
    async fn insert(&self, new: NewAddress) -> Result<Address, RepositoryError>;

    /// Overwrite an existing address row from the given domain object.
    ///
    /// When `address.is_default` is set, all of the customer's defaults are
    /// cleared before the row is written, in one transaction.
    async fn update(&self, address: &Address) -> Result<Address, RepositoryError>;

    /// Delete by id. Deleting an id that no longer exists is not an error.
    async fn delete_by_id(&self, id: AddressId) -> Result<(), RepositoryError>;

    /// Make `address` the customer's default: clear the customer's defaults,
    /// then set the flag on the row matching both id and owner, as one
    /// transaction. Returns the row count of the targeted update - zero means
    /// the address vanished or is not owned by this customer.
    async fn set_default(
        &self,
        customer: CustomerId,
        address: AddressId,
    ) -> Result<u64, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
