//! Address service error types.

use thiserror::Error;

use lidshop_core::{AddressId, CustomerId};

use crate::db::RepositoryError;

/// Errors that can occur during address operations.
///
/// Each variant carries a message suitable for direct display; the API layer
/// maps variants to status codes without inspecting strings.
#[derive(Debug, Error)]
pub enum AddressError {
    /// No customer with this id.
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    /// No address with this id.
    #[error("address {0} not found")]
    AddressNotFound(AddressId),

    /// The address exists but belongs to a different customer.
    #[error("address {address} does not belong to customer {customer}")]
    AddressNotOwned {
        address: AddressId,
        customer: CustomerId,
    },

    /// The targeted default update affected no rows.
    #[error("could not set address {0} as the default")]
    DefaultUpdateFailed(AddressId),

    /// Payload failed shape validation.
    #[error("invalid address payload: {0}")]
    ValidationFailed(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
