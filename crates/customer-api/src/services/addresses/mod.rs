//! Address service.
//!
//! Owns the two rules the API cannot see past the store traits: the
//! at-most-one-default invariant per customer, and ownership validation
//! (an address may only be touched through its owning customer's path).

mod error;

pub use error::AddressError;

use std::sync::Arc;

use chrono::Utc;

use lidshop_core::{AddressId, CustomerId};

use crate::db::{AddressStore, CustomerStore};
use crate::models::address::{Address, AddressRequest, NewAddress};

/// Address service.
///
/// Constructed with explicit store collaborators; see [`crate::db`] for the
/// Postgres and in-memory implementations.
pub struct AddressService {
    customers: Arc<dyn CustomerStore>,
    addresses: Arc<dyn AddressStore>,
}

impl AddressService {
    /// Create a new address service.
    #[must_use]
    pub fn new(customers: Arc<dyn CustomerStore>, addresses: Arc<dyn AddressStore>) -> Self {
        Self {
            customers,
            addresses,
        }
    }

    /// All of a customer's addresses, default first, then oldest first.
    ///
    /// Does not validate that the customer exists: an unknown customer simply
    /// has no addresses and gets an empty list.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::Repository` if the read fails.
    pub async fn list(&self, customer: CustomerId) -> Result<Vec<Address>, AddressError> {
        Ok(self.addresses.list_by_customer(customer).await?)
    }

    /// Add a new address for a customer.
    ///
    /// A request without `isDefault` creates a non-default address. When the
    /// new address is the default, the customer's previous default is cleared
    /// in the same transaction as the insert.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::CustomerNotFound` for an unknown customer,
    /// checked before payload validation, and `AddressError::ValidationFailed`
    /// for blank required fields.
    pub async fn add(
        &self,
        customer: CustomerId,
        request: AddressRequest,
    ) -> Result<Address, AddressError> {
        if !self.customers.exists(customer).await? {
            return Err(AddressError::CustomerNotFound(customer));
        }

        let (line, city, district, ward) = validated_fields(&request)?;

        let now = Utc::now();
        let address = self
            .addresses
            .insert(NewAddress {
                customer_id: customer,
                line,
                city,
                district,
                ward,
                label: request.label,
                is_default: request.is_default.unwrap_or(false),
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(address_id = %address.id, customer_id = %customer, "Address saved");
        Ok(address)
    }

    /// Update an existing address.
    ///
    /// All text fields are overwritten from the payload. `isDefault` falls
    /// back to the address's current stored value when absent - unlike add,
    /// which falls back to false.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::AddressNotFound` for an unknown address and
    /// `AddressError::AddressNotOwned` when the owner does not match the
    /// path customer.
    pub async fn update(
        &self,
        customer: CustomerId,
        address_id: AddressId,
        request: AddressRequest,
    ) -> Result<Address, AddressError> {
        let stored = self
            .addresses
            .find_by_id(address_id)
            .await?
            .ok_or(AddressError::AddressNotFound(address_id))?;

        if stored.customer_id != customer {
            return Err(AddressError::AddressNotOwned {
                address: address_id,
                customer,
            });
        }

        let (line, city, district, ward) = validated_fields(&request)?;

        let updated = Address {
            line,
            city,
            district,
            ward,
            label: request.label,
            is_default: request.is_default.unwrap_or(stored.is_default),
            updated_at: Utc::now(),
            ..stored
        };

        Ok(self.addresses.update(&updated).await?)
    }

    /// Delete an address.
    ///
    /// Returns `Ok(false)` when the address does not exist - deleting a
    /// missing address is not an error, but deleting someone else's is.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::AddressNotOwned` when the owner does not match.
    pub async fn delete(
        &self,
        customer: CustomerId,
        address_id: AddressId,
    ) -> Result<bool, AddressError> {
        let Some(stored) = self.addresses.find_by_id(address_id).await? else {
            return Ok(false);
        };

        if stored.customer_id != customer {
            return Err(AddressError::AddressNotOwned {
                address: address_id,
                customer,
            });
        }

        self.addresses.delete_by_id(address_id).await?;
        tracing::info!(address_id = %address_id, customer_id = %customer, "Address deleted");
        Ok(true)
    }

    /// Make an address the customer's default.
    ///
    /// The store clears the customer's previous default and sets the new one
    /// in a single transaction; the targeted update is conditional on
    /// ownership and reports how many rows it touched.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::AddressNotFound`, `AddressError::AddressNotOwned`,
    /// or `AddressError::DefaultUpdateFailed` when the targeted update affects
    /// no rows or the re-fetch comes back empty.
    pub async fn set_default(
        &self,
        customer: CustomerId,
        address_id: AddressId,
    ) -> Result<Address, AddressError> {
        let stored = self
            .addresses
            .find_by_id(address_id)
            .await?
            .ok_or(AddressError::AddressNotFound(address_id))?;

        if stored.customer_id != customer {
            return Err(AddressError::AddressNotOwned {
                address: address_id,
                customer,
            });
        }

        let affected = self.addresses.set_default(customer, address_id).await?;
        if affected == 0 {
            return Err(AddressError::DefaultUpdateFailed(address_id));
        }

        self.addresses
            .find_by_id(address_id)
            .await?
            .ok_or(AddressError::DefaultUpdateFailed(address_id))
    }
}

/// Extract the required text fields, rejecting absent or blank values.
fn validated_fields(
    request: &AddressRequest,
) -> Result<(String, String, String, String), AddressError> {
    Ok((
        required_field(request.line.as_deref(), "line")?,
        required_field(request.city.as_deref(), "city")?,
        required_field(request.district.as_deref(), "district")?,
        required_field(request.ward.as_deref(), "ward")?,
    ))
}

fn required_field(value: Option<&str>, name: &str) -> Result<String, AddressError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_owned()),
        _ => Err(AddressError::ValidationFailed(format!(
            "field `{name}` must not be blank"
        ))),
    }
}
