//! In-memory store for tests.
//!
//! Implements both store traits over mutexed maps. Every call takes the lock
//! once and completes under it, which gives the same atomicity the Postgres
//! implementations get from transactions.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use lidshop_core::{AddressId, CustomerId};

use super::{AddressStore, CustomerStore, RepositoryError};
use crate::models::address::{Address, NewAddress};

/// In-memory [`CustomerStore`] + [`AddressStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    customers: BTreeSet<CustomerId>,
    addresses: BTreeMap<AddressId, Address>,
    next_id: i64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a customer id so existence checks pass.
    pub fn add_customer(&self, id: CustomerId) {
        self.lock().customers.insert(id);
    }

    /// Snapshot of one address, bypassing the store contract. Test helper.
    #[must_use]
    pub fn get(&self, id: AddressId) -> Option<Address> {
        self.lock().addresses.get(&id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn clear_defaults(&mut self, customer: CustomerId) {
        for address in self.addresses.values_mut() {
            if address.customer_id == customer {
                address.is_default = false;
            }
        }
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn exists(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        Ok(self.lock().customers.contains(&id))
    }
}

#[async_trait]
impl AddressStore for MemoryStore {
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        Ok(self.lock().addresses.get(&id).cloned())
    }

    async fn list_by_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<Address>, RepositoryError> {
        let mut addresses: Vec<Address> = self
            .lock()
            .addresses
            .values()
            .filter(|a| a.customer_id == customer)
            .cloned()
            .collect();
        addresses.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(addresses)
    }

    async fn insert(&self, new: NewAddress) -> Result<Address, RepositoryError> {
        let mut inner = self.lock();
        if new.is_default {
            inner.clear_defaults(new.customer_id);
        }
        inner.next_id += 1;
        let address = Address {
            id: AddressId::new(inner.next_id),
            customer_id: new.customer_id,
            line: new.line,
            city: new.city,
            district: new.district,
            ward: new.ward,
            label: new.label,
            is_default: new.is_default,
            created_at: new.created_at,
            updated_at: new.updated_at,
        };
        inner.addresses.insert(address.id, address.clone());
        Ok(address)
    }

    async fn update(&self, address: &Address) -> Result<Address, RepositoryError> {
        let mut inner = self.lock();
        if !inner.addresses.contains_key(&address.id) {
            return Err(RepositoryError::NotFound);
        }
        if address.is_default {
            inner.clear_defaults(address.customer_id);
        }
        inner.addresses.insert(address.id, address.clone());
        Ok(address.clone())
    }

    async fn delete_by_id(&self, id: AddressId) -> Result<(), RepositoryError> {
        self.lock().addresses.remove(&id);
        Ok(())
    }

    async fn set_default(
        &self,
        customer: CustomerId,
        address: AddressId,
    ) -> Result<u64, RepositoryError> {
        let mut inner = self.lock();
        inner.clear_defaults(customer);
        match inner.addresses.get_mut(&address) {
            Some(a) if a.customer_id == customer => {
                a.is_default = true;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
