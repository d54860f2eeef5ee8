//! Postgres-backed address storage.
//!
//! All queries are runtime-checked (`query_as`/`query_scalar`) against the
//! schema in `migrations/`. The default-flag writes run inside transactions;
//! see the [`AddressStore`] contract for the invariant they uphold.

use async_trait::async_trait;
use sqlx::PgPool;

use lidshop_core::{AddressId, CustomerId};

use super::{AddressStore, RepositoryError};
use crate::models::address::{Address, NewAddress};

const SELECT_COLUMNS: &str =
    "id, customer_id, line, city, district, ward, label, is_default, created_at, updated_at";

/// [`AddressStore`] backed by the `addresses` table.
pub struct PgAddressStore {
    pool: PgPool,
}

impl PgAddressStore {
    /// Create a new address store on the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressStore for PgAddressStore {
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(&format!(
            "SELECT {SELECT_COLUMNS} FROM addresses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(address)
    }

    async fn list_by_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {SELECT_COLUMNS} FROM addresses \
             WHERE customer_id = $1 \
             ORDER BY is_default DESC, created_at ASC, id ASC"
        ))
        .bind(customer)
        .fetch_all(&self.pool)
        .await?;
        Ok(addresses)
    }

    async fn insert(&self, new: NewAddress) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if new.is_default {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE customer_id = $1")
                .bind(new.customer_id)
                .execute(&mut *tx)
                .await?;
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            "INSERT INTO addresses \
             (customer_id, line, city, district, ward, label, is_default, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(new.customer_id)
        .bind(&new.line)
        .bind(&new.city)
        .bind(&new.district)
        .bind(&new.ward)
        .bind(&new.label)
        .bind(new.is_default)
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    async fn update(&self, address: &Address) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Clearing covers the row being written too; the write below then
        // re-establishes its flag from the domain object.
        if address.is_default {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE customer_id = $1")
                .bind(address.customer_id)
                .execute(&mut *tx)
                .await?;
        }

        let saved = sqlx::query_as::<_, Address>(&format!(
            "UPDATE addresses \
             SET line = $1, city = $2, district = $3, ward = $4, label = $5, \
                 is_default = $6, updated_at = $7 \
             WHERE id = $8 \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&address.line)
        .bind(&address.city)
        .bind(&address.district)
        .bind(&address.ward)
        .bind(&address.label)
        .bind(address.is_default)
        .bind(address.updated_at)
        .bind(address.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_by_id(&self, id: AddressId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_default(
        &self,
        customer: CustomerId,
        address: AddressId,
    ) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE addresses SET is_default = FALSE WHERE customer_id = $1")
            .bind(customer)
            .execute(&mut *tx)
            .await?;

        // Targeted and conditional on ownership: affects zero rows when the
        // address is gone or belongs to someone else.
        let result = sqlx::query(
            "UPDATE addresses SET is_default = TRUE WHERE id = $1 AND customer_id = $2",
        )
        .bind(address)
        .bind(customer)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }
}
