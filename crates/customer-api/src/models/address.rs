//! Address domain types.
//!
//! `Address` is both the domain object and the JSON projection returned by
//! the API (camelCase, RFC 3339 timestamps). `AddressRequest` is the client
//! payload for create and update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lidshop_core::{AddressId, CustomerId};

/// A customer shipping address.
///
/// Owned by exactly one customer, never reassigned. At most one address per
/// customer carries `is_default = true`; the service maintains that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Unique address ID, generated on insert.
    pub id: AddressId,
    /// Customer who owns this address.
    pub customer_id: CustomerId,
    /// Specific address line (street and number).
    pub line: String,
    pub city: String,
    pub district: String,
    pub ward: String,
    /// Optional display label, e.g. "Home" or "Office".
    pub label: Option<String>,
    /// Whether this is the customer's pre-selected address.
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A not-yet-persisted address, produced by the service from an
/// [`AddressRequest`] once validated.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub customer_id: CustomerId,
    pub line: String,
    pub city: String,
    pub district: String,
    pub ward: String,
    pub label: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client payload for adding or updating an address.
///
/// Every field is optional at the wire level; the service rejects absent or
/// blank required fields so that shape errors surface as the standard error
/// envelope rather than a deserializer rejection. `is_default` is tri-state:
/// absent means "unset", which on add falls back to `false` and on update
/// preserves the stored value. That asymmetry is part of the API contract.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_default: Option<bool>,
}
