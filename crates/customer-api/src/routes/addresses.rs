//! Address route handlers.
//!
//! Response shaping and status mapping only - the business rules live in
//! [`crate::services::addresses`]. Mutations answer with the standard
//! envelope (`success`/`message`/`data`/`timestamp`); the status codes are
//! a compatibility contract with existing clients, asymmetries included
//! (an ownership violation is a 400 on update but a 500 on delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use lidshop_core::{AddressId, CustomerId};

use crate::models::address::{Address, AddressRequest};
use crate::state::AppState;

/// Standard JSON response wrapper for mutations.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Address>,
    pub timestamp: DateTime<Utc>,
}

impl ApiEnvelope {
    fn ok(message: impl Into<String>, data: Option<Address>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }
}

fn envelope(status: StatusCode, body: ApiEnvelope) -> Response {
    (status, Json(body)).into_response()
}

/// List a customer's addresses, default first, then oldest first.
///
/// An unknown customer gets an empty array, not a 404.
#[instrument(skip(state))]
pub async fn list_addresses(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> Response {
    match state.addresses().list(customer_id).await {
        Ok(addresses) => Json(addresses).into_response(),
        Err(e) => {
            tracing::error!(customer_id = %customer_id, error = %e, "Failed to list addresses");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Add a new address for a customer.
///
/// Prechecks customer existence for an explicit 404; every other failure,
/// validation included, is a 400 with the error envelope.
#[instrument(skip(state, request))]
pub async fn add_address(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
    Json(request): Json<AddressRequest>,
) -> Response {
    match state.customers().exists(customer_id).await {
        Ok(true) => {}
        Ok(false) => {
            return envelope(
                StatusCode::NOT_FOUND,
                ApiEnvelope::err(format!("Customer {customer_id} not found")),
            );
        }
        Err(e) => {
            tracing::error!(customer_id = %customer_id, error = %e, "Customer lookup failed");
            return envelope(
                StatusCode::BAD_REQUEST,
                ApiEnvelope::err(format!("Failed to add address: {e}")),
            );
        }
    }

    match state.addresses().add(customer_id, request).await {
        Ok(address) => envelope(
            StatusCode::CREATED,
            ApiEnvelope::ok("Address added successfully", Some(address)),
        ),
        Err(e) => {
            tracing::warn!(customer_id = %customer_id, error = %e, "Failed to add address");
            envelope(
                StatusCode::BAD_REQUEST,
                ApiEnvelope::err(format!("Failed to add address: {e}")),
            )
        }
    }
}

/// Update an address. Any service failure, "not found" and "not owned"
/// included, is a 400 here.
#[instrument(skip(state, request))]
pub async fn update_address(
    State(state): State<AppState>,
    Path((customer_id, address_id)): Path<(CustomerId, AddressId)>,
    Json(request): Json<AddressRequest>,
) -> Response {
    match state
        .addresses()
        .update(customer_id, address_id, request)
        .await
    {
        Ok(address) => envelope(
            StatusCode::OK,
            ApiEnvelope::ok("Address updated successfully", Some(address)),
        ),
        Err(e) => {
            tracing::warn!(
                customer_id = %customer_id,
                address_id = %address_id,
                error = %e,
                "Failed to update address"
            );
            envelope(
                StatusCode::BAD_REQUEST,
                ApiEnvelope::err(format!("Failed to update address: {e}")),
            )
        }
    }
}

/// Delete an address. A missing address is a 404; an ownership violation
/// surfaces as an error and therefore a 500, distinct from the 404 path.
#[instrument(skip(state))]
pub async fn delete_address(
    State(state): State<AppState>,
    Path((customer_id, address_id)): Path<(CustomerId, AddressId)>,
) -> Response {
    match state.addresses().delete(customer_id, address_id).await {
        Ok(true) => envelope(
            StatusCode::OK,
            ApiEnvelope::ok("Address deleted successfully", None),
        ),
        Ok(false) => envelope(
            StatusCode::NOT_FOUND,
            ApiEnvelope::err(format!("Address {address_id} not found")),
        ),
        Err(e) => {
            tracing::error!(
                customer_id = %customer_id,
                address_id = %address_id,
                error = %e,
                "Failed to delete address"
            );
            envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiEnvelope::err(format!("Failed to delete address: {e}")),
            )
        }
    }
}

/// Make an address the customer's default.
#[instrument(skip(state))]
pub async fn set_default_address(
    State(state): State<AppState>,
    Path((customer_id, address_id)): Path<(CustomerId, AddressId)>,
) -> Response {
    match state.addresses().set_default(customer_id, address_id).await {
        Ok(address) => envelope(
            StatusCode::OK,
            ApiEnvelope::ok("Default address set successfully", Some(address)),
        ),
        Err(e) => {
            tracing::warn!(
                customer_id = %customer_id,
                address_id = %address_id,
                error = %e,
                "Failed to set default address"
            );
            envelope(
                StatusCode::BAD_REQUEST,
                ApiEnvelope::err(format!("Failed to set default address: {e}")),
            )
        }
    }
}
