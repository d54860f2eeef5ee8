//! Lidshop Customer API - customer-facing account endpoints.
//!
//! Currently covers shipping-address management: list, add, update, delete,
//! and set-default, all scoped to a customer id.
//!
//! # Architecture
//!
//! Strictly layered: axum route handlers shape responses and map statuses,
//! the address service owns the single-default invariant and ownership
//! validation, and persistence sits behind store traits with Postgres and
//! in-memory implementations.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
