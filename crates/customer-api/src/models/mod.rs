//! Domain models for the customer API.

pub mod address;
