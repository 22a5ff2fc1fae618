//! Outbound adapters.

pub mod kemii_api;
