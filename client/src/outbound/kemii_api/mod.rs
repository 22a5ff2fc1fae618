//! Kemii backend HTTP adapter.
//!
//! A thin reqwest client that attaches the session bearer token and
//! normalises skill payloads at the boundary, so callers never see the
//! string-or-list wire quirk.

mod dto;
mod http_client;

pub use http_client::KemiiApiClient;
