//! Kemii client: session lifecycle, backend API access, and roster reports.
//!
//! Department matching and skill decoding live in `kemii_departments`; this
//! crate adds the pieces that need a process or a network:
//!
//! - [`SessionStore`], a shared session with change notifications
//! - [`KemiiApiClient`], which attaches the session token to every request
//!   and decodes skill payloads at the boundary
//! - [`ClientSettings`], loaded from `KEMII_*` configuration
//! - [`cli`], the operations behind the `kemii-roster` binary

pub mod cli;
pub mod config;
mod error;
mod macros;
pub mod outbound;
mod session;

pub use config::ClientSettings;
pub use error::{ApiError, ConfigError, SessionError};
pub use outbound::kemii_api::KemiiApiClient;
pub use session::{Session, SessionEvent, SessionStore, SessionUser};
