//! Error types for the Kemii client.
//!
//! Transport failures, session misuse, and configuration problems each get
//! their own enum so callers can react to the category without parsing
//! messages.

use crate::macros::define_client_error;

define_client_error! {
    /// Errors surfaced while calling the Kemii backend.
    pub enum ApiError {
        /// Network transport failed or the backend returned a server error.
        Transport {
            /// Failure detail.
            message: String
        } => "kemii api transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout {
            /// Failure detail.
            message: String
        } => "kemii api timeout: {message}",
        /// The backend rejected the bearer token or the session is missing.
        Unauthorized {
            /// Failure detail.
            message: String
        } => "kemii api rejected credentials: {message}",
        /// The requested resource does not exist.
        NotFound {
            /// Failure detail.
            message: String
        } => "kemii api resource not found: {message}",
        /// The backend response body could not be decoded.
        Decode {
            /// Failure detail.
            message: String
        } => "kemii api response decode failed: {message}",
        /// The request was rejected before or by the backend as malformed.
        InvalidRequest {
            /// Failure detail.
            message: String
        } => "kemii api request invalid: {message}",
    }
}

impl ApiError {
    /// Return whether retrying this error is expected to help.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

define_client_error! {
    /// Errors raised by session lifecycle operations.
    pub enum SessionError {
        /// A session was created with a blank bearer token.
        EmptyToken => "session token must not be empty",
        /// The operation needs a signed-in session.
        SignedOut => "no active session",
    }
}

define_client_error! {
    /// Errors raised while loading or interpreting client settings.
    pub enum ConfigError {
        /// Settings could not be loaded from the environment or files.
        Load {
            /// Loader error detail.
            message: String
        } => "failed to load client settings: {message}",
        /// A required setting is absent.
        Missing {
            /// Name of the missing setting.
            setting: String
        } => "missing required setting: {setting}",
        /// The API base URL could not be parsed.
        InvalidBaseUrl {
            /// The rejected value.
            value: String,
            /// Parser error detail.
            message: String
        } => "invalid api base url '{value}': {message}",
    }
}
