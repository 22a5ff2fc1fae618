//! Client configuration loaded via OrthoConfig.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Settings for talking to the Kemii backend and locating the catalog.
///
/// Values come from `KEMII_*` environment variables or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KEMII")]
pub struct ClientSettings {
    /// Base URL of the backend API, for example `https://api.kemii.example/v1`.
    pub api_base_url: Option<String>,
    /// Department catalog override; the built-in table is used when absent.
    pub catalog_path: Option<PathBuf>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Bearer token used when the CLI fetches the roster from the backend.
    pub api_token: Option<String>,
}

impl ClientSettings {
    /// Load settings from the environment and configuration files only.
    ///
    /// Command-line flags belong to the binary, so the loader sees just the
    /// program name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source holds an invalid value.
    pub fn load(program: &str) -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from(program)]).map_err(|error| ConfigError::Load {
            message: error.to_string(),
        })
    }

    /// Parsed API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when unset and
    /// [`ConfigError::InvalidBaseUrl`] when it is not an absolute URL.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConfigError::missing("api_base_url"))?;
        Url::parse(raw).map_err(|error| ConfigError::invalid_base_url(raw, error.to_string()))
    }

    /// Configured catalog path, if any.
    #[must_use]
    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    /// Configured bearer token, ignoring blank values.
    #[must_use]
    pub fn api_token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Per-request timeout, falling back to ten seconds.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}
