//! Operations behind the `kemii-roster` binary.
//!
//! Each report is returned as output lines so the binary only parses
//! arguments and writes to stdout.

use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use kemii_departments::{
    CatalogError, Department, DepartmentCatalog, RosterMember, availability_counts,
    filter_by_department,
};
use thiserror::Error;
use tracing::debug;

use crate::config::ClientSettings;
use crate::error::{ApiError, ConfigError, SessionError};
use crate::outbound::kemii_api::KemiiApiClient;
use crate::session::{Session, SessionStore, SessionUser};

/// Identity recorded in the session created from a configured token.
const CLI_USER_ID: &str = "kemii-roster";

/// Errors surfaced by roster commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("failed to read '{path}': {message}")]
    Read {
        /// Path that could not be read.
        path: String,
        /// I/O error detail.
        message: String,
    },
    /// A roster file was not a JSON list of members.
    #[error("invalid roster '{path}': {message}")]
    Roster {
        /// Path of the rejected roster.
        path: String,
        /// Parser error detail.
        message: String,
    },
    /// The department catalog could not be loaded or queried.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Client settings were missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The configured token could not start a session.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// The backend request failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Resolve the department catalog.
///
/// An explicit path wins over the configured `catalog_path`; with neither,
/// the built-in catalog is used.
///
/// # Errors
///
/// Returns [`CliError::Read`] when the file cannot be read and
/// [`CliError::Catalog`] when its contents are invalid.
pub fn load_catalog(
    explicit: Option<&Path>,
    settings: &ClientSettings,
) -> Result<DepartmentCatalog, CliError> {
    let Some(path) = explicit.or_else(|| settings.catalog_path()) else {
        return Ok(DepartmentCatalog::builtin()?);
    };
    debug!(path = %path.display(), "loading department catalog");
    Ok(DepartmentCatalog::from_json(&read_file(path)?)?)
}

/// Read a roster fixture: a JSON list of users as returned by `GET /users`.
///
/// # Errors
///
/// Returns [`CliError::Read`] or [`CliError::Roster`].
pub fn load_roster(path: &Path) -> Result<Vec<RosterMember>, CliError> {
    serde_json::from_str(&read_file(path)?).map_err(|error| CliError::Roster {
        path: path.display().to_string(),
        message: error.to_string(),
    })
}

/// Fetch the roster from the configured backend.
///
/// When `api_token` is configured it is installed as the session token.
///
/// # Errors
///
/// Returns [`CliError::Config`] when the base URL is missing or invalid,
/// and [`CliError::Api`] when the request fails.
pub async fn fetch_roster(settings: &ClientSettings) -> Result<Vec<RosterMember>, CliError> {
    let session = SessionStore::new();
    if let Some(token) = settings.api_token() {
        session.set(Session::new(
            token,
            SessionUser::new(CLI_USER_ID, CLI_USER_ID),
        )?);
    }
    let client = KemiiApiClient::new(
        settings.api_base_url()?,
        settings.request_timeout(),
        session,
    )?;
    Ok(client.fetch_users().await?)
}

/// `department-id<TAB>count` per department, in catalog order.
#[must_use]
pub fn count_lines(catalog: &DepartmentCatalog, members: &[RosterMember]) -> Vec<String> {
    availability_counts(catalog, members)
        .into_iter()
        .map(|count| format!("{}\t{}", count.department.id(), count.available))
        .collect()
}

/// Display names of members belonging to `department_id`, in roster order.
///
/// # Errors
///
/// Returns [`CliError::Catalog`] when the department is unknown.
pub fn filter_lines(
    catalog: &DepartmentCatalog,
    members: &[RosterMember],
    department_id: &str,
) -> Result<Vec<String>, CliError> {
    let department = catalog.find(department_id)?;
    Ok(filter_by_department(members, Some(department))
        .into_iter()
        .map(|member| member.display_name.clone())
        .collect())
}

/// `department-id<TAB>name` for each department `label` denotes.
///
/// With `department_id`, only that department is checked.
///
/// # Errors
///
/// Returns [`CliError::Catalog`] when `department_id` is unknown.
pub fn match_lines(
    catalog: &DepartmentCatalog,
    label: &str,
    department_id: Option<&str>,
) -> Result<Vec<String>, CliError> {
    let render = |department: &Department| format!("{}\t{}", department.id(), department.name());
    let Some(id) = department_id else {
        return Ok(catalog.matching(label).map(render).collect());
    };
    let department = catalog.find(id)?;
    Ok(department
        .matches(Some(label))
        .then(|| render(department))
        .into_iter()
        .collect())
}

fn read_file(path: &Path) -> Result<String, CliError> {
    let read_error = |message: String| CliError::Read {
        path: path.display().to_string(),
        message,
    };
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| read_error("path must name a file".to_owned()))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|error| read_error(format!("open parent directory: {error}")))?;
    directory
        .read_to_string(Path::new(file_name))
        .map_err(|error| read_error(error.to_string()))
}
