//! Error types for the kemii-departments crate.
//!
//! Catalog loading, skill construction, and skill payload decoding each get
//! their own semantic enum. The matcher has no error path and never appears
//! here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or querying a department catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file at '{path}': {message}")]
    IoError {
        /// Path to the catalog file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The catalog JSON is malformed or missing required fields.
    #[error("invalid catalog JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The catalog version is not supported.
    #[error("unsupported catalog version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the catalog.
        actual: u32,
    },

    /// The catalog contains no departments.
    #[error("catalog contains no departments")]
    EmptyDepartments,

    /// A department ID is not a valid slug.
    #[error("invalid department id at index {index}: '{value}'")]
    InvalidDepartmentId {
        /// Index of the offending department in the array.
        index: usize,
        /// The rejected identifier.
        value: String,
    },

    /// Two departments share the same ID.
    #[error("duplicate department id '{id}'")]
    DuplicateDepartmentId {
        /// The repeated identifier.
        id: String,
    },

    /// The requested department was not found in the catalog.
    #[error("department '{id}' not found in catalog")]
    DepartmentNotFound {
        /// The identifier that was not found.
        id: String,
    },
}

/// Validation errors for department identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepartmentIdError {
    /// The identifier is empty.
    #[error("department id must not be empty")]
    Empty,
    /// The identifier contains padding or characters outside the slug set.
    #[error("department id must contain only lowercase letters, digits, or hyphens")]
    InvalidCharacters,
}

/// Validation errors for user skill records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    /// The skill level is outside the supported range.
    #[error("skill level must be between {min} and {max}, found {actual}")]
    LevelOutOfRange {
        /// Lowest accepted level.
        min: u8,
        /// Highest accepted level.
        max: u8,
        /// The rejected value.
        actual: i64,
    },
}

/// Errors raised while decoding a skill payload received from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillPayloadError {
    /// A string payload did not contain valid JSON.
    #[error("skill payload string is not valid JSON: {message}")]
    InvalidEncoding {
        /// Parser error message.
        message: String,
    },

    /// The payload was neither a list nor a JSON-encoded list.
    #[error("skill payload must be a list or an encoded list, found {found}")]
    UnexpectedShape {
        /// JSON kind that was received.
        found: &'static str,
    },

    /// One entry of the list could not be decoded.
    #[error("invalid skill entry at index {index}: {message}")]
    InvalidEntry {
        /// Index of the entry in the list.
        index: usize,
        /// Description of the decoding failure.
        message: String,
    },
}
