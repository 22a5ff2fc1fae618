//! Department catalog loading and lookup.
//!
//! The catalog is static configuration: it is loaded once per process from
//! JSON (or taken from the built-in table) and never mutated afterwards.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::department::{Department, DepartmentId};
use crate::error::CatalogError;

/// Current supported catalog version.
const SUPPORTED_VERSION: u32 = 1;

/// Built-in Kemii department table.
const BUILTIN_CATALOG_JSON: &str = include_str!("../data/departments.json");

/// An ordered, validated set of departments.
///
/// # Example
///
/// ```
/// use kemii_departments::DepartmentCatalog;
///
/// let json = r#"{
///     "version": 1,
///     "departments": [
///         {"id": "design", "name": "Design", "label": "ดีไซน์"}
///     ]
/// }"#;
///
/// let catalog = DepartmentCatalog::from_json(json).expect("valid catalog");
/// assert_eq!(catalog.departments().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCatalog {
    version: u32,
    departments: Vec<Department>,
}

impl DepartmentCatalog {
    /// Parses a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - The departments array is empty
    /// - Any ID is not a slug, or two departments share an ID
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog =
            serde_json::from_str(json).map_err(|e| CatalogError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|e| CatalogError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    /// Returns the catalog compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] only if the embedded table is corrupt, which
    /// the crate's tests rule out.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    fn from_raw(raw: RawCatalog) -> Result<Self, CatalogError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.departments.is_empty() {
            return Err(CatalogError::EmptyDepartments);
        }

        let mut seen = HashSet::with_capacity(raw.departments.len());
        let mut departments = Vec::with_capacity(raw.departments.len());
        for (index, entry) in raw.departments.into_iter().enumerate() {
            let raw_id = entry.id;
            let id = DepartmentId::new(raw_id.clone()).map_err(|_| {
                CatalogError::InvalidDepartmentId {
                    index,
                    value: raw_id,
                }
            })?;
            if !seen.insert(id.clone()) {
                return Err(CatalogError::DuplicateDepartmentId { id: id.into() });
            }

            let mut department = Department::new(id, entry.name)
                .with_skills(entry.skills.unwrap_or_default());
            if let Some(label) = entry.label {
                department = department.with_label(label);
            }
            departments.push(department);
        }

        Ok(Self {
            version: raw.version,
            departments,
        })
    }

    /// Returns the catalog version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all departments in declaration order.
    #[must_use]
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Finds a department by ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DepartmentNotFound`] if no department with the
    /// given ID exists.
    pub fn find(&self, id: &str) -> Result<&Department, CatalogError> {
        self.departments
            .iter()
            .find(|d| d.id().as_str() == id)
            .ok_or_else(|| CatalogError::DepartmentNotFound { id: id.to_owned() })
    }

    /// Departments that `label` denotes, in catalog order.
    pub fn matching<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Department> + 'a {
        self.departments
            .iter()
            .filter(move |department| department.matches(Some(label)))
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
struct RawCatalog {
    version: u32,
    departments: Vec<RawDepartment>,
}

/// Raw JSON representation of a department entry.
///
/// The ID stays a plain string here so validation can report its index.
/// `label` and `skills` may be absent or `null`.
#[derive(Debug, Deserialize)]
struct RawDepartment {
    id: String,
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    skills: Option<Vec<String>>,
}
