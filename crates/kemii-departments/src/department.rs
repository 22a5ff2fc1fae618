//! Department identifiers and records.
//!
//! A department is a named functional category (for example "HR Business
//! Partner") with an optional short label and an optional catalog of
//! constituent skill names. All three feed the fuzzy matcher.

use std::fmt;
use std::iter;

use serde::{Deserialize, Serialize};

use crate::error::DepartmentIdError;
use crate::matcher::matches_department;
use crate::slug::is_valid_slug;

/// Stable department identifier stored as a lowercase slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DepartmentId(String);

impl DepartmentId {
    /// Validate and construct a [`DepartmentId`].
    ///
    /// # Errors
    ///
    /// Returns [`DepartmentIdError`] when the value is empty or is not a slug.
    ///
    /// # Examples
    ///
    /// ```
    /// use kemii_departments::DepartmentId;
    ///
    /// assert!(DepartmentId::new("hr-business-partner").is_ok());
    /// assert!(DepartmentId::new("HR Business Partner").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, DepartmentIdError> {
        let raw = id.into();
        if raw.is_empty() {
            return Err(DepartmentIdError::Empty);
        }
        if !is_valid_slug(&raw) {
            return Err(DepartmentIdError::InvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DepartmentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DepartmentId> for String {
    fn from(value: DepartmentId) -> Self {
        value.0
    }
}

impl TryFrom<String> for DepartmentId {
    type Error = DepartmentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A department entry from the catalog.
///
/// # Example
///
/// ```
/// use kemii_departments::{Department, DepartmentId};
///
/// let id = DepartmentId::new("design").expect("valid slug");
/// let design = Department::new(id, "Design").with_label("ดีไซน์");
///
/// assert!(design.matches(Some("นักดีไซน์")));
/// assert!(!design.matches(Some("Accounting")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    id: DepartmentId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    skills: Vec<String>,
}

impl Department {
    /// Build a department with no label and no skills catalog.
    #[must_use]
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            label: None,
            skills: Vec::new(),
        }
    }

    /// Attach a short display alias.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach the ordered sub-skill catalog.
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> &DepartmentId {
        &self.id
    }

    /// Canonical display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Short display alias, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sub-skill names belonging to this department.
    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Raw comparison targets: name, label, then each skill entry.
    ///
    /// Targets are returned unnormalised; the matcher trims and lowercases.
    pub fn match_targets(&self) -> impl Iterator<Item = &str> {
        iter::once(self.name.as_str())
            .chain(self.label.as_deref())
            .chain(self.skills.iter().map(String::as_str))
    }

    /// Return `true` when `label` denotes this department.
    ///
    /// Shorthand for [`matches_department`].
    #[must_use]
    pub fn matches(&self, label: Option<&str>) -> bool {
        matches_department(label, self)
    }
}
