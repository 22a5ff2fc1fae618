//! Derived roster state computed with the department matcher.
//!
//! These helpers classify users that were already fetched from the backend:
//! availability counts per department, department filters, matched tags,
//! and the add-or-remove toggle used when a user edits their affiliations.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::DepartmentCatalog;
use crate::department::Department;
use crate::matcher::{matches_any, matches_department};
use crate::payload::{SkillList, decode_skill_payload_lossy};
use crate::skill::{SkillLevel, UserSkill};

/// A user entry from the backend roster listing.
///
/// `skills` accepts both skill payload shapes; see [`SkillList`]. A
/// member whose skill payload cannot be decoded is kept with no skills, so
/// one corrupt record never rejects the whole listing. A `null`
/// availability reads as unavailable.
///
/// # Example
///
/// ```
/// use kemii_departments::RosterMember;
///
/// let member: RosterMember = serde_json::from_str(
///     r#"{"id": 7, "name": "Ploy", "is_available": true, "skills": "[\"Design\"]"}"#,
/// )
/// .expect("member decodes");
///
/// assert_eq!(member.id, "7");
/// assert_eq!(member.skills.as_slice().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMember {
    /// Backend identifier, normalised to a string.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Name shown in listings.
    #[serde(alias = "name")]
    pub display_name: String,
    /// Whether the user can be drafted into a new quest.
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_available: bool,
    /// Recorded skills and affiliations.
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: SkillList,
}

impl RosterMember {
    /// Return `true` when any of this member's skills denotes `department`.
    #[must_use]
    pub fn belongs_to(&self, department: &Department) -> bool {
        matches_any(self.skills.as_slice(), department)
    }
}

/// Number of available members matched to one department.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentCount<'a> {
    /// The department being counted.
    pub department: &'a Department,
    /// Available members with at least one matching skill.
    pub available: usize,
}

/// Count available members per department, in catalog order.
///
/// A member counts towards every department one of their skills matches.
#[must_use]
pub fn availability_counts<'a>(
    catalog: &'a DepartmentCatalog,
    members: &[RosterMember],
) -> Vec<DepartmentCount<'a>> {
    catalog
        .departments()
        .iter()
        .map(|department| DepartmentCount {
            department,
            available: members
                .iter()
                .filter(|member| member.is_available && member.belongs_to(department))
                .count(),
        })
        .collect()
}

/// Members matching `department`, in input order.
///
/// `None` means no filter is selected and every member is returned.
#[must_use]
pub fn filter_by_department<'m>(
    members: &'m [RosterMember],
    department: Option<&Department>,
) -> Vec<&'m RosterMember> {
    members
        .iter()
        .filter(|member| department.is_none_or(|selected| member.belongs_to(selected)))
        .collect()
}

/// Departments denoted by at least one of `skills`, in catalog order.
#[must_use]
pub fn matched_departments<'a>(
    catalog: &'a DepartmentCatalog,
    skills: &[UserSkill],
) -> Vec<&'a Department> {
    catalog
        .departments()
        .iter()
        .filter(|department| matches_any(skills, department))
        .collect()
}

/// What [`toggle_department`] did to the skill list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A new lowest-level entry named after the department was appended.
    Added,
    /// The first matching entry was removed.
    Removed(UserSkill),
}

/// Add or remove a department affiliation.
///
/// When some skill already matches `department`, the first such skill is
/// removed. Otherwise `{ name: department.name, level: 1 }` is appended.
///
/// # Example
///
/// ```
/// use kemii_departments::{Department, DepartmentId, ToggleOutcome, toggle_department};
///
/// let design = Department::new(DepartmentId::new("design").expect("slug"), "Design");
/// let mut skills = Vec::new();
///
/// assert_eq!(toggle_department(&mut skills, &design), ToggleOutcome::Added);
/// assert_eq!(skills.len(), 1);
/// assert!(matches!(toggle_department(&mut skills, &design), ToggleOutcome::Removed(_)));
/// assert!(skills.is_empty());
/// ```
pub fn toggle_department(skills: &mut Vec<UserSkill>, department: &Department) -> ToggleOutcome {
    let position = skills
        .iter()
        .position(|skill| matches_department(Some(skill.name.as_str()), department));
    let Some(index) = position else {
        skills.push(UserSkill::new(department.name(), SkillLevel::LOWEST));
        return ToggleOutcome::Added;
    };
    ToggleOutcome::Removed(skills.remove(index))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "member id must be a string or number, found {other}"
        ))),
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn lenient_skills<'de, D>(deserializer: D) -> Result<SkillList, D::Error>
where
    D: Deserializer<'de>,
{
    let payload = Value::deserialize(deserializer)?;
    Ok(SkillList::from(decode_skill_payload_lossy(&payload)))
}
