//! Fuzzy label-to-department matching.
//!
//! A free-text skill or affiliation label denotes a department when, after
//! trimming and lowercasing both sides, the label equals one of the
//! department's targets (name, label, or a skills catalog entry), contains
//! one, or is contained by one. The same bidirectional policy applies to
//! every target.
//!
//! Only case and surrounding whitespace are normalised. Internal whitespace,
//! punctuation, and Unicode composition are compared as-is, and there is no
//! minimum length: a very short department name will match many labels.

use crate::department::Department;
use crate::skill::UserSkill;

/// Return `true` when `label` should be treated as membership in
/// `department`.
///
/// Absent, empty, or blank labels never match, and neither does a
/// department whose targets are all blank.
///
/// # Examples
///
/// ```
/// use kemii_departments::{Department, DepartmentId, matches_department};
///
/// let software = Department::new(DepartmentId::new("software").expect("slug"), "Software")
///     .with_label("ซอฟต์แวร์");
///
/// assert!(matches_department(Some("Software Engineering"), &software));
/// assert!(matches_department(Some("  SOFTWARE  "), &software));
/// assert!(!matches_department(None, &software));
/// ```
#[must_use]
pub fn matches_department(label: Option<&str>, department: &Department) -> bool {
    let Some(needle) = label.map(normalise).filter(|value| !value.is_empty()) else {
        return false;
    };

    department
        .match_targets()
        .map(normalise)
        .filter(|target| !target.is_empty())
        .any(|target| is_fuzzy_match(&needle, &target))
}

/// Return `true` when any of `skills` denotes `department`.
#[must_use]
pub fn matches_any(skills: &[UserSkill], department: &Department) -> bool {
    skills
        .iter()
        .any(|skill| matches_department(Some(skill.name.as_str()), department))
}

fn normalise(value: &str) -> String {
    value.trim().to_lowercase()
}

fn is_fuzzy_match(needle: &str, target: &str) -> bool {
    needle == target || needle.contains(target) || target.contains(needle)
}
