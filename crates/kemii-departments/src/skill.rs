//! User skill records.
//!
//! A skill pairs a free-text name with a proficiency level from 1 to 5. The
//! name is never a foreign key: its relationship to a department is inferred
//! at read time by the matcher.

use serde::{Deserialize, Serialize};

use crate::error::SkillError;

/// Proficiency level in the inclusive range `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
    /// Lowest accepted level.
    pub const MIN: u8 = 1;
    /// Highest accepted level.
    pub const MAX: u8 = 5;
    /// Level assigned to newly selected departments.
    pub const LOWEST: Self = Self(Self::MIN);

    /// Validate and construct a level.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::LevelOutOfRange`] when `value` is outside
    /// `1..=5`.
    pub fn new(value: i64) -> Result<Self, SkillError> {
        u8::try_from(value)
            .ok()
            .filter(|level| (Self::MIN..=Self::MAX).contains(level))
            .map(Self)
            .ok_or(SkillError::LevelOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            })
    }

    /// Build a level from wire data, clamping out-of-range values.
    ///
    /// ```
    /// use kemii_departments::SkillLevel;
    ///
    /// assert_eq!(SkillLevel::saturating(0).get(), 1);
    /// assert_eq!(SkillLevel::saturating(9).get(), 5);
    /// ```
    #[must_use]
    pub fn saturating(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        u8::try_from(clamped).map_or(Self::LOWEST, Self)
    }

    /// Numeric value of the level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self::LOWEST
    }
}

impl From<SkillLevel> for u8 {
    fn from(value: SkillLevel) -> Self {
        value.0
    }
}

impl TryFrom<i64> for SkillLevel {
    type Error = SkillError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A skill or affiliation recorded against a user.
///
/// # Example
///
/// ```
/// use kemii_departments::{SkillLevel, UserSkill};
///
/// let skill = UserSkill::new("นักดีไซน์", SkillLevel::LOWEST);
/// assert_eq!(skill.level.get(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSkill {
    /// Free-text skill name as supplied by the user or backend.
    pub name: String,
    /// Proficiency level.
    pub level: SkillLevel,
}

impl UserSkill {
    /// Build a skill record.
    #[must_use]
    pub fn new(name: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}
