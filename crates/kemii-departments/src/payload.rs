//! Decoding of skill payloads received from the backend.
//!
//! The backend has historically returned a user's skills either as a JSON
//! array or as a string holding a JSON-encoded array. Both shapes are
//! accepted here so callers always receive an ordered list of [`UserSkill`]
//! values.
//!
//! Wire entries are decoded leniently. A bare string is a skill name at the
//! lowest level. Levels may be integers, decimals, or numeric strings and
//! are clamped into range; a missing or unreadable level means the lowest
//! level. Entries with a blank name are dropped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::SkillPayloadError;
use crate::skill::{SkillLevel, UserSkill};

/// Decode a skill payload that is either a list or a JSON-encoded list.
///
/// `null` and blank strings decode to an empty list.
///
/// # Errors
///
/// Returns [`SkillPayloadError`] when a string payload is not valid JSON,
/// when the payload is not a list, or when an entry has the wrong shape.
///
/// # Examples
///
/// ```
/// use kemii_departments::decode_skill_payload;
/// use serde_json::json;
///
/// let direct = decode_skill_payload(&json!([{"name": "Design", "level": 3}])).expect("list");
/// let encoded =
///     decode_skill_payload(&json!("[{\"name\": \"Design\", \"level\": 3}]")).expect("string");
///
/// assert_eq!(direct, encoded);
/// ```
pub fn decode_skill_payload(payload: &Value) -> Result<Vec<UserSkill>, SkillPayloadError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => decode_entries(entries),
        Value::String(encoded) => decode_encoded(encoded),
        other => Err(SkillPayloadError::UnexpectedShape {
            found: json_kind(other),
        }),
    }
}

/// Decode a skill payload, logging and discarding anything undecodable.
///
/// Use this where a user listing must render even when one record carries a
/// corrupt skill field.
#[must_use]
pub fn decode_skill_payload_lossy(payload: &Value) -> Vec<UserSkill> {
    decode_skill_payload(payload).unwrap_or_else(|error| {
        warn!(%error, "discarding undecodable skill payload");
        Vec::new()
    })
}

fn decode_encoded(encoded: &str) -> Result<Vec<UserSkill>, SkillPayloadError> {
    if encoded.trim().is_empty() {
        return Ok(Vec::new());
    }
    let inner: Value =
        serde_json::from_str(encoded).map_err(|error| SkillPayloadError::InvalidEncoding {
            message: error.to_string(),
        })?;
    match inner {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => decode_entries(&entries),
        other => Err(SkillPayloadError::UnexpectedShape {
            found: json_kind(&other),
        }),
    }
}

fn decode_entries(entries: &[Value]) -> Result<Vec<UserSkill>, SkillPayloadError> {
    let mut skills = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let raw = RawSkillEntry::deserialize(entry).map_err(|error| {
            SkillPayloadError::InvalidEntry {
                index,
                message: error.to_string(),
            }
        })?;
        if let Some(skill) = raw.into_skill() {
            skills.push(skill);
        }
    }
    Ok(skills)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Raw wire representation of one skill entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSkillEntry {
    Named(String),
    Detailed {
        name: String,
        #[serde(default)]
        level: Option<RawLevel>,
    },
}

/// Raw wire representation of a skill level.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Unreadable(serde::de::IgnoredAny),
}

impl RawLevel {
    fn resolve(self) -> SkillLevel {
        let parsed = match self {
            Self::Integer(value) => Some(value),
            Self::Decimal(value) => whole_level(value),
            Self::Text(text) => {
                let trimmed = text.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_level))
            }
            Self::Unreadable(_) => None,
        };
        parsed.map_or(SkillLevel::LOWEST, SkillLevel::saturating)
    }
}

/// Clamp a decimal level into range and round it to the nearest whole level.
///
/// NaN yields `None`.
fn whole_level(value: f64) -> Option<i64> {
    let clamped = value.clamp(f64::from(SkillLevel::MIN), f64::from(SkillLevel::MAX));
    format!("{clamped:.0}").parse().ok()
}

impl RawSkillEntry {
    fn into_skill(self) -> Option<UserSkill> {
        let (name, level) = match self {
            Self::Named(name) => (name, None),
            Self::Detailed { name, level } => (name, level),
        };
        if name.trim().is_empty() {
            return None;
        }
        let resolved = level.map_or(SkillLevel::LOWEST, RawLevel::resolve);
        Some(UserSkill::new(name, resolved))
    }
}

/// Ordered skill list that deserializes from either payload shape.
///
/// Serializes as a plain JSON array, so records written back to the backend
/// always use the canonical representation.
///
/// ```
/// use kemii_departments::SkillList;
///
/// let list: SkillList = serde_json::from_str(r#""[{\"name\":\"HR\",\"level\":2}]""#)
///     .expect("encoded list decodes");
/// assert_eq!(list.as_slice().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillList(Vec<UserSkill>);

impl SkillList {
    /// Borrow the skills in order.
    #[must_use]
    pub fn as_slice(&self) -> &[UserSkill] {
        &self.0
    }

    /// Take ownership of the skills.
    #[must_use]
    pub fn into_inner(self) -> Vec<UserSkill> {
        self.0
    }
}

impl From<Vec<UserSkill>> for SkillList {
    fn from(value: Vec<UserSkill>) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for SkillList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = Value::deserialize(deserializer)?;
        decode_skill_payload(&payload)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}
