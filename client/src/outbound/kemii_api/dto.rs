//! DTOs for Kemii backend request and response bodies.
//!
//! Responses are decoded into these transport shapes first and then mapped
//! into `kemii_departments` types in one pass.

use kemii_departments::{RosterMember, UserSkill, decode_skill_payload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Body sent when replacing a user's skill list.
#[derive(Debug, Serialize)]
pub(super) struct SaveSkillsRequestDto<'a> {
    pub(super) skills: &'a [UserSkill],
}

/// Skill endpoint response: either the bare payload or a user record that
/// carries it under `skills`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserSkillsResponseDto {
    Wrapped { skills: Value },
    Bare(Value),
}

impl UserSkillsResponseDto {
    fn into_payload(self) -> Value {
        match self {
            Self::Wrapped { skills } | Self::Bare(skills) => skills,
        }
    }
}

pub(super) fn parse_users(body: &[u8]) -> Result<Vec<RosterMember>, ApiError> {
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid user listing payload: {error}")))
}

pub(super) fn parse_user_skills(body: &[u8]) -> Result<Vec<UserSkill>, ApiError> {
    let response: UserSkillsResponseDto = serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid skills payload: {error}")))?;
    decode_skill_payload(&response.into_payload())
        .map_err(|error| ApiError::decode(error.to_string()))
}
