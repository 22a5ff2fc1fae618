//! Department catalog and fuzzy skill matching for Kemii rosters.
//!
//! Users record free-text skills and affiliations; departments are a static
//! catalog. This crate decides, at read time, which departments a recorded
//! label denotes, and builds the derived roster views that depend on that
//! decision. It has no network dependencies so it can sit underneath any
//! client.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading a versioned department catalog from JSON, or using the
//!   built-in table
//! - Matching a label against a department with normalised, bidirectional
//!   substring comparison
//! - Decoding skill payloads delivered either as a list or as a JSON-encoded
//!   string
//! - Availability counts, department filters, matched tags, and affiliation
//!   toggling over a roster
//!
//! # Example
//!
//! ```
//! use kemii_departments::{DepartmentCatalog, decode_skill_payload, matched_departments};
//! use serde_json::json;
//!
//! let catalog = DepartmentCatalog::builtin().expect("built-in catalog");
//! let skills = decode_skill_payload(&json!("[{\"name\": \"นักดีไซน์\", \"level\": 3}]"))
//!     .expect("payload decodes");
//!
//! let tags: Vec<&str> = matched_departments(&catalog, &skills)
//!     .into_iter()
//!     .map(|department| department.name())
//!     .collect();
//!
//! assert_eq!(tags, vec!["Design"]);
//! ```

mod catalog;
mod department;
mod error;
mod matcher;
mod payload;
mod roster;
mod skill;
mod slug;

pub use catalog::DepartmentCatalog;
pub use department::{Department, DepartmentId};
pub use error::{CatalogError, DepartmentIdError, SkillError, SkillPayloadError};
pub use matcher::{matches_any, matches_department};
pub use payload::{SkillList, decode_skill_payload, decode_skill_payload_lossy};
pub use roster::{
    DepartmentCount, RosterMember, ToggleOutcome, availability_counts, filter_by_department,
    matched_departments, toggle_department,
};
pub use skill::{SkillLevel, UserSkill};
