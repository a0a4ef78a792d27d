//! Objective domain model.
//!
//! # Responsibility
//! - Define the canonical objective record persisted in the store.
//! - Keep the serialized field names stable (`currentProgress`, ...).
//!
//! # Invariants
//! - `id` is assigned once at creation and survives edits.
//! - `total_progress >= 1` is guaranteed for records built from a draft only;
//!   persisted records may still carry `0` and readers must tolerate it.
//! - An absent deadline is serialized as the empty string.

use crate::model::form::ObjectiveDraft;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one objective.
pub type ObjectiveId = Uuid;

/// Progress assumed when the form leaves the field blank.
pub const DEFAULT_CURRENT_PROGRESS: u32 = 0;
/// Target assumed when the form leaves the field blank.
pub const DEFAULT_TOTAL_PROGRESS: u32 = 100;

/// Calendar format for deadlines, shared by the form and the wire shape.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// A user-defined goal with a numeric target and optional deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    /// Missing in blobs written before stable ids existed. Such records read
    /// as nil until the repository assigns and persists a real id.
    #[serde(default = "Uuid::nil")]
    pub id: ObjectiveId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "deadline_field")]
    pub deadline: Option<NaiveDate>,
    #[serde(default = "default_current_progress")]
    pub current_progress: u32,
    #[serde(default = "default_total_progress")]
    pub total_progress: u32,
}

impl Objective {
    /// Creates an objective with a generated id and default progress values.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            deadline: None,
            current_progress: DEFAULT_CURRENT_PROGRESS,
            total_progress: DEFAULT_TOTAL_PROGRESS,
        }
    }

    /// Builds a new objective from a validated draft.
    pub fn from_draft(draft: ObjectiveDraft) -> Self {
        let mut objective = Self::new(String::new(), String::new());
        objective.apply_draft(draft);
        objective
    }

    /// Replaces every user-editable field, keeping `id`.
    pub fn apply_draft(&mut self, draft: ObjectiveDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.deadline = draft.deadline;
        self.current_progress = draft.current_progress;
        self.total_progress = draft.total_progress;
    }
}

fn default_current_progress() -> u32 {
    DEFAULT_CURRENT_PROGRESS
}

fn default_total_progress() -> u32 {
    DEFAULT_TOTAL_PROGRESS
}

mod deadline_field {
    use super::DEADLINE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.collect_str(&date.format(DEADLINE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, DEADLINE_FORMAT)
                .map(Some)
                .map_err(|err| {
                    serde::de::Error::custom(format!("invalid deadline `{text}`: {err}"))
                }),
        }
    }
}
