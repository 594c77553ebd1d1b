//! Task payloads returned by the iceScrum `/ws/p/{key}/task/` endpoint and their normalized form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::entity::{deserialize_exact_text, deserialize_required_text, EntityRef};

pub const STATE_WAIT: i64 = 0;
pub const STATE_BUSY: i64 = 1;
pub const STATE_DONE: i64 = 2;
pub const TYPE_RECURRENT: i64 = 10;
pub const TYPE_URGENT: i64 = 11;

/// Raised when a task payload lacks a nested field its classification relies on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing field `{0}`")]
pub struct MissingField(pub &'static str);

/// Raw task object as serialized by the iceScrum web service.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawTaskRecord {
    #[serde(deserialize_with = "deserialize_required_text")]
    pub uid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub task_type: Option<i64>,
    #[serde(default)]
    pub state: i64,
    #[serde(default, deserialize_with = "deserialize_exact_text")]
    pub estimation: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub parent_story: Option<EntityRef>,
    #[serde(default)]
    pub backlog: Option<EntityRef>,
}

impl RawTaskRecord {
    /// Id of the story a feature task belongs to.
    pub fn parent_story_id(&self) -> Result<&str, MissingField> {
        self.parent_story
            .as_ref()
            .and_then(|story| story.id.as_deref())
            .ok_or(MissingField("parentStory.id"))
    }

    /// Id of the sprint backlog holding the task.
    pub fn backlog_id(&self) -> Result<&str, MissingField> {
        self.backlog
            .as_ref()
            .and_then(|backlog| backlog.id.as_deref())
            .ok_or(MissingField("backlog.id"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    Bug,
    Feature,
    Other,
}

impl Classification {
    /// Urgent tasks are bugs, recurrent tasks are "other", anything else is a feature.
    pub fn from_type_code(code: Option<i64>) -> Self {
        match code {
            Some(TYPE_URGENT) => Classification::Bug,
            Some(TYPE_RECURRENT) => Classification::Other,
            _ => Classification::Feature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskStatus {
    Open,
    InProgress,
    Resolved,
}

impl TaskStatus {
    pub fn from_state_code(code: i64) -> Self {
        match code {
            STATE_WAIT => TaskStatus::Open,
            STATE_BUSY => TaskStatus::InProgress,
            _ => TaskStatus::Resolved,
        }
    }

    /// Label shown in the task description.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Open => "Todo",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Resolved => "Done",
        }
    }
}

/// Represents a task ready for presentation, including id, summary, enriched description, classification, status, timestamps and a link back to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTask {
    pub(crate) id: String,
    pub(crate) summary: String,
    pub(crate) description: String,
    pub(crate) classification: Classification,
    pub(crate) status: TaskStatus,
    pub(crate) closed: bool,
    pub(crate) created: Option<DateTime<Utc>>,
    pub(crate) updated: Option<DateTime<Utc>>,
    pub(crate) issue_url: String,
}

impl NormalizedTask {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    pub fn issue_url(&self) -> &str {
        &self.issue_url
    }
}
