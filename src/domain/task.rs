use crate::{clock::Clock, domain::sla::Sla, error::TaskOpsError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Opaque identifier for a task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an already generated identifier
    pub fn new(id: impl Into<String>) -> Result<Self, TaskOpsError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TaskOpsError::InvalidTaskId(id));
        }
        Ok(Self(id))
    }

    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TaskId {
    type Err = TaskOpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TaskId {
    type Error = TaskOpsError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a task; each status is backed by one workflow column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Every status in board order
    pub const ALL: [TaskStatus; 5] = [
        Self::Backlog,
        Self::Todo,
        Self::InProgress,
        Self::Review,
        Self::Done,
    ];

    /// Canonical wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Default column title for the status
    pub const fn title(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskOpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only the canonical spellings; "inprogress" and "rewiew" are rejected
        match s.trim().to_lowercase().as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(TaskOpsError::InvalidStatus(s.to_string())),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskOpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(TaskOpsError::InvalidPriority(s.to_string())),
        }
    }
}

/// A unit of work on a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub board_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla: Option<Sla>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Task {
    /// Creates a backlog task of medium priority with a generated ID
    pub fn new(board_id: impl Into<String>, title: impl Into<String>, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id: TaskId::generate(),
            board_id: board_id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Backlog,
            priority: Priority::default(),
            assignee_id: None,
            points: None,
            created_at: now,
            updated_at: now,
            due_at: None,
            sla: None,
            tags: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_sla(mut self, sla: Sla) -> Self {
        self.sla = Some(sla);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Adds a tag unless it is already present
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.has_tag(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Stamps `updated_at`. Engine functions never call this; the host does
    /// when it commits a result.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn is_sla_breached(&self) -> bool {
        self.sla.as_ref().is_some_and(Sla::is_breached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_task_id_generation_is_unique() {
        let a = TaskId::generate();
        let b = TaskId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_task_id_parsing() {
        let id = TaskId::from_str("t-42").unwrap();
        assert_eq!(id.as_str(), "t-42");
        assert_eq!(id.to_string(), "t-42");

        assert!(TaskId::from_str("").is_err());
        assert!(TaskId::from_str("   ").is_err());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(TaskStatus::from_str("in_progress").unwrap(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from_str(" Review ").unwrap(), TaskStatus::Review);

        // Misspelled variants are not accepted as aliases
        assert!(TaskStatus::from_str("inprogress").is_err());
        assert!(TaskStatus::from_str("rewiew").is_err());
    }

    #[test]
    fn test_priority_parsing_and_order() {
        assert_eq!(Priority::from_str("CRITICAL").unwrap(), Priority::Critical);
        assert!(Priority::from_str("urgent").is_err());
        assert!(Priority::Low < Priority::Critical);
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("board-1", "Write docs", &clock());

        assert_eq!(task.status, TaskStatus::Backlog);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.created_at, clock().utc());
        assert_eq!(task.updated_at, task.created_at);
        assert!(task.sla.is_none());
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_tags_are_set_like() {
        let task = Task::new("b", "Tagged", &clock())
            .with_tag("urgent")
            .with_tag("ops")
            .with_tag("urgent");

        assert_eq!(task.tags, vec!["urgent".to_string(), "ops".to_string()]);
        assert!(task.has_tag("ops"));
        assert!(!task.has_tag("docs"));
    }

    #[test]
    fn test_touch_updates_only_updated_at() {
        let mut task = Task::new("b", "Touch", &clock());
        let later = clock().utc() + chrono::Duration::minutes(5);

        task.touch(later);

        assert_eq!(task.updated_at, later);
        assert_eq!(task.created_at, clock().utc());
    }

    #[test]
    fn test_task_serialization_uses_camel_case() {
        let task = Task::new("board-1", "Serialize", &clock())
            .with_status(TaskStatus::InProgress)
            .with_sla(Sla::new(30));

        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["boardId"], "board-1");
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["sla"]["minutes"], 30);
        assert!(json.get("tags").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_minimal_task_deserialization() {
        let json = r#"{
            "id": "abc123",
            "boardId": "b1",
            "title": "Minimal",
            "status": "todo",
            "priority": "high",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_str(), "abc123");
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.sla.is_none());
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_unknown_status_is_rejected_on_deserialization() {
        let json = r#"{
            "id": "abc123",
            "boardId": "b1",
            "title": "Typo",
            "status": "inprogress",
            "priority": "high",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_empty_id_is_rejected_on_deserialization() {
        let json = r#"{
            "id": "",
            "boardId": "b1",
            "title": "No id",
            "status": "todo",
            "priority": "low",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        assert!(serde_json::from_str::<Task>(json).is_err());
        assert!(serde_json::from_str::<TaskId>(r#""   ""#).is_err());

        let id: TaskId = serde_json::from_str(r#""t-7""#).unwrap();
        assert_eq!(id.as_str(), "t-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""t-7""#);
    }
}
