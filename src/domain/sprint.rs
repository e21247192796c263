use crate::{
    domain::task::TaskId,
    error::{Result, TaskOpsError},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A time-boxed set of tasks on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: String,
    pub board_id: String,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub task_ids: Vec<TaskId>,
}

impl Sprint {
    /// Creates an empty sprint; `end` must be strictly after `start`
    pub fn new(
        board_id: impl Into<String>,
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self> {
        if end <= start {
            return Err(TaskOpsError::InvalidSprintRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4().simple().to_string(),
            board_id: board_id.into(),
            name: name.into(),
            start,
            end,
            task_ids: Vec::new(),
        })
    }

    /// Adds a task unless already planned
    pub fn add_task(&mut self, task_id: TaskId) {
        if !self.task_ids.contains(&task_id) {
            self.task_ids.push(task_id);
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}
