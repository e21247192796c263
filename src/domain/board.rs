use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A kanban board; its columns come from the referenced workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub member_ids: Vec<String>,
    pub workflow_id: String,
}

impl Board {
    pub const DEFAULT_NAME: &'static str = "TaskOps Board";

    /// Creates a board owned (and joined) by `owner_id`
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        workflow_id: impl Into<String>,
    ) -> Self {
        let owner_id = owner_id.into();
        Self {
            id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            member_ids: vec![owner_id.clone()],
            owner_id,
            workflow_id: workflow_id.into(),
        }
    }

    /// Adds a member unless already present
    pub fn add_member(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        if !self.is_member(&user_id) {
            self.member_ids.push(user_id);
        }
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == user_id)
    }
}
