//! Workflow configuration: the columns a board shows, their WIP limits and
//! the automation rules evaluated against tasks.
//!
//! A [`Workflow`] is a plain value. Hosts build one explicitly (or load it
//! from JSON) and pass it into every engine call; there is no global default.

use crate::{
    domain::{
        task::{Priority, TaskStatus},
        user::Role,
    },
    error::{Result, TaskOpsError},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One stage of a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub id: TaskStatus,
    pub title: String,
    /// Maximum number of tasks in the column; `None` is unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<u32>,
}

impl ColumnConfig {
    /// Creates an unlimited column titled after its status
    pub fn new(id: TaskStatus) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            wip_limit: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_wip_limit(mut self, limit: u32) -> Result<Self> {
        if limit == 0 {
            return Err(TaskOpsError::InvalidWipLimit(self.id));
        }
        self.wip_limit = Some(limit);
        Ok(self)
    }
}

/// Partial match on a task's status and priority; absent fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Effects a matching rule suggests; applying them is up to the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEffect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_assign_role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_tag: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub notify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRule {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<RuleCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<RuleEffect>,
}

impl WorkflowRule {
    /// Creates a rule that matches every task and suggests nothing
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            when: None,
            then: None,
        }
    }

    pub fn when_status(mut self, status: TaskStatus) -> Self {
        self.when.get_or_insert_with(RuleCondition::default).status = Some(status);
        self
    }

    pub fn when_priority(mut self, priority: Priority) -> Self {
        self.when.get_or_insert_with(RuleCondition::default).priority = Some(priority);
        self
    }

    pub fn then_add_tag(mut self, tag: impl Into<String>) -> Self {
        self.then.get_or_insert_with(RuleEffect::default).add_tag = Some(tag.into());
        self
    }

    pub fn then_assign_role(mut self, role: Role) -> Self {
        self.then.get_or_insert_with(RuleEffect::default).auto_assign_role = Some(role);
        self
    }

    pub fn then_notify(mut self) -> Self {
        self.then.get_or_insert_with(RuleEffect::default).notify = true;
        self
    }
}

/// Ordered columns plus automation rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub columns: Vec<ColumnConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<WorkflowRule>,
}

impl Workflow {
    /// Creates a workflow with a generated ID after validating its columns
    pub fn new(name: impl Into<String>, columns: Vec<ColumnConfig>) -> Result<Self> {
        let workflow = Self {
            id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            columns,
            rules: Vec::new(),
        };
        workflow.validate()?;
        Ok(workflow)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_rule(mut self, rule: WorkflowRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Checks one column per status and positive WIP limits
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.id) {
                return Err(TaskOpsError::DuplicateColumn(column.id));
            }
            if column.wip_limit == Some(0) {
                return Err(TaskOpsError::InvalidWipLimit(column.id));
            }
        }
        Ok(())
    }

    /// Gets the column configuration for a status
    pub fn column(&self, status: TaskStatus) -> Option<&ColumnConfig> {
        self.columns.iter().find(|col| col.id == status)
    }

    pub fn wip_limit(&self, status: TaskStatus) -> Option<u32> {
        self.column(status).and_then(|col| col.wip_limit)
    }

    /// Returns a copy with the WIP limit of `status` replaced.
    ///
    /// `None` removes the limit. A status without a column leaves the
    /// workflow unchanged.
    pub fn with_wip_limit(mut self, status: TaskStatus, limit: Option<u32>) -> Result<Self> {
        if limit == Some(0) {
            return Err(TaskOpsError::InvalidWipLimit(status));
        }
        if let Some(column) = self.columns.iter_mut().find(|col| col.id == status) {
            column.wip_limit = limit;
        }
        Ok(self)
    }

    /// Loads and validates a workflow document
    pub fn from_json(json: &str) -> Result<Self> {
        let workflow: Self = serde_json::from_str(json)?;
        if workflow.columns.is_empty() {
            return Err(TaskOpsError::ConfigError(format!(
                "workflow '{}' has no columns",
                workflow.name
            )));
        }
        workflow.validate()?;
        Ok(workflow)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Workflow {
    fn default() -> Self {
        let limited = |status, limit| ColumnConfig {
            wip_limit: Some(limit),
            ..ColumnConfig::new(status)
        };
        Self {
            id: "wf-default".to_string(),
            name: "Default Workflow".to_string(),
            columns: vec![
                ColumnConfig::new(TaskStatus::Backlog),
                limited(TaskStatus::Todo, 6),
                limited(TaskStatus::InProgress, 4),
                limited(TaskStatus::Review, 3),
                ColumnConfig::new(TaskStatus::Done),
            ],
            rules: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workflow() {
        let workflow = Workflow::default();

        assert!(workflow.validate().is_ok());
        assert_eq!(workflow.columns.len(), 5);
        assert_eq!(workflow.wip_limit(TaskStatus::Backlog), None);
        assert_eq!(workflow.wip_limit(TaskStatus::Todo), Some(6));
        assert_eq!(workflow.wip_limit(TaskStatus::InProgress), Some(4));
        assert_eq!(workflow.wip_limit(TaskStatus::Review), Some(3));
        assert_eq!(workflow.wip_limit(TaskStatus::Done), None);
        assert_eq!(workflow.column(TaskStatus::Todo).unwrap().title, "To Do");
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let result = Workflow::new(
            "dup",
            vec![ColumnConfig::new(TaskStatus::Todo), ColumnConfig::new(TaskStatus::Todo)],
        );
        assert!(matches!(result, Err(TaskOpsError::DuplicateColumn(TaskStatus::Todo))));
    }

    #[test]
    fn test_zero_wip_limit_rejected() {
        assert!(ColumnConfig::new(TaskStatus::Review).with_wip_limit(0).is_err());
        assert!(Workflow::default().with_wip_limit(TaskStatus::Todo, Some(0)).is_err());
    }

    #[test]
    fn test_with_wip_limit() {
        let workflow = Workflow::default()
            .with_wip_limit(TaskStatus::InProgress, Some(2))
            .unwrap()
            .with_wip_limit(TaskStatus::Review, None)
            .unwrap();

        assert_eq!(workflow.wip_limit(TaskStatus::InProgress), Some(2));
        assert_eq!(workflow.wip_limit(TaskStatus::Review), None);

        let partial = Workflow::new("partial", vec![ColumnConfig::new(TaskStatus::Todo)]).unwrap();
        let unchanged = partial.clone().with_wip_limit(TaskStatus::Done, Some(3)).unwrap();
        assert_eq!(unchanged, partial);
    }

    #[test]
    fn test_rule_builder() {
        let rule = WorkflowRule::new("r1")
            .when_status(TaskStatus::Review)
            .when_priority(Priority::Critical)
            .then_add_tag("hot")
            .then_assign_role(Role::Manager)
            .then_notify();

        let when = rule.when.unwrap();
        assert_eq!(when.status, Some(TaskStatus::Review));
        assert_eq!(when.priority, Some(Priority::Critical));
        let then = rule.then.unwrap();
        assert_eq!(then.add_tag.as_deref(), Some("hot"));
        assert_eq!(then.auto_assign_role, Some(Role::Manager));
        assert!(then.notify);
    }

    #[test]
    fn test_json_round_trip_preserves_config() {
        let rule = WorkflowRule::new("r1").when_status(TaskStatus::Done);
        let workflow = Workflow::default().with_rule(rule);
        let json = workflow.to_json().unwrap();

        assert!(json.contains("\"wipLimit\": 4"));
        assert_eq!(Workflow::from_json(&json).unwrap(), workflow);
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{
            "id": "wf",
            "name": "Broken",
            "columns": [
                { "id": "todo", "title": "To Do" },
                { "id": "todo", "title": "Again" }
            ]
        }"#;
        assert!(matches!(Workflow::from_json(json), Err(TaskOpsError::DuplicateColumn(_))));

        let empty = r#"{ "id": "wf", "name": "Empty", "columns": [] }"#;
        assert!(matches!(Workflow::from_json(empty), Err(TaskOpsError::ConfigError(_))));

        let typo = r#"{
            "id": "wf",
            "name": "Typo",
            "columns": [{ "id": "rewiew", "title": "R" }]
        }"#;
        assert!(matches!(Workflow::from_json(typo), Err(TaskOpsError::SerializationError(_))));
    }

    #[test]
    fn test_rules_from_json() {
        let json = r#"{
            "id": "wf",
            "name": "Rules",
            "columns": [{ "id": "done", "title": "Done" }],
            "rules": [
                { "id": "all" },
                {
                    "id": "crit",
                    "when": { "priority": "critical" },
                    "then": { "autoAssignRole": "manager", "notify": true }
                }
            ]
        }"#;

        let workflow = Workflow::from_json(json).unwrap();
        assert_eq!(workflow.rules.len(), 2);
        assert!(workflow.rules[0].when.is_none());
        let effect = workflow.rules[1].then.as_ref().unwrap();
        assert_eq!(effect.auto_assign_role, Some(Role::Manager));
        assert!(effect.notify);
        assert!(effect.add_tag.is_none());
    }
}
