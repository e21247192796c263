use crate::domain::{
    task::Task,
    workflow::{RuleCondition, Workflow, WorkflowRule},
};

impl RuleCondition {
    /// Every field present must equal the task's; absent fields are wildcards
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| status == task.status)
            && self.priority.map_or(true, |priority| priority == task.priority)
    }
}

impl WorkflowRule {
    pub fn matches(&self, task: &Task) -> bool {
        self.when.as_ref().map_or(true, |when| when.matches(task))
    }
}

/// Returns the workflow rules matching the task, in declaration order.
///
/// Selection only: effects are left for the host to apply.
pub fn match_rules<'w>(task: &Task, workflow: &'w Workflow) -> Vec<&'w WorkflowRule> {
    workflow
        .rules
        .iter()
        .filter(|rule| rule.matches(task))
        .collect()
}
