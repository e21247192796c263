//! Host-side orchestration around the pure engine.
//!
//! [`TaskService`] owns the read-count-decide-commit sequence for moves. All
//! mutating calls take one async lock, so two concurrent moves into the same
//! column can never both pass the WIP check.

use crate::{
    clock::Clock,
    domain::{
        self, count_in_column, match_rules, tick_sla, Task, TaskId, TaskStatus, Workflow,
        WorkflowRule,
    },
    error::{Result, TaskOpsError},
    storage::Storage,
};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

/// Result of a committed move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    /// The task as committed to the store
    pub task: Task,
    /// Workflow rules matching the task after the move, in declaration order
    pub matched_rules: Vec<WorkflowRule>,
}

pub struct TaskService<S, C> {
    storage: S,
    clock: C,
    commit_lock: Mutex<()>,
}

impl<S, C> TaskService<S, C>
where
    S: Storage,
    C: Clock + Send + Sync,
{
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            commit_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Adds a new task to the store
    ///
    /// # Errors
    ///
    /// Returns [`TaskOpsError::DuplicateTask`] if the ID is already taken.
    pub async fn create_task(&self, task: Task) -> Result<Task> {
        let _guard = self.commit_lock.lock().await;
        if self.storage.contains_task(&task.id).await? {
            return Err(TaskOpsError::DuplicateTask(task.id.to_string()));
        }
        self.storage.save_task(&task).await?;
        tracing::info!(task_id = %task.id, status = %task.status, "task created");
        Ok(task)
    }

    /// Moves a stored task to `to` and commits the result.
    ///
    /// The occupancy of `to` is counted once, excluding the task itself,
    /// while holding the commit lock. On success `updated_at` is stamped and
    /// the rules matching the new state are returned alongside the task.
    ///
    /// # Errors
    ///
    /// [`TaskOpsError::Move`] when the engine rejects the move (the store is
    /// left unchanged), or any storage error.
    pub async fn move_task(&self, id: &TaskId, to: TaskStatus) -> Result<MoveOutcome> {
        let _guard = self.commit_lock.lock().await;

        let task = self.storage.load_task(id).await?;
        let workflow = self.storage.load_workflow().await?;
        let tasks = self.storage.list_tasks().await?;
        let occupancy = count_in_column(&tasks, to, Some(id));

        let mut next = domain::move_task(&task, to, &workflow, occupancy, &self.clock)?;
        next.touch(self.clock.utc());
        self.storage.save_task(&next).await?;

        let matched_rules: Vec<WorkflowRule> =
            match_rules(&next, &workflow).into_iter().cloned().collect();
        tracing::info!(
            task_id = %next.id,
            from = %task.status,
            %to,
            matched_rules = matched_rules.len(),
            "move committed"
        );

        Ok(MoveOutcome {
            task: next,
            matched_rules,
        })
    }

    /// Rules of the active workflow that match a stored task
    pub async fn suggested_rules(&self, id: &TaskId) -> Result<Vec<WorkflowRule>> {
        let task = self.storage.load_task(id).await?;
        let workflow = self.storage.load_workflow().await?;
        Ok(match_rules(&task, &workflow).into_iter().cloned().collect())
    }

    /// Ticks every stored SLA at `now` and commits the newly breached tasks.
    ///
    /// Returns the IDs of tasks that breached during this sweep.
    pub async fn sweep_sla(&self, now: DateTime<Utc>) -> Result<Vec<TaskId>> {
        let _guard = self.commit_lock.lock().await;

        let mut breached = Vec::new();
        for task in self.storage.list_tasks().await? {
            if task.is_sla_breached() {
                continue;
            }
            let mut ticked = tick_sla(task, now);
            if ticked.is_sla_breached() {
                ticked.touch(now);
                self.storage.save_task(&ticked).await?;
                breached.push(ticked.id);
            }
        }

        if !breached.is_empty() {
            tracing::info!(count = breached.len(), "SLA sweep found breaches");
        }
        Ok(breached)
    }

    /// Sweeps SLAs at the service clock's current time
    pub async fn sweep_sla_now(&self) -> Result<Vec<TaskId>> {
        self.sweep_sla(self.clock.utc()).await
    }

    /// Changes a column's WIP limit in the active workflow
    pub async fn set_wip_limit(&self, status: TaskStatus, limit: Option<u32>) -> Result<Workflow> {
        let _guard = self.commit_lock.lock().await;
        let workflow = self.storage.load_workflow().await?.with_wip_limit(status, limit)?;
        self.storage.save_workflow(&workflow).await?;
        tracing::info!(column = %status, ?limit, "WIP limit updated");
        Ok(workflow)
    }
}
