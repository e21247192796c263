use crate::{
    domain::{Task, TaskId, TaskStatus, Workflow},
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "memory-storage")]
pub mod memory_storage;

/// Host-side store owning the canonical task collection and the active
/// workflow. The engine never touches it; [`crate::service::TaskService`]
/// loads values from it and commits engine results back.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Inserts or replaces a task
    async fn save_task(&self, task: &Task) -> Result<()>;

    /// Loads a task by ID
    async fn load_task(&self, id: &TaskId) -> Result<Task>;

    async fn contains_task(&self, id: &TaskId) -> Result<bool>;

    /// Lists all tasks in insertion order
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Lists the tasks currently in the `status` column
    async fn tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let tasks = self.list_tasks().await?;
        Ok(tasks.into_iter().filter(|task| task.status == status).collect())
    }

    /// Removes a task from the collection
    async fn delete_task(&self, id: &TaskId) -> Result<()>;

    /// Replaces the active workflow
    async fn save_workflow(&self, workflow: &Workflow) -> Result<()>;

    /// Loads the active workflow
    async fn load_workflow(&self) -> Result<Workflow>;
}
