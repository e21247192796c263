use crate::{
    domain::{Task, TaskId, Workflow},
    error::{Result, TaskOpsError},
    storage::Storage,
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// In-memory keyed task collection
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug)]
struct MemoryState {
    by_id: HashMap<TaskId, Task>,
    all_ids: Vec<TaskId>,
    workflow: Workflow,
}

impl MemoryStorage {
    /// Creates an empty store using `workflow` as the active workflow
    pub fn new(workflow: Workflow) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                by_id: HashMap::new(),
                all_ids: Vec::new(),
                workflow,
            })),
        }
    }

    /// Upserts a batch of tasks, keeping the first-seen order
    pub async fn seed(&self, tasks: impl IntoIterator<Item = Task>) {
        let mut state = self.state.write().await;
        for task in tasks {
            state.upsert(task);
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.all_ids.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(Workflow::default())
    }
}

impl MemoryState {
    fn upsert(&mut self, task: Task) {
        if !self.by_id.contains_key(&task.id) {
            self.all_ids.push(task.id.clone());
        }
        self.by_id.insert(task.id.clone(), task);
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save_task(&self, task: &Task) -> Result<()> {
        self.state.write().await.upsert(task.clone());
        Ok(())
    }

    async fn load_task(&self, id: &TaskId) -> Result<Task> {
        self.state
            .read()
            .await
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| TaskOpsError::TaskNotFound(id.to_string()))
    }

    async fn contains_task(&self, id: &TaskId) -> Result<bool> {
        Ok(self.state.read().await.by_id.contains_key(id))
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let state = self.state.read().await;
        // all_ids and by_id are only changed together under the write lock
        state
            .all_ids
            .iter()
            .map(|id| {
                state.by_id.get(id).cloned().ok_or_else(|| {
                    TaskOpsError::StorageError(format!("index refers to missing task {id}"))
                })
            })
            .collect()
    }

    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let mut state = self.state.write().await;
        if state.by_id.remove(id).is_none() {
            return Err(TaskOpsError::TaskNotFound(id.to_string()));
        }
        state.all_ids.retain(|existing| existing != id);
        Ok(())
    }

    async fn save_workflow(&self, workflow: &Workflow) -> Result<()> {
        workflow.validate()?;
        self.state.write().await.workflow = workflow.clone();
        Ok(())
    }

    async fn load_workflow(&self) -> Result<Workflow> {
        Ok(self.state.read().await.workflow.clone())
    }
}
