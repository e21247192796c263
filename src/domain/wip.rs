use crate::domain::task::{Task, TaskId, TaskStatus};

/// Decides whether one more task may enter a column.
///
/// `None` means the column is unlimited. A column holding exactly `limit`
/// tasks is full.
pub fn can_enter_wip(current_count: usize, limit: Option<u32>) -> bool {
    match limit {
        None => true,
        Some(limit) => current_count < limit as usize,
    }
}

/// Counts the tasks occupying the `status` column.
///
/// The task being moved is passed as `excluding` so it is never counted
/// against its own target column.
pub fn count_in_column<'a, I>(tasks: I, status: TaskStatus, excluding: Option<&TaskId>) -> usize
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| task.status == status)
        .filter(|task| excluding != Some(&task.id))
        .count()
}
