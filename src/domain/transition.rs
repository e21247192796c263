//! Task moves between workflow columns.

use crate::{
    clock::Clock,
    domain::{
        flow::can_transition,
        sla::start_sla_if_needed,
        task::{Task, TaskStatus},
        wip::can_enter_wip,
        workflow::Workflow,
    },
    error::MoveError,
};

/// Moves a task to the `to` column.
///
/// Checks, in order, that the step is legal, that the workflow has a column
/// for `to`, and that the column has room given `current_count_in_target`
/// (the number of *other* tasks already in it). On success returns a new
/// task with the new status and, when entering `in_progress`, a started SLA.
/// `updated_at` is left for the host to stamp on commit.
///
/// # Errors
///
/// Returns the first [`MoveError`] hit; `task` is never modified.
pub fn move_task(
    task: &Task,
    to: TaskStatus,
    workflow: &Workflow,
    current_count_in_target: usize,
    clock: &impl Clock,
) -> Result<Task, MoveError> {
    let from = task.status;
    if !can_transition(from, to) {
        tracing::warn!(task_id = %task.id, %from, %to, "illegal transition");
        return Err(MoveError::IllegalTransition { from, to });
    }

    let column = workflow.column(to).ok_or_else(|| {
        tracing::warn!(
            task_id = %task.id,
            %to,
            workflow = %workflow.id,
            "column missing from workflow"
        );
        MoveError::UnknownColumn { to }
    })?;

    if let Some(limit) = column.wip_limit {
        if !can_enter_wip(current_count_in_target, Some(limit)) {
            tracing::warn!(
                task_id = %task.id,
                column = %to,
                limit,
                current_count = current_count_in_target,
                "WIP limit reached"
            );
            return Err(MoveError::WipLimitExceeded {
                column_id: to,
                limit,
                current_count: current_count_in_target,
            });
        }
    }

    let next = Task {
        status: to,
        ..task.clone()
    };
    let next = start_sla_if_needed(next, to, clock);

    tracing::debug!(task_id = %next.id, %from, %to, "task moved");
    Ok(next)
}
