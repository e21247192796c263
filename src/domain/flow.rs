use crate::domain::task::TaskStatus;

/// Statuses reachable in one step from each status.
///
/// Tasks move one column forward or one column back; skipping stages is not
/// allowed.
pub const ADJACENT_FLOW: [(TaskStatus, &[TaskStatus]); 5] = [
    (TaskStatus::Backlog, &[TaskStatus::Todo]),
    (TaskStatus::Todo, &[TaskStatus::Backlog, TaskStatus::InProgress]),
    (TaskStatus::InProgress, &[TaskStatus::Todo, TaskStatus::Review]),
    (TaskStatus::Review, &[TaskStatus::InProgress, TaskStatus::Done]),
    (TaskStatus::Done, &[TaskStatus::Review]),
];

impl TaskStatus {
    /// Statuses a task with this status may move to
    pub fn next_statuses(self) -> &'static [TaskStatus] {
        ADJACENT_FLOW
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, targets)| *targets)
            .unwrap_or(&[])
    }

    /// Checks if a status transition is valid
    pub fn can_transition_to(self, target: TaskStatus) -> bool {
        self.next_statuses().contains(&target)
    }
}

/// Checks whether `from -> to` is a single legal step
pub fn can_transition(from: TaskStatus, to: TaskStatus) -> bool {
    from.can_transition_to(to)
}
