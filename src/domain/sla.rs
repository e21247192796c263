//! SLA timers.
//!
//! A task's service clock starts the first time it enters
//! [`TaskStatus::InProgress`] and breaches once more than `minutes` minutes
//! have elapsed since that start. `start_at` is write-once and `breached` is
//! sticky; none of the functions here can undo either.

use crate::{
    clock::Clock,
    domain::task::{Task, TaskStatus},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Service clock attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sla {
    /// Minute budget, counted from `start_at`
    pub minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub breached: bool,
}

impl Sla {
    /// Creates a timer that has not started yet
    pub const fn new(minutes: u32) -> Self {
        Self {
            minutes,
            start_at: None,
            breached: false,
        }
    }

    pub const fn is_started(&self) -> bool {
        self.start_at.is_some()
    }

    pub const fn is_breached(&self) -> bool {
        self.breached
    }

    pub fn budget(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }

    /// Instant after which the timer counts as breached; `None` before the
    /// timer starts or when the deadline is past the representable range
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.start_at
            .and_then(|start| start.checked_add_signed(self.budget()))
    }

    /// Time left before the deadline, saturating at zero
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.deadline()
            .map(|deadline| (deadline - now).max(Duration::zero()))
    }

    fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        // Strictly past the budget; elapsed == minutes is still within SLA
        self.start_at
            .is_some_and(|start| now - start > self.budget())
    }
}

/// Starts the task's SLA clock when it moves into `in_progress`.
///
/// Returns the task untouched when `next_status` is any other status, when
/// the task has no SLA, or when the clock was already started.
pub fn start_sla_if_needed(mut task: Task, next_status: TaskStatus, clock: &impl Clock) -> Task {
    if next_status != TaskStatus::InProgress {
        return task;
    }

    if let Some(sla) = task.sla.as_mut().filter(|sla| !sla.is_started()) {
        let now = clock.utc();
        sla.start_at = Some(now);
        tracing::debug!(task_id = %task.id, minutes = sla.minutes, start_at = %now, "SLA started");
    }

    task
}

/// Marks the task's SLA as breached if its budget has run out at `now`.
///
/// Tasks without an SLA, with an unstarted SLA, or already breached come back
/// unchanged.
pub fn tick_sla(mut task: Task, now: DateTime<Utc>) -> Task {
    if let Some(sla) = task.sla.as_mut() {
        if !sla.breached && sla.is_overdue(now) {
            sla.breached = true;
            tracing::info!(task_id = %task.id, minutes = sla.minutes, "SLA breached");
        }
    }

    task
}
