//! # TaskOps Core
//!
//! Workflow engine for TaskOps kanban boards.
//!
//! The [`domain`] module holds the pure engine: which status moves are legal,
//! WIP admission per column, SLA timers, and workflow rule matching, composed
//! by [`domain::move_task`]. Every engine function takes values and returns new
//! values; nothing is mutated in place and nothing touches storage.
//!
//! [`service::TaskService`] is the host side: it reads the task collection from
//! a [`Storage`], counts column occupancy, calls the engine, and commits the
//! result while serializing concurrent moves.

pub mod clock;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use clock::{Clock, DefaultClock, FixedClock};
pub use domain::{
    can_enter_wip, can_transition, match_rules, move_task, start_sla_if_needed, tick_sla, Board,
    ColumnConfig, Priority, Role, Sla, Sprint, Task, TaskId, TaskStatus, User, Workflow,
    WorkflowRule,
};
pub use error::{MoveError, Result, TaskOpsError};
pub use service::{MoveOutcome, TaskService};
pub use storage::Storage;

#[cfg(feature = "memory-storage")]
pub use storage::memory_storage::MemoryStorage;
