pub mod board;
pub mod flow;
pub mod rules;
pub mod sla;
pub mod sprint;
pub mod task;
pub mod transition;
pub mod user;
pub mod wip;
pub mod workflow;

pub use board::Board;
pub use flow::{can_transition, ADJACENT_FLOW};
pub use rules::match_rules;
pub use sla::{start_sla_if_needed, tick_sla, Sla};
pub use sprint::Sprint;
pub use task::{Priority, Task, TaskId, TaskStatus};
pub use transition::move_task;
pub use user::{Role, User};
pub use wip::{can_enter_wip, count_in_column};
pub use workflow::{ColumnConfig, RuleCondition, RuleEffect, Workflow, WorkflowRule};
