pub mod batch;
pub mod planner;
pub mod runner;
pub mod validator;

// Re-exports for convenience (used in service and commands)
pub use batch::{execute_batch, run_execution_plan, BatchResult};
pub use planner::{CommandPlan, ExecutionPlanner};
pub use runner::{Runner, TaskResult, TaskRunner, TaskStatus};
pub use validator::CommandValidator;
