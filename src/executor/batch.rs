use crate::executor::planner::CommandPlan;
use crate::executor::runner::{Runner, TaskResult};
use std::time::Instant;

/// 배치 실행 결과
#[derive(Debug)]
pub struct BatchResult {
    /// 총 작업 수
    pub total: usize,
    /// 성공한 작업 수
    pub success_count: usize,
    /// 실패한 작업 수
    pub failure_count: usize,
    /// 개별 작업 결과 (계획 순서와 동일)
    pub task_results: Vec<TaskResult>,
    /// 전체 실행 시간 (밀리초)
    pub total_duration_ms: u128,
}

impl BatchResult {
    pub fn from_results(task_results: Vec<TaskResult>, total_duration_ms: u128) -> Self {
        let success_count = task_results.iter().filter(|r| r.is_success()).count();

        Self {
            total: task_results.len(),
            success_count,
            failure_count: task_results.len() - success_count,
            task_results,
            total_duration_ms,
        }
    }

    /// 모든 작업이 성공했는지 확인
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }

    /// 실패한 작업들 반환
    pub fn failed_tasks(&self) -> Vec<&TaskResult> {
        self.task_results.iter().filter(|r| !r.is_success()).collect()
    }
}

/// 계획을 순서대로 하나씩 실행합니다.
///
/// 실패한 명령어가 있어도 멈추지 않고 다음 계획으로 넘어가며, 계획마다 결과가 하나씩 남습니다.
pub async fn run_execution_plan(plans: &[CommandPlan], runner: &dyn Runner) -> Vec<TaskResult> {
    let mut results = Vec::with_capacity(plans.len());

    for plan in plans {
        results.push(runner.run(plan).await);
    }

    results
}

/// `run_execution_plan` + 요약
pub async fn execute_batch(plans: &[CommandPlan], runner: &dyn Runner) -> BatchResult {
    let start_time = Instant::now();
    let results = run_execution_plan(plans, runner).await;
    BatchResult::from_results(results, start_time.elapsed().as_millis())
}
