use crate::config::ExecutionConfig;
use crate::error::{Result, RundocError};
use crate::executor::planner::CommandPlan;
use crate::executor::validator::CommandValidator;
use async_trait::async_trait;
use colored::*;
use std::env;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

/// `-c "<명령어>"`로 실행해 변수 확장과 연산자를 지원하는 셸
const EXPANDING_SHELLS: &[&str] = &["sh", "bash"];

/// 작업 최종 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Completed,
    Failed,
}

/// 명령어 하나의 실행 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// 명령어가 나온 섹션 이름
    pub section_name: String,
    /// 공백으로 이어 붙인 명령어
    pub command: String,
    pub status: TaskStatus,
    /// 에러 메시지 (실패 시)
    pub error: Option<String>,
    /// 실행 시간 (밀리초)
    pub duration_ms: u128,
}

impl TaskResult {
    pub fn completed(plan: &CommandPlan, duration_ms: u128) -> Self {
        Self {
            section_name: plan.context.name.clone(),
            command: plan.command_line(),
            status: TaskStatus::Completed,
            error: None,
            duration_ms,
        }
    }

    pub fn failed(plan: &CommandPlan, error: String, duration_ms: u128) -> Self {
        Self {
            section_name: plan.context.name.clone(),
            command: plan.command_line(),
            status: TaskStatus::Failed,
            error: Some(error),
            duration_ms,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Executes one command plan. Failures are encoded in the result, never returned as `Err`.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn run(&self, plan: &CommandPlan) -> TaskResult;
}

/// 로컬 프로세스로 명령어를 실행하는 러너
pub struct TaskRunner {
    config: ExecutionConfig,
}

impl TaskRunner {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// 비어 있거나 설정되지 않은 환경 변수를 모두 모아서 보고
    fn validate_environment(required: &[String]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| env::var(name.as_str()).map(|v| v.is_empty()).unwrap_or(true))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RundocError::MissingEnvironment(missing))
        }
    }

    fn build_command(plan: &CommandPlan) -> Result<Command> {
        let (program, rest) = plan
            .args
            .split_first()
            .ok_or(RundocError::EmptyArguments)?;

        let mut command = if EXPANDING_SHELLS.contains(&plan.shell.as_str()) {
            let mut command = Command::new(&plan.shell);
            command.arg("-c").arg(plan.command_line());
            command
        } else {
            // 그 외 셸은 확장 없이 첫 인자를 직접 실행
            let mut command = Command::new(program);
            command.args(rest);
            command
        };

        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        Ok(command)
    }

    async fn execute(&self, plan: &CommandPlan) -> Result<()> {
        let mut command = Self::build_command(plan)?;

        let outcome = if self.config.timeout.is_zero() {
            command.status().await
        } else {
            // 타임아웃 시 future가 drop되면서 kill_on_drop으로 프로세스 종료
            tokio::time::timeout(self.config.timeout, command.status())
                .await
                .map_err(|_| RundocError::Timeout(self.config.timeout))?
        };
        let status = outcome.map_err(|e| RundocError::ExecutionFailed(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(RundocError::ExecutionFailed(status.to_string()))
        }
    }
}

#[async_trait]
impl Runner for TaskRunner {
    async fn run(&self, plan: &CommandPlan) -> TaskResult {
        let start_time = Instant::now();

        if let Err(e) = CommandValidator::validate(plan, &self.config) {
            tracing::warn!(section = %plan.context.name, error = %e, "command rejected");
            return TaskResult::failed(
                plan,
                format!("security validation failed: {}", e),
                start_time.elapsed().as_millis(),
            );
        }

        if let Err(e) = Self::validate_environment(&plan.environment) {
            tracing::warn!(section = %plan.context.name, error = %e, "environment check failed");
            return TaskResult::failed(
                plan,
                format!("environment validation failed: {}", e),
                start_time.elapsed().as_millis(),
            );
        }

        eprintln!(
            "{} [Section: {}] Running command: '{}'",
            "[>>]".cyan(),
            plan.context.name,
            plan.command_line()
        );
        tracing::info!(section = %plan.context.name, shell = %plan.shell, "executing command");

        match self.execute(plan).await {
            Ok(()) => TaskResult::completed(plan, start_time.elapsed().as_millis()),
            Err(e) => {
                tracing::warn!(section = %plan.context.name, error = %e, "command failed");
                TaskResult::failed(plan, e.to_string(), start_time.elapsed().as_millis())
            }
        }
    }
}
