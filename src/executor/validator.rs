use crate::config::ExecutionConfig;
use crate::error::{Result, RundocError};
use crate::executor::planner::CommandPlan;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// 실행 계획이 정책을 만족하는지 검사합니다.
///
/// 문자 그대로의 명령어 이름과 패턴만 비교하는 best-effort deny-list이며,
/// 난독화된 명령어까지 막지는 못합니다.
pub struct CommandValidator;

/// 기본 이름이 일치하면 차단되는 명령어
static DANGEROUS_COMMANDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "format", "fdisk", "mkfs", // 디스크 포맷
        "shutdown", "reboot", "halt", // 시스템 제어
        "sudo", "su", // 권한 상승
        "iptables", "ufw", "firewall-cmd", // 방화벽
        "crontab", "at", "batch", "atq", "atrm", // 작업 예약
        "systemctl", "service", "launchctl", // 서비스 제어
        "dd", // 장치 직접 쓰기
    ]
    .into_iter()
    .collect()
});

impl CommandValidator {
    /// 전체 명령어 문자열에 포함되면 차단되는 패턴
    const DANGEROUS_PATTERNS: &'static [&'static str] = &[
        "rm -rf /",
        "rm -fr /",
        "rm -rf /*",
        "rm -fr /*",
        "> /dev/sd",
        "> /dev/hd",
        "> /dev/nvme",
        "dd of=/dev/",
        ":(){ :|:& };:", // Fork bomb
        "chmod 777 /",
        "chmod -R 777 /",
    ];

    /// 순서대로 검사하고 첫 실패에서 멈춥니다:
    /// 인자 → 명령어 → 허용 명령어 → 위험 명령어 → 위험 패턴 → 허용 셸
    pub fn validate(plan: &CommandPlan, config: &ExecutionConfig) -> Result<()> {
        Self::validate_args(plan, config)?;
        Self::validate_shell(&plan.shell, config)
    }

    fn validate_args(plan: &CommandPlan, config: &ExecutionConfig) -> Result<()> {
        let command = plan.args.first().ok_or(RundocError::EmptyArguments)?;

        if command.trim().is_empty() {
            return Err(RundocError::EmptyCommand);
        }

        let base_command = Self::base_name(command);

        if !config.allowed_commands.is_empty()
            && !config.allowed_commands.iter().any(|c| c == base_command)
        {
            return Err(RundocError::CommandNotAllowed {
                command: base_command.to_string(),
                allowed: config.allowed_commands.clone(),
            });
        }

        if config.block_dangerous_commands {
            if DANGEROUS_COMMANDS.contains(base_command) {
                return Err(RundocError::DangerousCommandBlocked(base_command.to_string()));
            }

            let full_command = plan.command_line();
            if let Some(pattern) = Self::DANGEROUS_PATTERNS
                .iter()
                .find(|pattern| full_command.contains(*pattern))
            {
                return Err(RundocError::DangerousCommandBlocked(format!(
                    "contains '{}'",
                    pattern
                )));
            }
        }

        Ok(())
    }

    fn validate_shell(shell: &str, config: &ExecutionConfig) -> Result<()> {
        if config.allowed_shells.is_empty() || config.allowed_shells.iter().any(|s| s == shell) {
            return Ok(());
        }

        Err(RundocError::ShellNotAllowed {
            shell: shell.to_string(),
            allowed: config.allowed_shells.clone(),
        })
    }

    /// 경로를 제거한 명령어 이름 (`/usr/bin/sudo` → `sudo`)
    fn base_name(command: &str) -> &str {
        Path::new(command)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(command)
    }
}
