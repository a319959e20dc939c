use crate::error::{Result, RundocError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 명령어 실행 보안 정책
///
/// 설정 파일은 ~/.rundoc/config.toml에 저장됩니다.
/// 이 정책은 allow-list / deny-list 검사일 뿐이며 샌드박스가 아닙니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// 명령어 실행 제한 시간 (0이면 무제한)
    #[serde(rename = "timeout_secs", with = "duration_secs", default = "default_timeout")]
    pub timeout: Duration,

    /// 허용된 셸 목록 (비어 있으면 제한 없음)
    #[serde(default = "default_allowed_shells")]
    pub allowed_shells: Vec<String>,

    /// 허용된 명령어 목록 (비어 있으면 제한 없음)
    #[serde(default)]
    pub allowed_commands: Vec<String>,

    /// 위험한 명령어/패턴 차단 여부
    #[serde(default = "default_block_dangerous")]
    pub block_dangerous_commands: bool,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_allowed_shells() -> Vec<String> {
    ["bash", "sh", "python3", "python", "node", "go"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_block_dangerous() -> bool {
    true
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::default_secure()
    }
}

impl ExecutionConfig {
    /// 기본 보안 정책: 30초 타임아웃, 일반적인 인터프리터만 허용, 위험 명령어 차단
    pub fn default_secure() -> Self {
        Self {
            timeout: default_timeout(),
            allowed_shells: default_allowed_shells(),
            allowed_commands: Vec::new(),
            block_dangerous_commands: default_block_dangerous(),
        }
    }

    /// 아무것도 제한하지 않는 정책
    pub fn unrestricted() -> Self {
        Self {
            timeout: Duration::ZERO,
            allowed_shells: Vec::new(),
            allowed_commands: Vec::new(),
            block_dangerous_commands: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 설정 디렉토리 경로 (~/.rundoc)
    fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RundocError::Config("Could not find home directory".to_string()))?;
        Ok(home.join(".rundoc"))
    }

    /// 설정 파일 경로 (~/.rundoc/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// 기본 위치에서 로드 (없으면 기본 보안 정책)
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default_secure());
        }

        Self::load_from(&path)
    }

    /// 지정한 파일에서 로드
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| RundocError::Config(format!("{}: {}", path.display(), e)))
    }

    /// 기본 위치에 저장
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| RundocError::Config(e.to_string()))?;
        fs::write(path, toml_string)?;
        Ok(())
    }
}
