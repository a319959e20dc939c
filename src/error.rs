use crate::content::NodeKind;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RundocError {
    // 문서 작성 에러
    #[error("row has {values} values but the table only has {headers} headers")]
    RowTooLong { values: usize, headers: usize },

    // 트리 순회 에러
    #[error("unknown node type: {0}")]
    UnknownNodeType(NodeKind),

    #[error("missing metadata key: {0}")]
    MissingMetadata(String),

    #[error("metadata key {key} is not a {expected}")]
    InvalidMetadata { key: String, expected: &'static str },

    #[error("failed to read remote content: {0}")]
    RemoteRead(std::io::Error),

    // 보안 검증 에러
    #[error("command plan has no arguments")]
    EmptyArguments,

    #[error("command cannot be empty")]
    EmptyCommand,

    #[error("command not allowed: {command} (allowed: {allowed:?})")]
    CommandNotAllowed { command: String, allowed: Vec<String> },

    #[error("dangerous command blocked: {0}")]
    DangerousCommandBlocked(String),

    #[error("shell not allowed: {shell} (allowed: {allowed:?})")]
    ShellNotAllowed { shell: String, allowed: Vec<String> },

    // 환경 변수 에러
    #[error("required environment variables not set: {0:?}")]
    MissingEnvironment(Vec<String>),

    // 실행 에러
    #[error("command timed out after {0:?}")]
    Timeout(Duration),

    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    // 조회/오케스트레이션 에러
    #[error("document '{0}' not found")]
    DocumentNotFound(String),

    #[error("no executable blocks found for section '{0}'")]
    NoExecutables(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RundocError>;
