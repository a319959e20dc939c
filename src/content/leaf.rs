use crate::content::{MaterializedContent, Materialize, NodeKind};
use crate::error::{Result, RundocError};
use std::fmt;
use std::io::Read;
use std::sync::Mutex;

/// 제목 (현재 섹션 깊이의 heading으로 렌더링)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub content: String,
}

impl Header {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Materialize for Header {
    fn kind(&self) -> NodeKind {
        NodeKind::Header
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        Ok(MaterializedContent::new(self.kind(), self.content.as_str()))
    }
}

/// 일반 텍스트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub String);

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Materialize for Text {
    fn kind(&self) -> NodeKind {
        NodeKind::Text
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        Ok(MaterializedContent::new(self.kind(), self.0.as_str()))
    }
}

/// 인라인 코드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code(pub String);

impl Code {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Materialize for Code {
    fn kind(&self) -> NodeKind {
        NodeKind::Code
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        Ok(MaterializedContent::new(self.kind(), self.0.as_str()))
    }
}

/// 하이퍼링크
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// 표시 텍스트
    pub text: String,
    /// 대상 URL
    pub url: String,
}

impl Link {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

impl Materialize for Link {
    fn kind(&self) -> NodeKind {
        NodeKind::Link
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        Ok(MaterializedContent::new(self.kind(), self.text.as_str())
            .with_metadata("url", self.url.as_str()))
    }
}

/// 코드 블록을 정적 예시로 둘지, 실행 가능한 단계로 둘지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeBlockExecType {
    Static,
    Exec,
}

/// 실행되지 않는 코드 블록 (예시, 페이로드 등)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// 블록 언어 (json, bash, rust ...)
    pub block_type: String,
    pub cmd: Vec<String>,
}

impl CodeBlock {
    pub fn new(block_type: impl Into<String>, cmd: Vec<String>) -> Self {
        Self {
            block_type: block_type.into(),
            cmd,
        }
    }
}

impl Materialize for CodeBlock {
    fn kind(&self) -> NodeKind {
        NodeKind::CodeBlock
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        Ok(MaterializedContent::new(self.kind(), self.cmd.join(" "))
            .with_metadata("block_type", self.block_type.as_str()))
    }
}

/// 인용문
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockQuote(pub String);

impl BlockQuote {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Materialize for BlockQuote {
    fn kind(&self) -> NodeKind {
        NodeKind::BlockQuote
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        Ok(MaterializedContent::new(self.kind(), self.0.as_str()))
    }
}

/// 실행 가능한 명령어 블록
///
/// 마크다운에서는 코드 블록으로 렌더링되고, 실행 계획에서는 `CommandPlan` 하나가 됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    /// 사용할 셸 또는 인터프리터 (bash, sh, python3 ...)
    pub shell: String,
    /// 명령어와 인자
    pub cmd: Vec<String>,
    /// 실행 전에 설정되어 있어야 하는 환경 변수 이름
    pub environment: Vec<String>,
}

impl Executable {
    pub fn new(shell: impl Into<String>, cmd: Vec<String>) -> Self {
        Self {
            shell: shell.into(),
            cmd,
            environment: Vec::new(),
        }
    }

    pub fn with_environment(mut self, environment: Vec<String>) -> Self {
        self.environment = environment;
        self
    }
}

impl Materialize for Executable {
    fn kind(&self) -> NodeKind {
        NodeKind::Executable
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        Ok(MaterializedContent::new(self.kind(), self.cmd.join(" "))
            .with_metadata("shell", self.shell.as_str())
            .with_metadata("command", self.cmd.clone())
            .with_metadata("environment", self.environment.clone()))
    }
}

/// 외부 소스(파일, 네트워크 스트림 등)에서 읽어오는 콘텐츠
///
/// 소스는 처음 materialize될 때 끝까지 읽힙니다. 이후 호출은 빈 콘텐츠를 반환합니다.
pub struct Remote {
    reader: Mutex<Box<dyn Read + Send>>,
}

impl Remote {
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Mutex::new(Box::new(reader)),
        }
    }

    /// 메모리 상의 문자열을 소스로 사용
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(std::io::Cursor::new(text.into().into_bytes()))
    }
}

impl fmt::Debug for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Remote").finish_non_exhaustive()
    }
}

impl Materialize for Remote {
    fn kind(&self) -> NodeKind {
        NodeKind::Remote
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        let mut reader = self.reader.lock().map_err(|_| {
            RundocError::RemoteRead(std::io::Error::new(
                std::io::ErrorKind::Other,
                "remote source lock poisoned",
            ))
        })?;

        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(RundocError::RemoteRead)?;

        Ok(MaterializedContent::new(self.kind(), content))
    }
}

/// 표의 한 행
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub values: Vec<String>,
}

impl TableRow {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }
}

impl Materialize for TableRow {
    fn kind(&self) -> NodeKind {
        NodeKind::TableRow
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        Ok(MaterializedContent::new(self.kind(), "").with_metadata("items", self.values.clone()))
    }
}

/// HTML 주석으로 렌더링되는 메모
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment(pub String);

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Materialize for Comment {
    fn kind(&self) -> NodeKind {
        NodeKind::Comment
    }

    fn materialize(&self) -> Result<MaterializedContent> {
        Ok(MaterializedContent::new(self.kind(), self.0.as_str()))
    }
}
