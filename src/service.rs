use crate::content::Node;
use crate::error::{Result, RundocError};
use crate::executor::{execute_batch, BatchResult, CommandPlan, ExecutionPlanner, Runner};
use crate::render::{MarkdownRenderer, Renderer};
use sha2::{Digest, Sha256};
use std::fs;

/// 모든 섹션을 대상으로 할 때 쓰는 섹션 이름
pub const ALL_SECTIONS: &str = "";

/// 섹션 필터 정규화. 비어 있거나 공백뿐이면 `None` (모든 섹션)
pub fn section_filter(section: &str) -> Option<&str> {
    let section = section.trim();
    if section == ALL_SECTIONS {
        None
    } else {
        Some(section)
    }
}

/// 렌더링 결과를 읽고 쓰는 저장소
pub trait Repository: Send + Sync {
    fn load(&self, path: &str) -> Result<String>;

    fn save(&self, path: &str, content: &str) -> Result<()>;
}

/// 로컬 파일 시스템 저장소
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRepository;

impl FileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Repository for FileRepository {
    fn load(&self, path: &str) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn save(&self, path: &str, content: &str) -> Result<()> {
        Ok(fs::write(path, content)?)
    }
}

/// 렌더링된 문서와 저장된 파일의 비교 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub matches: bool,
    /// 렌더링된 문서의 SHA256 (hex)
    pub document_hash: String,
    /// 저장된 파일의 SHA256 (hex)
    pub file_hash: String,
}

fn digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 렌더링, 비교, 실행 계획, 실행을 묶는 서비스
pub struct Service {
    repository: Box<dyn Repository>,
    runner: Box<dyn Runner>,
    file_renderer: Box<dyn Renderer<Output = String> + Send + Sync>,
    execution_renderer: Box<dyn Renderer<Output = Vec<CommandPlan>> + Send + Sync>,
}

impl Service {
    pub fn new(
        repository: Box<dyn Repository>,
        runner: Box<dyn Runner>,
        file_renderer: Box<dyn Renderer<Output = String> + Send + Sync>,
        execution_renderer: Box<dyn Renderer<Output = Vec<CommandPlan>> + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            runner,
            file_renderer,
            execution_renderer,
        }
    }

    /// 마크다운 렌더러와 실행 계획 렌더러를 쓰는 기본 구성
    pub fn with_defaults(repository: Box<dyn Repository>, runner: Box<dyn Runner>) -> Self {
        Self::new(
            repository,
            runner,
            Box::new(MarkdownRenderer::new()),
            Box::new(ExecutionPlanner::new()),
        )
    }

    /// 문서를 렌더링해서 `path`에 저장
    pub fn render_file(&self, document: &Node, path: &str) -> Result<()> {
        let content = self.file_renderer.render(document)?;
        self.repository.save(path, &content)
    }

    /// 문서를 렌더링한 결과와 `path`의 파일 내용을 해시로 비교
    pub fn compare_file(&self, document: &Node, path: &str) -> Result<ComparisonResult> {
        let content = self.file_renderer.render(document)?;
        let loaded = self.repository.load(path)?;

        let document_hash = digest(&content);
        let file_hash = digest(&loaded);

        Ok(ComparisonResult {
            matches: document_hash == file_hash,
            document_hash,
            file_hash,
        })
    }

    /// 실행 계획 생성. `section`이 비어 있으면 모든 섹션을 포함합니다.
    pub fn plan_script_execution(&self, document: &Node, section: &str) -> Result<Vec<CommandPlan>> {
        let plans = self.execution_renderer.render(document)?;

        let section = match section_filter(section) {
            Some(section) => section,
            None => return Ok(plans),
        };

        let filtered: Vec<CommandPlan> = plans
            .into_iter()
            .filter(|plan| plan.context.name == section)
            .collect();

        if filtered.is_empty() {
            return Err(RundocError::NoExecutables(section.to_string()));
        }

        Ok(filtered)
    }

    /// 실행 계획을 만들고 순서대로 실행
    pub async fn execute_script(&self, document: &Node, section: &str) -> Result<BatchResult> {
        let plans = self.plan_script_execution(document, section)?;
        tracing::debug!(count = plans.len(), section, "executing script");
        Ok(execute_batch(&plans, self.runner.as_ref()).await)
    }
}
