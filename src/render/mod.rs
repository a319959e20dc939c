pub mod markdown;

use crate::content::Node;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use markdown::MarkdownRenderer;

/// 노드 트리를 특정 출력 형태로 변환하는 렌더러
///
/// 마크다운 렌더러는 `String`, 실행 계획 렌더러는 `Vec<CommandPlan>`을 만듭니다.
pub trait Renderer {
    type Output;

    fn render(&self, node: &Node) -> Result<Self::Output>;
}

/// 섹션의 이름과 중첩 레벨 (최상위 = 1)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    pub name: String,
    pub level: usize,
}

impl SectionInfo {
    pub fn new(name: impl Into<String>, level: usize) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// 순회 중인 조상 섹션 스택
///
/// `push`는 새 경로를 반환하고 자신은 바꾸지 않으므로, 형제 서브트리끼리
/// 서로의 push를 볼 수 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextPath {
    sections: Vec<SectionInfo>,
}

impl ContextPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, name: &str) -> ContextPath {
        let mut sections = self.sections.clone();
        let level = sections.len() + 1;
        sections.push(SectionInfo::new(name, level));
        ContextPath { sections }
    }

    /// 현재 섹션 (비어 있으면 기본값)
    pub fn current(&self) -> SectionInfo {
        self.sections.last().cloned().unwrap_or_default()
    }

    pub fn current_section(&self) -> &str {
        self.sections.last().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// 현재 깊이 (비어 있으면 0)
    pub fn current_level(&self) -> usize {
        self.sections.last().map(|s| s.level).unwrap_or(0)
    }

    pub fn depth(&self) -> usize {
        self.sections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_does_not_mutate_parent() {
        let root = ContextPath::new().push("Doc");
        let left = root.push("Left");
        let right = root.push("Right");

        assert_eq!(root.depth(), 1);
        assert_eq!(left.current(), SectionInfo::new("Left", 2));
        assert_eq!(right.current(), SectionInfo::new("Right", 2));
    }

    #[test]
    fn test_empty_path() {
        let path = ContextPath::new();
        assert_eq!(path.current(), SectionInfo::default());
        assert_eq!(path.current_section(), "");
        assert_eq!(path.current_level(), 0);
    }
}
