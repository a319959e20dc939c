use crate::content::{Materialize, Node, Structure};
use crate::error::Result;
use crate::render::{ContextPath, Renderer, SectionInfo};
use serde::{Deserialize, Serialize};

/// 실행할 명령어 하나와 그 명령어가 속한 섹션 정보
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPlan {
    /// 사용할 셸 또는 인터프리터
    pub shell: String,
    /// 명령어와 인자
    pub args: Vec<String>,
    /// 명령어가 나온 섹션
    pub context: SectionInfo,
    /// 실행 전 설정되어 있어야 하는 환경 변수
    pub environment: Vec<String>,
}

impl CommandPlan {
    pub fn new(shell: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            shell: shell.into(),
            args,
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: SectionInfo) -> Self {
        self.context = context;
        self
    }

    pub fn with_environment(mut self, environment: Vec<String>) -> Self {
        self.environment = environment;
        self
    }

    /// 공백으로 이어 붙인 명령어 문자열
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

/// 문서 트리에서 실행 블록을 읽기 순서대로 추출
///
/// 문서, 섹션, 목록만 내려가며 문단과 표는 건너뜁니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionPlanner;

impl ExecutionPlanner {
    pub fn new() -> Self {
        Self
    }

    fn plan_children(&self, node: &dyn Structure, path: &ContextPath) -> Result<Vec<CommandPlan>> {
        let path = path.push(node.identifier());

        let mut plans = Vec::new();
        for child in node.children() {
            plans.extend(self.plan_node(child, &path)?);
        }
        Ok(plans)
    }

    fn plan_executable(&self, leaf: &dyn Materialize, path: &ContextPath) -> Result<CommandPlan> {
        let content = leaf.materialize()?;

        Ok(CommandPlan {
            shell: content.string("shell")?.to_string(),
            args: content.strings("command")?,
            context: path.current(),
            environment: content.strings("environment")?,
        })
    }

    fn plan_node(&self, node: &Node, path: &ContextPath) -> Result<Vec<CommandPlan>> {
        match node {
            Node::Document(document) => self.plan_children(document, path),
            Node::Section(section) => self.plan_children(section, path),
            Node::List(list) => self.plan_children(list, path),
            Node::Executable(executable) => Ok(vec![self.plan_executable(executable, path)?]),
            Node::Paragraph(_)
            | Node::Table(_)
            | Node::TableRow(_)
            | Node::Header(_)
            | Node::Text(_)
            | Node::Code(_)
            | Node::Link(_)
            | Node::CodeBlock(_)
            | Node::BlockQuote(_)
            | Node::Remote(_)
            | Node::Comment(_)
            | Node::Frontmatter(_) => Ok(Vec::new()),
        }
    }
}

impl Renderer for ExecutionPlanner {
    type Output = Vec<CommandPlan>;

    fn render(&self, node: &Node) -> Result<Vec<CommandPlan>> {
        let plans = self.plan_node(node, &ContextPath::new())?;
        tracing::debug!(count = plans.len(), "execution plan built");
        Ok(plans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Container, Document, Executable, List, ListKind, Remote, Section};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn sample_document() -> Document {
        let mut doc = Document::new("MyDoc");
        let intro = doc.create_section("INTRO");
        intro
            .write_paragraph()
            .text("This is an introduction.")
            .text("And another sentence here.");
        intro.write_remote_content(Remote::from_text("hey im some remote content"));
        intro.write_executable("bash", strings(&["echo", "hello", "world"]), Vec::new());

        let quick_start = intro.create_section("Quick Start");
        quick_start.write_paragraph().text("Install dependencies");
        quick_start.write_executable("bash", strings(&["go", "get"]), Vec::new());
        doc
    }

    #[test]
    fn test_plans_in_reading_order_with_context() {
        let plans = ExecutionPlanner::new()
            .render(&Node::from(sample_document()))
            .unwrap();

        assert_eq!(
            plans,
            vec![
                CommandPlan::new("bash", strings(&["echo", "hello", "world"]))
                    .with_context(SectionInfo::new("INTRO", 2)),
                CommandPlan::new("bash", strings(&["go", "get"]))
                    .with_context(SectionInfo::new("Quick Start", 3)),
            ]
        );
    }

    #[test]
    fn test_paragraphs_and_tables_are_not_descended() {
        let mut section = Section::new("Setup");

        let paragraph = section.write_paragraph();
        paragraph.text("no commands here");
        paragraph
            .items
            .push(Executable::new("bash", strings(&["echo", "in-paragraph"])).into());

        let table = section.create_table(strings(&["a"]));
        table.add_row(["echo"]).unwrap();
        table.push_node(Executable::new("bash", strings(&["echo", "in-table"])));

        section.write_code_block(
            "bash",
            strings(&["npm", "install"]),
            crate::content::CodeBlockExecType::Static,
        );

        let plans = ExecutionPlanner::new().render(&Node::from(section)).unwrap();
        assert!(plans.is_empty());
    }

    #[test]
    fn test_list_items_contribute_plans() {
        let mut doc = Document::new("Doc");
        let mut list = List::new(ListKind::Numbered);
        list.append("first do this");
        list.append_node(
            crate::content::Executable::new("sh", strings(&["make", "build"]))
                .with_environment(strings(&["CI"])),
        );
        doc.create_section("Steps").add_list(list);

        let plans = ExecutionPlanner::new().render(&Node::from(doc)).unwrap();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].args, strings(&["make", "build"]));
        assert_eq!(plans[0].environment, strings(&["CI"]));
        // 목록도 컨텍스트를 push 하므로 이름 없는 레벨 3
        assert_eq!(plans[0].context, SectionInfo::new("", 3));
    }

    #[test]
    fn test_command_line() {
        let plan = CommandPlan::new("bash", strings(&["echo", "hello", "world"]));
        assert_eq!(plan.command_line(), "echo hello world");
    }
}
