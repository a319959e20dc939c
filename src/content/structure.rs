use crate::content::leaf::{
    BlockQuote, Code, CodeBlock, CodeBlockExecType, Comment, Executable, Link, Remote, TableRow,
    Text,
};
use crate::content::{Node, NodeKind, NodeVariant, Structure};
use crate::error::{Result, RundocError};
use std::collections::BTreeMap;

/// 새 자식 노드를 넣을 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// 맨 앞 (intro). 기존 형제 노드는 한 칸씩 뒤로 밀림
    Front,
    /// 맨 뒤
    Back,
}

/// 자식 노드를 삽입하고 삽입된 값의 핸들을 반환합니다.
///
/// `add_*`와 `create_*`/`write_*`는 모두 이 함수를 거칩니다.
fn insert_child<T: NodeVariant>(children: &mut Vec<Node>, placement: Placement, value: T) -> &mut T {
    let idx = match placement {
        Placement::Front => {
            children.insert(0, value.into_node());
            0
        }
        Placement::Back => {
            children.push(value.into_node());
            children.len() - 1
        }
    };

    match T::from_node_mut(&mut children[idx]) {
        Some(inserted) => inserted,
        None => unreachable!("inserted node changed variant"),
    }
}

/// Authoring operations shared by documents and sections.
///
/// Every `add_*` takes a finished value; every `create_*`/`write_*` inserts an
/// empty value and hands back a live reference to it.
pub trait Container {
    fn children_mut(&mut self) -> &mut Vec<Node>;

    /// 임의의 노드를 끝에 추가
    fn add_node(&mut self, node: impl Into<Node>) {
        self.children_mut().push(node.into());
    }

    fn add_section(&mut self, section: Section) {
        insert_child(self.children_mut(), Placement::Back, section);
    }

    fn create_section(&mut self, name: impl Into<String>) -> &mut Section {
        insert_child(self.children_mut(), Placement::Back, Section::new(name))
    }

    /// 소개 문단을 맨 앞에 추가
    fn add_intro(&mut self, paragraph: Paragraph) {
        insert_child(self.children_mut(), Placement::Front, paragraph);
    }

    fn write_intro(&mut self) -> &mut Paragraph {
        insert_child(self.children_mut(), Placement::Front, Paragraph::new())
    }

    fn add_paragraph(&mut self, paragraph: Paragraph) {
        insert_child(self.children_mut(), Placement::Back, paragraph);
    }

    fn write_paragraph(&mut self) -> &mut Paragraph {
        insert_child(self.children_mut(), Placement::Back, Paragraph::new())
    }

    fn add_table(&mut self, table: Table) {
        insert_child(self.children_mut(), Placement::Back, table);
    }

    fn create_table(&mut self, headers: Vec<String>) -> &mut Table {
        insert_child(self.children_mut(), Placement::Back, Table::new(headers))
    }

    fn add_list(&mut self, list: List) {
        insert_child(self.children_mut(), Placement::Back, list);
    }

    fn create_list(&mut self, kind: ListKind) -> &mut List {
        insert_child(self.children_mut(), Placement::Back, List::new(kind))
    }

    /// `Static`이면 코드 블록, `Exec`이면 실행 가능한 블록으로 추가
    fn write_code_block(
        &mut self,
        block_type: impl Into<String>,
        cmd: Vec<String>,
        exec_type: CodeBlockExecType,
    ) {
        match exec_type {
            CodeBlockExecType::Static => {
                insert_child(self.children_mut(), Placement::Back, CodeBlock::new(block_type, cmd));
            }
            CodeBlockExecType::Exec => {
                insert_child(self.children_mut(), Placement::Back, Executable::new(block_type, cmd));
            }
        }
    }

    fn write_executable(
        &mut self,
        shell: impl Into<String>,
        cmd: Vec<String>,
        environment: Vec<String>,
    ) {
        let executable = Executable::new(shell, cmd).with_environment(environment);
        insert_child(self.children_mut(), Placement::Back, executable);
    }

    fn write_block_quote(&mut self, text: impl Into<String>) {
        insert_child(self.children_mut(), Placement::Back, BlockQuote::new(text));
    }

    fn write_remote_content(&mut self, remote: Remote) {
        insert_child(self.children_mut(), Placement::Back, remote);
    }

    fn write_comment(&mut self, text: impl Into<String>) {
        insert_child(self.children_mut(), Placement::Back, Comment::new(text));
    }
}

/// 문서 맨 앞에 붙는 YAML 메타데이터
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub data: BTreeMap<String, serde_yaml::Value>,
}

impl Frontmatter {
    pub fn new(data: BTreeMap<String, serde_yaml::Value>) -> Self {
        Self { data }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 루트 문서
#[derive(Debug, Default)]
pub struct Document {
    pub name: String,
    pub frontmatter: Frontmatter,
    pub content: Vec<Node>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frontmatter: Frontmatter::default(),
            content: Vec::new(),
        }
    }

    pub fn add_frontmatter(&mut self, frontmatter: Frontmatter) {
        self.frontmatter = frontmatter;
    }

    pub fn has_frontmatter(&self) -> bool {
        !self.frontmatter.is_empty()
    }
}

impl Container for Document {
    fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.content
    }
}

impl Structure for Document {
    fn kind(&self) -> NodeKind {
        NodeKind::Document
    }

    fn identifier(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[Node] {
        &self.content
    }
}

/// 이름이 있는 섹션. 중첩 깊이가 heading 레벨을 결정합니다.
#[derive(Debug, Default)]
pub struct Section {
    pub name: String,
    pub content: Vec<Node>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
        }
    }
}

impl Container for Section {
    fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.content
    }
}

impl Structure for Section {
    fn kind(&self) -> NodeKind {
        NodeKind::Section
    }

    fn identifier(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[Node] {
        &self.content
    }
}

/// 인라인 콘텐츠 묶음. 렌더링 시 공백 하나로 이어집니다.
#[derive(Debug, Default)]
pub struct Paragraph {
    pub items: Vec<Node>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.items.push(Text::new(text).into_node());
        self
    }

    pub fn code(&mut self, code: impl Into<String>) -> &mut Self {
        self.items.push(Code::new(code).into_node());
        self
    }

    pub fn link(&mut self, text: impl Into<String>, url: impl Into<String>) -> &mut Self {
        self.items.push(Link::new(text, url).into_node());
        self
    }

    /// 값으로 조립할 때 사용 (`add_*` 스타일)
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text(text);
        self
    }
}

impl Structure for Paragraph {
    fn kind(&self) -> NodeKind {
        NodeKind::Paragraph
    }

    fn identifier(&self) -> &str {
        ""
    }

    fn children(&self) -> &[Node] {
        &self.items
    }
}

/// 목록 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    /// 각 항목 앞에 붙는 표시. 번호 목록도 항상 `1.`
    pub fn prefix(&self) -> &'static str {
        match self {
            ListKind::Bullet => "-",
            ListKind::Numbered => "1.",
        }
    }
}

#[derive(Debug)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<Node>,
}

impl List {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// 맨 앞에 항목 추가
    pub fn push(&mut self, item: impl Into<String>) -> &mut Self {
        self.items.insert(0, Text::new(item).into_node());
        self
    }

    /// 맨 뒤에 항목 추가
    pub fn append(&mut self, item: impl Into<String>) -> &mut Self {
        self.items.push(Text::new(item).into_node());
        self
    }

    /// 텍스트가 아닌 항목 (예: 실행 블록) 추가
    pub fn append_node(&mut self, node: impl Into<Node>) -> &mut Self {
        self.items.push(node.into());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Structure for List {
    fn kind(&self) -> NodeKind {
        NodeKind::List
    }

    fn identifier(&self) -> &str {
        ""
    }

    fn children(&self) -> &[Node] {
        &self.items
    }
}

/// 헤더와 행으로 구성된 표
#[derive(Debug)]
pub struct Table {
    pub headers: Vec<String>,
    rows: Vec<Node>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 행 추가. 값이 헤더보다 많으면 `RowTooLong`으로 실패하고 표는 그대로 유지됩니다.
    pub fn add_row<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();

        if values.len() > self.headers.len() {
            return Err(RundocError::RowTooLong {
                values: values.len(),
                headers: self.headers.len(),
            });
        }

        self.rows.push(TableRow::new(values).into_node());
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 행 검증 없이 임의의 자식 노드 추가 (순회 테스트용)
    #[cfg(test)]
    pub(crate) fn push_node(&mut self, node: impl Into<Node>) {
        self.rows.push(node.into());
    }
}

impl Structure for Table {
    fn kind(&self) -> NodeKind {
        NodeKind::Table
    }

    fn identifier(&self) -> &str {
        ""
    }

    fn children(&self) -> &[Node] {
        &self.rows
    }
}

/// 섹션 템플릿용 빌더 함수
pub type SectionBuilder<'a> = &'a dyn Fn(&mut Section) -> Result<()>;

/// 문서 템플릿용 빌더 함수
pub type DocumentApplier<'a> = &'a dyn Fn(&mut Document) -> Result<()>;

/// 빌더를 순서대로 적용해 섹션을 만듭니다. 첫 에러에서 중단합니다.
pub fn section_factory(name: impl Into<String>, builders: &[SectionBuilder<'_>]) -> Result<Section> {
    let mut section = Section::new(name);

    for builder in builders {
        builder(&mut section)?;
    }

    Ok(section)
}

/// 빌더를 순서대로 적용해 문서를 만듭니다. 첫 에러에서 중단합니다.
pub fn document_factory(name: impl Into<String>, appliers: &[DocumentApplier<'_>]) -> Result<Document> {
    let mut document = Document::new(name);

    for applier in appliers {
        applier(&mut document)?;
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markdown::MarkdownRenderer;
    use crate::render::Renderer;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_row_too_long_does_not_mutate() {
        let mut table = Table::new(strings(&["Command", "Description"]));
        table.add_row(["render", "Generate markdown"]).unwrap();

        let result = table.add_row(["a", "b", "c"]);

        assert!(matches!(
            result,
            Err(RundocError::RowTooLong { values: 3, headers: 2 })
        ));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_add_row_shorter_than_headers() {
        let mut table = Table::new(strings(&["a", "b", "c"]));
        assert!(table.add_row(["only one"]).is_ok());
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_list_push_prepends_and_append_appends() {
        let mut list = List::new(ListKind::Bullet);
        list.append("second").append("third");
        list.push("first");

        let texts: Vec<&str> = list
            .items
            .iter()
            .map(|node| match node {
                Node::Text(t) => t.0.as_str(),
                _ => panic!("expected text item"),
            })
            .collect();

        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_write_intro_shifts_siblings() {
        let mut doc = Document::new("MyDoc");
        doc.create_section("One");
        doc.create_section("Two");
        doc.write_intro().text("Intro");

        let kinds: Vec<NodeKind> = doc.content.iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Paragraph, NodeKind::Section, NodeKind::Section]
        );
        assert_eq!(doc.content.len(), 3);
    }

    #[test]
    fn test_add_and_create_produce_same_tree() {
        let mut built = Document::new("Doc");
        let mut setup = Section::new("Setup");
        setup.add_paragraph(Paragraph::new().with_text("Install"));
        let mut table = Table::new(strings(&["k", "v"]));
        table.add_row(["a", "1"]).unwrap();
        setup.add_table(table);
        let mut list = List::new(ListKind::Numbered);
        list.append("step");
        setup.add_list(list);
        built.add_section(setup);
        built.add_intro(Paragraph::new().with_text("Hello"));

        let mut created = Document::new("Doc");
        let setup = created.create_section("Setup");
        setup.write_paragraph().text("Install");
        setup
            .create_table(strings(&["k", "v"]))
            .add_row(["a", "1"])
            .unwrap();
        setup.create_list(ListKind::Numbered).append("step");
        created.write_intro().text("Hello");

        let renderer = MarkdownRenderer::new();
        assert_eq!(
            renderer.render(&Node::from(built)).unwrap(),
            renderer.render(&Node::from(created)).unwrap()
        );
    }

    #[test]
    fn test_write_code_block_exec_type() {
        let mut section = Section::new("Setup");
        section.write_code_block("bash", strings(&["npm", "install"]), CodeBlockExecType::Exec);
        section.write_code_block("json", strings(&["{}"]), CodeBlockExecType::Static);

        assert_eq!(section.content[0].kind(), NodeKind::Executable);
        assert_eq!(section.content[1].kind(), NodeKind::CodeBlock);
    }

    fn add_description(section: &mut Section) -> Result<()> {
        section.write_paragraph().text("This is a description");
        Ok(())
    }

    fn reject(_section: &mut Section) -> Result<()> {
        Err(RundocError::Config("builder failed".to_string()))
    }

    #[test]
    fn test_section_factory() {
        let section = section_factory("Setup", &[&add_description]).unwrap();
        assert_eq!(section.name, "Setup");
        assert_eq!(section.content.len(), 1);

        assert!(section_factory("Setup", &[&add_description, &reject]).is_err());
    }

    #[test]
    fn test_document_factory() {
        let doc = document_factory("README", &[&|d: &mut Document| {
            d.write_intro().text("Project overview");
            Ok(())
        }])
        .unwrap();

        assert_eq!(doc.name, "README");
        assert_eq!(doc.content[0].kind(), NodeKind::Paragraph);
    }
}
