pub mod leaf;
pub mod structure;

use crate::error::{Result, RundocError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub use leaf::{
    BlockQuote, Code, CodeBlock, CodeBlockExecType, Comment, Executable, Header, Link, Remote,
    TableRow, Text,
};
pub use structure::{
    document_factory, section_factory, Container, Document, DocumentApplier, Frontmatter, List,
    ListKind, Paragraph, Section, SectionBuilder, Table,
};

/// 트리 노드 종류 태그. 모든 디스패치는 이 태그로 이루어집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Section,
    Paragraph,
    List,
    Table,
    TableRow,
    Header,
    Text,
    Code,
    Link,
    CodeBlock,
    Executable,
    BlockQuote,
    Remote,
    Comment,
    Frontmatter,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Section => "section",
            NodeKind::Paragraph => "paragraph",
            NodeKind::List => "list",
            NodeKind::Table => "table",
            NodeKind::TableRow => "table-row",
            NodeKind::Header => "header",
            NodeKind::Text => "text",
            NodeKind::Code => "code",
            NodeKind::Link => "link",
            NodeKind::CodeBlock => "code-block",
            NodeKind::Executable => "executable",
            NodeKind::BlockQuote => "block-quote",
            NodeKind::Remote => "remote",
            NodeKind::Comment => "comment",
            NodeKind::Frontmatter => "front-matter",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 메타데이터 맵 (키 순서 고정)
pub type Metadata = BTreeMap<String, Value>;

/// 콘텐츠 노드를 렌더링 가능한 형태로 변환한 결과
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedContent {
    /// 콘텐츠 종류
    pub kind: NodeKind,
    /// 렌더링된 텍스트
    pub content: String,
    /// 부가 정보 (링크 URL, 셸 이름 등)
    pub metadata: Metadata,
}

impl MaterializedContent {
    pub fn new(kind: NodeKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// 문자열 메타데이터 조회
    pub fn string(&self, key: &str) -> Result<&str> {
        match self.metadata.get(key) {
            None => Err(RundocError::MissingMetadata(key.to_string())),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(RundocError::InvalidMetadata {
                key: key.to_string(),
                expected: "string",
            }),
        }
    }

    /// 문자열 배열 메타데이터 조회
    pub fn strings(&self, key: &str) -> Result<Vec<String>> {
        let invalid = || RundocError::InvalidMetadata {
            key: key.to_string(),
            expected: "list of strings",
        };

        match self.metadata.get(key) {
            None => Err(RundocError::MissingMetadata(key.to_string())),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect(),
            Some(_) => Err(invalid()),
        }
    }
}

/// Leaf capability: a node that turns itself into text + metadata.
pub trait Materialize {
    fn kind(&self) -> NodeKind;

    fn materialize(&self) -> Result<MaterializedContent>;
}

/// Container capability: a node with an identifier and ordered children.
pub trait Structure {
    fn kind(&self) -> NodeKind;

    /// 제목으로 쓰이는 식별자 (문단/목록/표는 빈 문자열)
    fn identifier(&self) -> &str;

    fn children(&self) -> &[Node];
}

/// 문서 트리의 모든 요소
#[derive(Debug)]
pub enum Node {
    Document(Document),
    Section(Section),
    Paragraph(Paragraph),
    List(List),
    Table(Table),
    TableRow(TableRow),
    Header(Header),
    Text(Text),
    Code(Code),
    Link(Link),
    CodeBlock(CodeBlock),
    Executable(Executable),
    BlockQuote(BlockQuote),
    Remote(Remote),
    Comment(Comment),
    Frontmatter(Frontmatter),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Section(_) => NodeKind::Section,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::List(_) => NodeKind::List,
            Node::Table(_) => NodeKind::Table,
            Node::TableRow(_) => NodeKind::TableRow,
            Node::Header(_) => NodeKind::Header,
            Node::Text(_) => NodeKind::Text,
            Node::Code(_) => NodeKind::Code,
            Node::Link(_) => NodeKind::Link,
            Node::CodeBlock(_) => NodeKind::CodeBlock,
            Node::Executable(_) => NodeKind::Executable,
            Node::BlockQuote(_) => NodeKind::BlockQuote,
            Node::Remote(_) => NodeKind::Remote,
            Node::Comment(_) => NodeKind::Comment,
            Node::Frontmatter(_) => NodeKind::Frontmatter,
        }
    }

    /// 컨테이너 노드면 `Structure`로 반환
    pub fn as_structure(&self) -> Option<&dyn Structure> {
        match self {
            Node::Document(n) => Some(n),
            Node::Section(n) => Some(n),
            Node::Paragraph(n) => Some(n),
            Node::List(n) => Some(n),
            Node::Table(n) => Some(n),
            Node::TableRow(_)
            | Node::Header(_)
            | Node::Text(_)
            | Node::Code(_)
            | Node::Link(_)
            | Node::CodeBlock(_)
            | Node::Executable(_)
            | Node::BlockQuote(_)
            | Node::Remote(_)
            | Node::Comment(_)
            | Node::Frontmatter(_) => None,
        }
    }

    /// 리프 노드면 `Materialize`로 반환
    pub fn as_content(&self) -> Option<&dyn Materialize> {
        match self {
            Node::TableRow(n) => Some(n),
            Node::Header(n) => Some(n),
            Node::Text(n) => Some(n),
            Node::Code(n) => Some(n),
            Node::Link(n) => Some(n),
            Node::CodeBlock(n) => Some(n),
            Node::Executable(n) => Some(n),
            Node::BlockQuote(n) => Some(n),
            Node::Remote(n) => Some(n),
            Node::Comment(n) => Some(n),
            Node::Document(_)
            | Node::Section(_)
            | Node::Paragraph(_)
            | Node::List(_)
            | Node::Table(_)
            | Node::Frontmatter(_) => None,
        }
    }
}

/// Typed access to one `Node` variant, used by the insert-and-return-handle primitive.
pub trait NodeVariant: Sized {
    fn into_node(self) -> Node;

    fn from_node_mut(node: &mut Node) -> Option<&mut Self>;
}

macro_rules! node_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl NodeVariant for $variant {
                fn into_node(self) -> Node {
                    Node::$variant(self)
                }

                fn from_node_mut(node: &mut Node) -> Option<&mut Self> {
                    match node {
                        Node::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$variant> for Node {
                fn from(value: $variant) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

node_variant!(
    Document,
    Section,
    Paragraph,
    List,
    Table,
    TableRow,
    Header,
    Text,
    Code,
    Link,
    CodeBlock,
    Executable,
    BlockQuote,
    Remote,
    Comment,
    Frontmatter,
);
