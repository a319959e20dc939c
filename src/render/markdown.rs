use crate::content::{Document, Frontmatter, List, MaterializedContent, Node, NodeKind, Structure, Table};
use crate::error::{Result, RundocError};
use crate::render::{ContextPath, Renderer};

/// 가장 깊은 heading 레벨. 더 깊이 중첩되어도 H5로 렌더링합니다.
pub const MAX_HEADING_LEVEL: usize = 5;

/// 문서 트리를 마크다운 텍스트로 렌더링
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    fn heading_level(path: &ContextPath) -> usize {
        path.current_level().clamp(1, MAX_HEADING_LEVEL)
    }

    fn write_header(out: &mut String, content: &str, level: usize) {
        out.push_str(&"#".repeat(level));
        out.push(' ');
        out.push_str(content);
        out.push_str("\n\n");
    }

    fn write_fenced(out: &mut String, type_hint: &str, content: &str) {
        out.push_str("```");
        out.push_str(type_hint);
        out.push('\n');
        out.push_str(content);
        out.push('\n');
        out.push_str("```");
    }

    fn render_children(&self, children: &[Node], path: &ContextPath) -> Result<Vec<String>> {
        children
            .iter()
            .map(|child| self.render_node(child, path))
            .collect()
    }

    fn render_frontmatter(&self, frontmatter: &Frontmatter) -> Result<String> {
        let yaml = serde_yaml::to_string(&frontmatter.data)?;

        let mut out = String::from("---\n");
        out.push_str(&yaml);
        out.push('\n');
        out.push_str("---\n\n");
        Ok(out)
    }

    fn render_document(&self, document: &Document, path: &ContextPath) -> Result<String> {
        let path = path.push(document.identifier());
        let children = self.render_children(document.children(), &path)?;

        let mut out = String::new();
        if document.has_frontmatter() {
            out.push_str(&self.render_frontmatter(&document.frontmatter)?);
        }

        Self::write_header(&mut out, document.identifier(), Self::heading_level(&path));
        out.push_str(&children.join("\n\n"));
        out.push('\n');
        Ok(out)
    }

    fn render_section(&self, section: &dyn Structure, path: &ContextPath) -> Result<String> {
        let path = path.push(section.identifier());
        let children = self.render_children(section.children(), &path)?;

        let mut out = String::new();
        Self::write_header(&mut out, section.identifier(), Self::heading_level(&path));
        out.push_str(&children.join("\n\n"));
        Ok(out)
    }

    fn render_paragraph(&self, paragraph: &dyn Structure, path: &ContextPath) -> Result<String> {
        Ok(self.render_children(paragraph.children(), path)?.join(" "))
    }

    fn render_list(&self, list: &List, path: &ContextPath) -> Result<String> {
        let prefix = list.kind.prefix();

        let mut out = String::new();
        for item in self.render_children(list.children(), path)? {
            out.push_str(prefix);
            out.push(' ');
            out.push_str(&item);
            out.push('\n');
        }
        Ok(out)
    }

    fn render_table(&self, table: &Table, path: &ContextPath) -> Result<String> {
        let mut out = String::new();

        out.push_str("| ");
        out.push_str(&table.headers.join(" | "));
        out.push_str(" |\n");

        let separators = vec!["----"; table.headers.len()];
        out.push_str("| ");
        out.push_str(&separators.join(" | "));
        out.push_str(" |\n");

        out.push_str(&self.render_children(table.children(), path)?.join("\n"));
        Ok(out)
    }

    fn render_structure(&self, node: &Node, path: &ContextPath) -> Result<String> {
        match node {
            Node::Document(document) => self.render_document(document, path),
            Node::Section(section) => self.render_section(section, path),
            Node::Paragraph(paragraph) => self.render_paragraph(paragraph, path),
            Node::List(list) => self.render_list(list, path),
            Node::Table(table) => self.render_table(table, path),
            other => Err(RundocError::UnknownNodeType(other.kind())),
        }
    }

    fn format_content(&self, content: MaterializedContent, path: &ContextPath) -> Result<String> {
        match content.kind {
            NodeKind::Header => {
                let mut out = String::new();
                Self::write_header(&mut out, &content.content, Self::heading_level(path));
                Ok(out)
            }
            NodeKind::Link => Ok(format!("[{}]({})", content.content, content.string("url")?)),
            NodeKind::Code => Ok(format!("`{}`", content.content)),
            NodeKind::CodeBlock => {
                let mut out = String::new();
                Self::write_fenced(&mut out, content.string("block_type")?, &content.content);
                Ok(out)
            }
            NodeKind::Executable => {
                let mut out = String::new();
                Self::write_fenced(&mut out, content.string("shell")?, &content.content);
                Ok(out)
            }
            NodeKind::BlockQuote => Ok(format!("> {}", content.content)),
            NodeKind::TableRow => Ok(format!("| {} |", content.strings("items")?.join(" | "))),
            NodeKind::Comment => Ok(format!("<!-- {} -->", content.content)),
            NodeKind::Text | NodeKind::Remote => Ok(content.content),
            other => Err(RundocError::UnknownNodeType(other)),
        }
    }

    fn render_content(&self, node: &Node, path: &ContextPath) -> Result<String> {
        let leaf = node
            .as_content()
            .ok_or(RundocError::UnknownNodeType(node.kind()))?;
        let content = leaf.materialize()?;
        self.format_content(content, path)
    }

    fn render_node(&self, node: &Node, path: &ContextPath) -> Result<String> {
        match node.kind() {
            NodeKind::Document
            | NodeKind::Section
            | NodeKind::Paragraph
            | NodeKind::List
            | NodeKind::Table
            | NodeKind::Frontmatter => self.render_structure(node, path),
            NodeKind::TableRow
            | NodeKind::Header
            | NodeKind::Text
            | NodeKind::Code
            | NodeKind::Link
            | NodeKind::CodeBlock
            | NodeKind::Executable
            | NodeKind::BlockQuote
            | NodeKind::Remote
            | NodeKind::Comment => self.render_content(node, path),
        }
    }
}

impl Renderer for MarkdownRenderer {
    type Output = String;

    fn render(&self, node: &Node) -> Result<String> {
        self.render_node(node, &ContextPath::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{
        Container, Executable, Frontmatter, Link, ListKind, Paragraph, Remote, Section, Text,
    };

    fn render(node: impl Into<Node>) -> Result<String> {
        MarkdownRenderer::new().render(&node.into())
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_document_with_remote_content() {
        let mut doc = Document::new("MyDoc");
        let intro = doc.create_section("INTRO");
        intro
            .write_paragraph()
            .text("This is an introduction.")
            .text("And another sentence here.");
        intro.write_remote_content(Remote::from_text("hey im some remote content"));

        let quick_start = doc.create_section("Quick Start");
        quick_start
            .create_section("Prerequisites")
            .write_paragraph()
            .text("Probably go");

        doc.create_section("Long version")
            .write_paragraph()
            .text("very long version");

        assert_eq!(
            render(doc).unwrap(),
            "# MyDoc\n\n## INTRO\n\nThis is an introduction. And another sentence here.\n\nhey im some remote content\n\n## Quick Start\n\n### Prerequisites\n\nProbably go\n\n## Long version\n\nvery long version\n"
        );
    }

    #[test]
    fn test_heading_level_caps_at_five() {
        let mut doc = Document::new("L1");
        let mut current = doc.create_section("L2");
        for name in ["L3", "L4", "L5", "L6", "L7"] {
            current = current.create_section(name);
        }
        current.write_paragraph().text("deep");

        let out = render(doc).unwrap();

        assert!(out.contains("##### L5\n\n"));
        assert!(out.contains("##### L6\n\n"));
        assert!(out.contains("##### L7\n\n"));
        assert!(!out.contains("######"));
    }

    #[test]
    fn test_heading_marker_matches_depth() {
        for depth in 1..=8usize {
            let mut doc = Document::new("D1");
            if depth > 1 {
                let mut current = doc.create_section("D2");
                for level in 3..=depth {
                    current = current.create_section(format!("D{}", level));
                }
            }

            let out = render(doc).unwrap();
            let expected = format!("{} D{}\n\n", "#".repeat(depth.min(5)), depth);
            assert!(out.contains(&expected), "depth {}: {}", depth, out);
        }
    }

    #[test]
    fn test_render_frontmatter() {
        let mut doc = Document::new("Bug Report");
        let mut frontmatter = Frontmatter::default();
        frontmatter.insert("name", "Bug report");
        frontmatter.insert("about", "Report a bug");
        doc.add_frontmatter(frontmatter);

        let out = render(doc).unwrap();
        assert_eq!(
            out,
            "---\nabout: Report a bug\nname: Bug report\n\n---\n\n# Bug Report\n\n\n"
        );
    }

    #[test]
    fn test_render_list_markers() {
        let mut bullets = crate::content::List::new(ListKind::Bullet);
        bullets.append("one").append("two");
        assert_eq!(render(bullets).unwrap(), "- one\n- two\n");

        let mut numbered = crate::content::List::new(ListKind::Numbered);
        numbered.append("one").append("two");
        assert_eq!(render(numbered).unwrap(), "1. one\n1. two\n");
    }

    #[test]
    fn test_render_table() {
        let mut table = Table::new(strings(&["Command", "Description"]));
        table.add_row(["render", "Generate markdown"]).unwrap();
        table.add_row(["list", "List documents"]).unwrap();

        assert_eq!(
            render(table).unwrap(),
            "| Command | Description |\n| ---- | ---- |\n| render | Generate markdown |\n| list | List documents |"
        );
    }

    #[test]
    fn test_render_inline_and_blocks() {
        let mut paragraph = Paragraph::new();
        paragraph.text("See").link("LICENSE", "./LICENSE").code("cargo test");
        assert_eq!(render(paragraph).unwrap(), "See [LICENSE](./LICENSE) `cargo test`");

        let exec = Executable::new("bash", strings(&["echo", "hello"]));
        assert_eq!(render(exec).unwrap(), "```bash\necho hello\n```");

        assert_eq!(render(crate::content::BlockQuote::new("note")).unwrap(), "> note");
        assert_eq!(render(crate::content::Comment::new("hidden")).unwrap(), "<!-- hidden -->");
        assert_eq!(render(Link::new("a", "b")).unwrap(), "[a](b)");
        assert_eq!(render(Text::new("plain")).unwrap(), "plain");
    }

    #[test]
    fn test_header_uses_current_level() {
        let mut section = Section::new("Setup");
        section.add_node(crate::content::Header::new("Details"));

        assert_eq!(render(section).unwrap(), "# Setup\n\n# Details\n\n");
    }

    #[test]
    fn test_embedded_frontmatter_is_unknown_node() {
        let mut section = Section::new("Setup");
        section.write_paragraph().text("before");
        section.add_node(Frontmatter::default());

        let err = render(section).unwrap_err();
        assert!(matches!(err, RundocError::UnknownNodeType(NodeKind::Frontmatter)));
    }

    struct BrokenSource;

    impl std::io::Read for BrokenSource {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "stream reset"))
        }
    }

    #[test]
    fn test_remote_read_failure_fails_render() {
        let mut doc = Document::new("Doc");
        let section = doc.create_section("Fetched");
        section.write_paragraph().text("before");
        section.write_remote_content(Remote::new(BrokenSource));

        let err = render(doc).unwrap_err();
        assert!(matches!(err, RundocError::RemoteRead(_)));
    }

    #[test]
    fn test_render_is_deterministic() {
        let build = || {
            let mut doc = Document::new("Doc");
            doc.write_intro().text("Intro");
            doc.create_section("Setup").write_executable(
                "bash",
                strings(&["echo", "$TOKEN"]),
                strings(&["TOKEN"]),
            );
            doc
        };

        let doc = Node::from(build());
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.render(&doc).unwrap(), renderer.render(&doc).unwrap());
    }
}
